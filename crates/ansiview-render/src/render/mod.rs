//! Segment and document rendering.
//!
//! [`SegmentRenderer`] turns one segment into nested span markup;
//! [`DocumentRenderer`] wraps a stream of segments in a complete, sealed
//! HTML document and hands each chunk to a [`Sink`] as soon as it is ready.

mod document;
mod segment;
mod sink;

pub use document::{
    CancellationToken, DocumentRenderer, DocumentSource, Nonces, RenderOutcome, RenderTarget,
    TextDocument, CONTAINER_CLASS,
};
pub use segment::{effective_colors, SegmentRenderer, LINE_BREAK};
pub use sink::{Sink, WriteSink};
