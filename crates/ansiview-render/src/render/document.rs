//! Whole-document rendering.
//!
//! The [`DocumentRenderer`] writes three kinds of chunk to a [`Sink`]:
//!
//! 1. A header: doctype, a content security policy that allows nothing but
//!    nonce-tagged inline style (and script, for live surfaces), the title,
//!    the three style blocks (compiled, font, custom, in that order so later
//!    blocks override earlier ones), the optional state script, and the
//!    opening body.
//! 2. One chunk per rendered text segment.
//! 3. A footer closing the body.
//!
//! Segments are pulled one at a time and each chunk is handed to the sink
//! before the next segment is requested, so memory use does not grow with
//! the document.

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use serde_json::Value;

use crate::config::RenderSnapshot;
use crate::error::Result;
use crate::segment::Segment;
use crate::theme::ThemeKind;
use crate::util::{escape_html, title_for_path};

use super::segment::SegmentRenderer;
use super::sink::Sink;

/// Class of the element wrapping the rendered segments.
pub const CONTAINER_CLASS: &str = "ansiview";

const FOOTER: &str = "</div>\n</body>\n</html>\n";

const NONCE_BYTES: usize = 16;

/// Provides document text and identity.
pub trait DocumentSource {
    /// Text of a byte range. Out-of-range requests yield an empty string.
    fn text(&self, range: Range<usize>) -> &str;

    /// Path the document was loaded from.
    fn file_name(&self) -> &Path;
}

/// An in-memory document.
#[derive(Debug, Clone)]
pub struct TextDocument {
    path: PathBuf,
    text: String,
}

impl TextDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Reads a document from disk. Invalid UTF-8 is replaced.
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let text = String::from_utf8(bytes)
            .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned());
        Ok(Self::new(path, text))
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl DocumentSource for TextDocument {
    fn text(&self, range: Range<usize>) -> &str {
        self.text.get(range).unwrap_or("")
    }

    fn file_name(&self) -> &Path {
        &self.path
    }
}

/// Where the rendered document will be displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderTarget {
    /// A static export. The theme marker class is written on `<body>` and
    /// no script is allowed.
    Static(ThemeKind),
    /// A live surface that supplies its own theme class. The state object is
    /// embedded in a nonce-tagged script.
    Live { state: Value },
}

/// Per-render random nonces for the content security policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nonces {
    pub style: String,
    pub script: String,
}

impl Nonces {
    /// Draws two independent random nonces.
    pub fn generate() -> Self {
        Self {
            style: random_nonce(),
            script: random_nonce(),
        }
    }
}

fn random_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Shared cancellation flag, checked between segments.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// How a render ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Every segment was rendered.
    Completed { segments: usize },
    /// The render stopped early. The document was still closed.
    Cancelled { segments: usize },
}

impl RenderOutcome {
    /// Number of segment chunks written.
    pub fn segments(&self) -> usize {
        match self {
            RenderOutcome::Completed { segments } | RenderOutcome::Cancelled { segments } => {
                *segments
            }
        }
    }
}

/// Renders whole documents against one configuration snapshot.
///
/// The snapshot is fixed for the lifetime of the renderer: reloading
/// configuration while a render is running does not change its output.
///
/// ```rust
/// use std::sync::Arc;
/// use ansiview_render::config::{RenderConfig, RenderSnapshot};
/// use ansiview_render::{DocumentRenderer, KeyCompactor, Segment, SegmentContext, TextDocument};
///
/// let snapshot = RenderSnapshot::build(Arc::new(KeyCompactor::new()), &RenderConfig::new()).unwrap();
/// let document = TextDocument::new("/tmp/build.log", "ok");
/// let segments = vec![Segment::new(0..2, SegmentContext::text().line_end(true))];
///
/// let mut chunks: Vec<String> = Vec::new();
/// let outcome = DocumentRenderer::new(Arc::new(snapshot))
///     .render(&document, segments, &mut chunks)
///     .unwrap();
///
/// assert_eq!(outcome.segments(), 1);
/// assert_eq!(chunks.len(), 3);
/// assert!(chunks[0].contains("<title>build.log</title>"));
/// ```
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    snapshot: Arc<RenderSnapshot>,
    target: RenderTarget,
    cancellation: CancellationToken,
}

impl DocumentRenderer {
    /// Creates a renderer for a static export in the dark theme.
    pub fn new(snapshot: Arc<RenderSnapshot>) -> Self {
        Self {
            snapshot,
            target: RenderTarget::Static(ThemeKind::Dark),
            cancellation: CancellationToken::new(),
        }
    }

    /// Sets the render target.
    pub fn target(mut self, target: RenderTarget) -> Self {
        self.target = target;
        self
    }

    /// Sets the cancellation token checked between segments.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Renders a document with freshly generated nonces.
    ///
    /// # Errors
    ///
    /// Fails if the state cannot be serialized or the sink rejects a
    /// chunk. Nothing further is written after a failure.
    pub fn render<D, I, S>(&self, document: &D, segments: I, sink: &mut S) -> Result<RenderOutcome>
    where
        D: DocumentSource + ?Sized,
        I: IntoIterator<Item = Segment>,
        S: Sink + ?Sized,
    {
        self.render_with_nonces(document, segments, &Nonces::generate(), sink)
    }

    /// Renders a document with the given nonces.
    ///
    /// # Errors
    ///
    /// See [`render`](Self::render).
    pub fn render_with_nonces<D, I, S>(
        &self,
        document: &D,
        segments: I,
        nonces: &Nonces,
        sink: &mut S,
    ) -> Result<RenderOutcome>
    where
        D: DocumentSource + ?Sized,
        I: IntoIterator<Item = Segment>,
        S: Sink + ?Sized,
    {
        let title = title_for_path(document.file_name());
        sink.write_chunk(&self.header(&title, nonces)?)?;

        let renderer = SegmentRenderer::new(self.snapshot.compactor());
        let mut segments = segments.into_iter();
        let mut rendered = 0;

        loop {
            if self.cancellation.is_cancelled() {
                sink.write_chunk(FOOTER)?;
                tracing::info!(document = %title, segments = rendered, "render cancelled");
                return Ok(RenderOutcome::Cancelled { segments: rendered });
            }

            let Some(segment) = segments.next() else {
                break;
            };
            let text = document.text(segment.range.clone());
            if let Some(chunk) = renderer.render(text, &segment.context) {
                sink.write_chunk(&chunk)?;
                rendered += 1;
            }
        }

        sink.write_chunk(FOOTER)?;
        tracing::info!(document = %title, segments = rendered, "render completed");
        Ok(RenderOutcome::Completed { segments: rendered })
    }

    fn header(&self, title: &str, nonces: &Nonces) -> Result<String> {
        let style_nonce = &nonces.style;
        let script_src = match self.target {
            RenderTarget::Static(_) => "'none'".to_string(),
            RenderTarget::Live { .. } => format!("'nonce-{}'", nonces.script),
        };

        let mut out = String::with_capacity(
            512 + self.snapshot.stylesheet().len()
                + self.snapshot.font_css().len()
                + self.snapshot.custom_css().len(),
        );
        out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str(&format!(
            "<meta http-equiv=\"Content-Security-Policy\" content=\"default-src 'none'; \
             style-src 'nonce-{style_nonce}'; script-src {script_src};\">\n"
        ));
        out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
        out.push_str(&format!("<title>{}</title>\n", escape_html(title)));

        for css in [
            self.snapshot.stylesheet(),
            self.snapshot.font_css(),
            self.snapshot.custom_css(),
        ] {
            out.push_str(&format!("<style nonce=\"{style_nonce}\">\n{css}</style>\n"));
        }

        if let RenderTarget::Live { state } = &self.target {
            out.push_str(&format!(
                "<script nonce=\"{}\">window.ansiviewState = {};</script>\n",
                nonces.script,
                script_safe_json(state)?
            ));
        }

        out.push_str("</head>\n");
        match self.target {
            RenderTarget::Static(theme) => {
                out.push_str(&format!("<body class=\"{}\">\n", theme.class_name()));
            }
            RenderTarget::Live { .. } => out.push_str("<body>\n"),
        }
        out.push_str(&format!("<div class=\"{CONTAINER_CLASS}\">\n"));
        Ok(out)
    }
}

/// Serializes state so it cannot terminate the surrounding script element.
fn script_safe_json(state: &Value) -> Result<String> {
    let json = serde_json::to_string(state)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::error::RenderError;
    use crate::segment::SegmentContext;
    use crate::style::{KeyCompactor, NamedColor, StyleProperties, ThemeOverrideSet};
    use serde_json::json;

    fn snapshot() -> Arc<RenderSnapshot> {
        let config = RenderConfig::new()
            .with_style(
                "attribute-bold",
                ThemeOverrideSet::Universal(StyleProperties::new().with("font-weight", "bold")),
            )
            .with_font(StyleProperties::new().with("font-size", "12px"))
            .with_custom_css(
                StyleProperties::new().with("body", StyleProperties::new().with("margin", "0")),
            );
        Arc::new(RenderSnapshot::build(Arc::new(KeyCompactor::new()), &config).unwrap())
    }

    fn nonces() -> Nonces {
        Nonces {
            style: "c3R5bGU=".to_string(),
            script: "c2NyaXB0".to_string(),
        }
    }

    fn lines(text: &str) -> (TextDocument, Vec<Segment>) {
        let mut segments = Vec::new();
        let mut offset = 0;
        for line in text.split('\n') {
            segments.push(Segment::new(
                offset..offset + line.len(),
                SegmentContext::text().line_end(true),
            ));
            offset += line.len() + 1;
        }
        (TextDocument::new("/logs/run.txt", text), segments)
    }

    #[test]
    fn test_nonces_are_distinct() {
        let nonces = Nonces::generate();
        assert_ne!(nonces.style, nonces.script);
        assert_eq!(nonces.style.len(), 24);
    }

    #[test]
    fn test_static_header() {
        let (document, segments) = lines("one");
        let mut chunks: Vec<String> = Vec::new();
        DocumentRenderer::new(snapshot())
            .target(RenderTarget::Static(ThemeKind::Light))
            .render_with_nonces(&document, segments, &nonces(), &mut chunks)
            .unwrap();

        let header = &chunks[0];
        assert!(header.contains(
            "content=\"default-src 'none'; style-src 'nonce-c3R5bGU='; script-src 'none';\""
        ));
        assert!(header.contains("<title>run.txt</title>"));
        assert!(header.contains("<body class=\"theme-light\">"));
        assert!(!header.contains("<script"));
    }

    #[test]
    fn test_style_blocks_in_order() {
        let (document, segments) = lines("one");
        let mut chunks: Vec<String> = Vec::new();
        DocumentRenderer::new(snapshot())
            .render_with_nonces(&document, segments, &nonces(), &mut chunks)
            .unwrap();

        let header = &chunks[0];
        let computed = header.find("font-weight: bold;").unwrap();
        let font = header.find("font-size: 12px;").unwrap();
        let custom = header.find("margin: 0;").unwrap();
        assert!(computed < font && font < custom);
        assert_eq!(header.matches("<style nonce=\"c3R5bGU=\">").count(), 3);
    }

    #[test]
    fn test_live_header_embeds_state() {
        let (document, segments) = lines("one");
        let mut chunks: Vec<String> = Vec::new();
        DocumentRenderer::new(snapshot())
            .target(RenderTarget::Live {
                state: json!({ "uri": "file:///x</script><script>alert(1)" }),
            })
            .render_with_nonces(&document, segments, &nonces(), &mut chunks)
            .unwrap();

        let header = &chunks[0];
        assert!(header.contains("script-src 'nonce-c2NyaXB0';"));
        assert!(header.contains("<script nonce=\"c2NyaXB0\">window.ansiviewState = {"));
        assert!(header.contains("\\u003c/script\\u003e"));
        assert_eq!(header.matches("</script>").count(), 1);
        assert!(header.contains("<body>\n"));
    }

    #[test]
    fn test_chunk_count_is_segments_plus_two() {
        let (document, segments) = lines("a\nb\nc\nd");
        let mut chunks: Vec<String> = Vec::new();
        let outcome = DocumentRenderer::new(snapshot())
            .render_with_nonces(&document, segments, &nonces(), &mut chunks)
            .unwrap();

        assert_eq!(outcome, RenderOutcome::Completed { segments: 4 });
        assert_eq!(chunks.len(), 6);
        assert_eq!(chunks.last().unwrap(), FOOTER);
    }

    #[test]
    fn test_escape_segments_produce_no_chunk() {
        let document = TextDocument::new("x", "\x1b[31mred");
        let segments = vec![
            Segment::new(0..5, SegmentContext::escape_sequence()),
            Segment::new(5..8, SegmentContext::text().foreground(NamedColor::Red)),
        ];
        let mut chunks: Vec<String> = Vec::new();
        let outcome = DocumentRenderer::new(snapshot())
            .render_with_nonces(&document, segments, &nonces(), &mut chunks)
            .unwrap();

        assert_eq!(outcome.segments(), 1);
        assert_eq!(chunks.len(), 3);
        assert!(!chunks.concat().contains('\x1b'));
    }

    #[test]
    fn test_cancellation_closes_document() {
        let token = CancellationToken::new();
        let (document, segments) = lines("a\nb\nc");
        let trigger = token.clone();
        let segments = segments.into_iter().enumerate().map(move |(i, segment)| {
            if i == 1 {
                trigger.cancel();
            }
            segment
        });

        let mut chunks: Vec<String> = Vec::new();
        let outcome = DocumentRenderer::new(snapshot())
            .cancellation(token)
            .render_with_nonces(&document, segments, &nonces(), &mut chunks)
            .unwrap();

        assert_eq!(outcome, RenderOutcome::Cancelled { segments: 2 });
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks.last().unwrap(), FOOTER);
    }

    #[test]
    fn test_sink_error_aborts() {
        struct FailAfter(usize);
        impl Sink for FailAfter {
            fn write_chunk(&mut self, _: &str) -> Result<()> {
                if self.0 == 0 {
                    return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed").into());
                }
                self.0 -= 1;
                Ok(())
            }
        }

        let (document, segments) = lines("a\nb\nc");
        let pulled = std::cell::Cell::new(0);
        let segments = segments.into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let err = DocumentRenderer::new(snapshot())
            .render_with_nonces(&document, segments, &nonces(), &mut FailAfter(2))
            .unwrap_err();

        assert!(matches!(err, RenderError::Io(_)));
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn test_title_is_escaped() {
        let document = TextDocument::new("/tmp/<b>.log", "");
        let mut chunks: Vec<String> = Vec::new();
        DocumentRenderer::new(snapshot())
            .render_with_nonces(&document, Vec::new(), &nonces(), &mut chunks)
            .unwrap();
        assert!(chunks[0].contains("<title>&lt;b&gt;.log</title>"));
    }

    #[test]
    fn test_out_of_range_text_is_empty() {
        let document = TextDocument::new("x", "abc");
        assert_eq!(document.text(1..3), "bc");
        assert_eq!(document.text(2..10), "");
    }
}
