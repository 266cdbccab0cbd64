//! Output sinks for streamed rendering.

use std::io::Write;

use crate::error::Result;

/// Receives rendered chunks in emission order.
///
/// The renderer does not produce the next chunk until `write_chunk`
/// returns, so a slow sink stalls generation instead of letting output pile
/// up. An error aborts the render.
pub trait Sink {
    fn write_chunk(&mut self, chunk: &str) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        (**self).write_chunk(chunk)
    }
}

/// Collects chunks in memory, one entry per chunk.
impl Sink for Vec<String> {
    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        self.push(chunk.to_string());
        Ok(())
    }
}

/// Writes chunks to any [`std::io::Write`].
#[derive(Debug)]
pub struct WriteSink<W: Write> {
    writer: W,
}

impl<W: Write> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> Sink for WriteSink<W> {
    fn write_chunk(&mut self, chunk: &str) -> Result<()> {
        self.writer.write_all(chunk.as_bytes())?;
        Ok(())
    }
}
