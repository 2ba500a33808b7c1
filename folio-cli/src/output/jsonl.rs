//! JSON Lines output formatter

use super::OutputFormatter;
use anyhow::Result;
use folio_core::Chunk;
use std::io::Write;

/// JSON Lines formatter - one chunk object per line, written as it arrives
pub struct JsonLinesFormatter<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesFormatter<W> {
    /// Create a new JSON Lines formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send> OutputFormatter for JsonLinesFormatter<W> {
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        serde_json::to_writer(&mut self.writer, chunk)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
