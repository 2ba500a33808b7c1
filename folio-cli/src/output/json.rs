//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use folio_core::Chunk;
use std::io::Write;

/// JSON formatter - outputs chunks as one JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    chunks: Vec<Chunk>,
    pretty: bool,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter (pretty printed)
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunks: Vec::new(),
            pretty: true,
        }
    }

    /// Choose between pretty and compact output
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl<W: Write + Send> OutputFormatter for JsonFormatter<W> {
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        self.chunks.push(chunk.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.chunks)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.chunks)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
