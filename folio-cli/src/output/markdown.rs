//! Markdown output formatter

use super::OutputFormatter;
use anyhow::Result;
use folio_core::Chunk;
use std::io::Write;

/// Markdown formatter - one section per chunk
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    chunk_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_count: 0,
        }
    }
}

impl<W: Write + Send> OutputFormatter for MarkdownFormatter<W> {
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        self.chunk_count += 1;
        writeln!(self.writer, "## {}. {}", self.chunk_count, chunk.heading)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "*{} / {} (page {})*",
            chunk.chapter, chunk.section, chunk.page
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", chunk.content)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total chunks: {}*", self.chunk_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
