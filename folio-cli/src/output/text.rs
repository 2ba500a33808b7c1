//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use folio_core::Chunk;
use serde_json::{Map, Value};
use std::io::{self, Write};

const RULE: &str = "==================================================";

/// Export-style formatter: a numbered block per chunk with its metadata
/// followed by its content
pub struct TextFormatter<W: Write> {
    writer: W,
    chunk_count: usize,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            chunk_count: 0,
        }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

/// Chunk metadata without its content, in a stable key order
pub(crate) fn metadata(chunk: &Chunk) -> Value {
    let mut map = Map::new();
    map.insert("source".into(), chunk.source.clone().into());
    map.insert("heading".into(), chunk.heading.clone().into());
    map.insert("variant".into(), chunk.variant.clone().into());
    map.insert("chapter".into(), chunk.chapter.clone().into());
    map.insert("section".into(), chunk.section.clone().into());
    map.insert("page".into(), serde_json::to_value(chunk.page).unwrap_or(Value::Null));
    if let Some(source_file) = &chunk.source_file {
        map.insert("source_file".into(), source_file.clone().into());
    }
    Value::Object(map)
}

impl<W: Write + Send> OutputFormatter for TextFormatter<W> {
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()> {
        writeln!(self.writer, "--- Chunk {} ---", self.chunk_count)?;
        writeln!(
            self.writer,
            "METADATA:\n{}\n",
            serde_json::to_string_pretty(&metadata(chunk))?
        )?;
        writeln!(self.writer, "CONTENT:\n{}", chunk.content)?;
        writeln!(self.writer, "\n{RULE}\n")?;
        self.chunk_count += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "Total Chunks: {}", self.chunk_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{sample_chunks, write_chunks, SharedBuffer};

    #[test]
    fn test_text_blocks() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());
        write_chunks(&mut formatter, &sample_chunks()).unwrap();

        let out = buffer.contents();
        assert!(out.contains("--- Chunk 0 ---"));
        assert!(out.contains("--- Chunk 1 ---"));
        assert!(out.contains("\"chapter\": \"PLAYING THE GAME\""));
        assert!(out.contains("\"page\": 1"));
        assert!(out.contains("\"page\": \"unknown\""));
        assert!(out.contains("\"source_file\": \"rules.pdf\""));
        assert!(out.contains("CONTENT:\nUmpires shall blow the whistle.\n"));
        assert!(out.trim_end().ends_with("Total Chunks: 2"));
    }

    #[test]
    fn test_metadata_omits_content() {
        let value = metadata(&sample_chunks()[1]);
        let map = value.as_object().unwrap();
        assert!(!map.contains_key("content"));
        assert!(!map.contains_key("source_file"));
        assert_eq!(map["heading"], "2.1");
    }
}
