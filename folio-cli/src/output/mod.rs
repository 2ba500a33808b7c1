//! Output formatting module

use anyhow::Result;
use folio_core::Chunk;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Trait for output formatters
pub trait OutputFormatter: Send {
    /// Format and output a single chunk
    fn format_chunk(&mut self, chunk: &Chunk) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod jsonl;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use jsonl::JsonLinesFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Export-style blocks with metadata and content
    Text,
    /// JSON array of chunks
    Json,
    /// One JSON chunk per line
    Jsonl,
    /// Markdown with one heading per chunk
    Markdown,
}

impl OutputFormat {
    /// Create the formatter for this format
    pub fn formatter<W: Write + Send + 'static>(
        self,
        writer: W,
        pretty_json: bool,
    ) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer).pretty(pretty_json)),
            OutputFormat::Jsonl => Box::new(JsonLinesFormatter::new(writer)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s.trim(), true).map_err(|_| {
            format!("unknown output format '{s}' (expected text, json, jsonl or markdown)")
        })
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Markdown => "markdown",
        };
        f.write_str(name)
    }
}

/// Format every chunk, then finish
pub fn write_chunks(formatter: &mut dyn OutputFormatter, chunks: &[Chunk]) -> Result<()> {
    for chunk in chunks {
        formatter.format_chunk(chunk)?;
    }
    formatter.finish()
}

/// Shared writer handle for inspecting formatter output in tests
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample_chunks() -> Vec<Chunk> {
    use folio_core::PageNumber;

    vec![
        Chunk {
            content: "1.1 The field is rectangular.".to_string(),
            heading: "Front Matter 1.1".to_string(),
            chapter: "PLAYING THE GAME".to_string(),
            section: "1 Field of play".to_string(),
            page: PageNumber::Known(1),
            variant: "outdoor".to_string(),
            source: "PDF (DocAI-Layout)".to_string(),
            source_file: Some("rules.pdf".to_string()),
        },
        Chunk {
            content: "Umpires shall blow the whistle.".to_string(),
            heading: "2.1".to_string(),
            chapter: "UMPIRING".to_string(),
            section: "2 Applying the rules".to_string(),
            page: PageNumber::Unknown,
            variant: "outdoor".to_string(),
            source: "PDF (DocAI-Layout)".to_string(),
            source_file: None,
        },
    ]
}
