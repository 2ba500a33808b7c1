//! Segmenter state threaded through the transition function

use crate::block::PageNumber;
use crate::emitter::ChunkDraft;

/// Chapter used until the first chapter title is seen
pub const DEFAULT_CHAPTER: &str = "General";
/// Section used until the first section title is seen
pub const DEFAULT_SECTION: &str = "General";
/// Heading used until the first rule header is seen
pub const DEFAULT_HEADING: &str = "Front Matter";

/// Hierarchical context stamped on every chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingContext {
    /// Current chapter title
    pub chapter: String,
    /// Current section title
    pub section: String,
    /// Current rule heading
    pub heading: String,
}

impl Default for HeadingContext {
    fn default() -> Self {
        Self {
            chapter: DEFAULT_CHAPTER.to_string(),
            section: DEFAULT_SECTION.to_string(),
            heading: DEFAULT_HEADING.to_string(),
        }
    }
}

/// Whether a standalone number is waiting for the next token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// Normal accumulation
    #[default]
    Collecting,
    /// A bare number was seen; the next token decides whether it starts a
    /// section title or was a page number
    AwaitingNumberResolution {
        /// The buffered number
        pending: String,
    },
}

/// Complete segmentation state for one document
///
/// One instance lives for exactly one segmentation run; it carries across
/// shard and page boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmenterState {
    /// Chapter, section and heading in effect
    pub context: HeadingContext,
    /// Body text of the open chunk
    pub buffer: String,
    /// Lookahead mode
    pub mode: Mode,
    /// Page currently being processed
    pub page: PageNumber,
}

impl SegmenterState {
    /// Fresh state with default headings and an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// The pending standalone number, if any
    pub fn pending(&self) -> Option<&str> {
        match &self.mode {
            Mode::Collecting => None,
            Mode::AwaitingNumberResolution { pending } => Some(pending),
        }
    }

    /// Length of the open buffer in characters
    pub fn buffer_len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Close the open chunk.
    ///
    /// Returns `None` when the buffer holds no text; the buffer is emptied
    /// either way. The draft carries the context in effect *before* the
    /// caller applies any header update.
    pub fn flush(&mut self) -> Option<ChunkDraft> {
        let content = std::mem::take(&mut self.buffer);
        if content.trim().is_empty() {
            return None;
        }

        Some(ChunkDraft {
            content,
            context: self.context.clone(),
            page: self.page,
        })
    }
}
