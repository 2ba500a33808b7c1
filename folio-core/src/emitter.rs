//! Chunk finalization
//!
//! The emitter makes no decisions: it trims the buffered text, copies the
//! context captured at flush time and stamps the caller's tags.

use crate::block::PageNumber;
use crate::segmenter::HeadingContext;
use serde::{Deserialize, Serialize};

/// Source label attached to chunks when the caller sets none
pub const DEFAULT_SOURCE: &str = "PDF (DocAI-Layout)";

/// An untrimmed chunk as captured by the segmenter at flush time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkDraft {
    /// Raw buffer contents
    pub content: String,
    /// Context in effect when the chunk was closed
    pub context: HeadingContext,
    /// Page being processed when the chunk was closed
    pub page: PageNumber,
}

/// One segmented unit of output text with its hierarchical metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Trimmed text
    pub content: String,
    /// Rule heading
    pub heading: String,
    /// Chapter title
    pub chapter: String,
    /// Section title
    pub section: String,
    /// Page number, or "unknown"
    pub page: PageNumber,
    /// Caller-supplied ruleset/document tag
    pub variant: String,
    /// Ingestion label
    pub source: String,
    /// Name of the ingested file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
}

/// Turns drafts into chunks carrying the caller's tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkEmitter {
    variant: String,
    source: String,
    source_file: Option<String>,
}

impl ChunkEmitter {
    /// Create an emitter for one variant
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            source: DEFAULT_SOURCE.to_string(),
            source_file: None,
        }
    }

    /// Override the source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Attach the ingested file name
    pub fn with_source_file(mut self, source_file: Option<String>) -> Self {
        self.source_file = source_file;
        self
    }

    /// The variant tag
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Finalize a draft
    pub fn emit(&self, draft: ChunkDraft) -> Chunk {
        let ChunkDraft {
            content,
            context,
            page,
        } = draft;

        Chunk {
            content: content.trim().to_string(),
            heading: context.heading,
            chapter: context.chapter,
            section: context.section,
            page,
            variant: self.variant.clone(),
            source: self.source.clone(),
            source_file: self.source_file.clone(),
        }
    }
}
