//! Document-level orchestration for layout segmentation
//!
//! This crate loads layout shards (Document AI JSON or built in memory),
//! resolves block text through an injectable [`TextResolver`], and drives
//! the `folio-core` pipeline over whole documents in shard and page order.

#![warn(missing_docs)]

pub mod config;
pub mod docai;
pub mod document;
pub mod error;
pub mod input;
pub mod page_map;
pub mod processor;
pub mod resolver;

// Re-export key types
pub use config::{EngineConfig, DEFAULT_VARIANT};
pub use document::{LayoutBlock, LayoutDocument, Page, Shard, ShardBuilder, TextAnchor, TextSegment};
pub use error::{EngineError, Result};
pub use input::Input;
pub use page_map::PageMap;
pub use processor::{LayoutSegmenter, LayoutSegmenterBuilder, Output, ProcessingMetadata};
pub use resolver::{OffsetResolver, TextResolver};

// Re-export from core for convenience
pub use folio_core::{Chunk, PageNumber, Tag};
