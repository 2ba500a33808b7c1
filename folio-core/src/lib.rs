//! Layout-aware hierarchical segmentation of OCR output
//!
//! This crate turns the positioned text blocks of a paginated document into
//! bounded chunks tagged with chapter, section and rule-heading context.
//!
//! # Pipeline
//!
//! - [`reading_order`]: per page, row-major reading order from geometry
//! - [`classifier`]: tags each block as chapter, section, rule header,
//!   standalone number or body
//! - [`segmenter`]: a state machine folded over the whole document's token
//!   stream, closing chunks at structural boundaries
//! - [`emitter`]: trims chunk text and stamps caller tags
//!
//! Everything here is pure computation over materialized input and cannot
//! fail; malformed input degrades to coarser chunks.
//!
//! # Example
//!
//! ```rust
//! use folio_core::{reading_order, Block, BoundingBox, ChunkEmitter, Classifier, segment_tokens};
//!
//! let page = vec![
//!     Block::new(BoundingBox::new(0.30, 0.32, 0.10), "The field is rectangular.", 1, 0),
//!     Block::new(BoundingBox::new(0.20, 0.22, 0.10), "1.1", 1, 0),
//!     Block::new(BoundingBox::new(0.10, 0.12, 0.10), "PLAYING THE GAME", 1, 0),
//! ];
//!
//! let classifier = Classifier::new();
//! let tokens: Vec<_> = reading_order::reconstruct(page)
//!     .into_iter()
//!     .map(|block| classifier.classify_block(block))
//!     .collect();
//!
//! let chunks = segment_tokens(&tokens, ChunkEmitter::new("outdoor"));
//! assert_eq!(chunks.len(), 1);
//! assert_eq!(chunks[0].chapter, "PLAYING THE GAME");
//! assert_eq!(chunks[0].content, "1.1 The field is rectangular.");
//! ```

#![warn(missing_docs)]

pub mod block;
pub mod classifier;
pub mod emitter;
pub mod geometry;
pub mod reading_order;
pub mod segmenter;

pub use block::{Block, PageNumber};
pub use classifier::{ClassifiedToken, Classifier, Tag};
pub use emitter::{Chunk, ChunkDraft, ChunkEmitter, DEFAULT_SOURCE};
pub use geometry::{BoundingBox, Vertex};
pub use segmenter::{
    segment_tokens, transition, HeadingContext, Mode, Segmenter, SegmenterState,
};
