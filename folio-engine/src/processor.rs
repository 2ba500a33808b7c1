//! Document segmenter and builder
//!
//! [`LayoutSegmenter`] drives the core pipeline over a whole document:
//! resolve block text, restore reading order per page, classify, and fold
//! every token through one fresh [`Segmenter`].

use crate::config::EngineConfig;
use crate::document::{LayoutDocument, Page, Shard};
use crate::error::Result;
use crate::input::Input;
use crate::page_map::PageMap;
use crate::resolver::{OffsetResolver, TextResolver};
use folio_core::{reading_order, Block, Chunk, Classifier, Segmenter};
use std::sync::Arc;
use std::time::Instant;

/// Segments layout documents into hierarchical chunks
///
/// All segmentation state is allocated per call, so one segmenter may be
/// shared across threads to process independent documents.
pub struct LayoutSegmenter {
    config: EngineConfig,
    classifier: Classifier,
    resolver: Arc<dyn TextResolver>,
}

/// Chunks with processing metadata
#[derive(Debug, Clone)]
pub struct Output {
    /// Chunks in emission order
    pub chunks: Vec<Chunk>,
    /// Processing counters
    pub metadata: ProcessingMetadata,
}

/// Processing metadata
#[derive(Debug, Clone, Default)]
pub struct ProcessingMetadata {
    /// Shards processed
    pub shards: usize,
    /// Pages processed
    pub pages: usize,
    /// Blocks with non-empty text
    pub blocks: usize,
    /// Blocks dropped because their text was empty
    pub skipped_blocks: usize,
    /// Chunks emitted
    pub chunks: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

impl std::fmt::Debug for LayoutSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutSegmenter")
            .field("config", &self.config)
            .field("classifier", &self.classifier)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSegmenter {
    /// Create a segmenter with default configuration
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            classifier: Classifier::new(),
            resolver: Arc::new(OffsetResolver),
        }
    }

    /// Create a segmenter with custom configuration
    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    /// Start building a segmenter
    pub fn builder() -> LayoutSegmenterBuilder {
        LayoutSegmenterBuilder::new()
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Segment one document
    pub fn segment(&self, doc: &LayoutDocument) -> Output {
        let start = Instant::now();
        let mut metadata = ProcessingMetadata {
            shards: doc.shards.len(),
            ..Default::default()
        };
        let mut segmenter = Segmenter::new(self.config.emitter());
        let mut chunks = Vec::new();

        for (shard_index, shard) in doc.shards.iter().enumerate() {
            for page in shard.pages() {
                metadata.pages += 1;
                let number = page
                    .page_number
                    .unwrap_or_else(|| u32::try_from(metadata.pages).unwrap_or(u32::MAX));
                segmenter.begin_page(number);

                let blocks = self.page_blocks(shard, shard_index, page, number, &mut metadata);
                for block in reading_order::reconstruct(blocks) {
                    let token = self.classifier.classify_block(block);
                    chunks.extend(segmenter.feed(&token));
                }
            }
        }
        chunks.extend(segmenter.finish());

        if let Some(page_map) = &self.config.page_map {
            remap_pages(&mut chunks, page_map);
        }

        metadata.chunks = chunks.len();
        metadata.processing_time_ms = start.elapsed().as_secs_f64() * 1000.0;
        log::info!(
            "segmented {} pages from {} shards into {} chunks ({:.1} ms)",
            metadata.pages,
            metadata.shards,
            metadata.chunks,
            metadata.processing_time_ms
        );

        Output { chunks, metadata }
    }

    /// Segment shards of one document, in order
    pub fn segment_shards(&self, shards: Vec<Shard>) -> Output {
        self.segment(&LayoutDocument::new(shards))
    }

    /// Load every input as a shard of one document and segment it
    pub fn process(&self, inputs: Vec<Input>) -> Result<Output> {
        let shards = inputs
            .into_iter()
            .map(Input::into_shard)
            .collect::<Result<Vec<_>>>()?;
        Ok(self.segment_shards(shards))
    }

    /// Segment independent documents, in parallel when available
    pub fn segment_many(&self, docs: &[LayoutDocument]) -> Vec<Output> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            docs.par_iter().map(|doc| self.segment(doc)).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            docs.iter().map(|doc| self.segment(doc)).collect()
        }
    }

    fn page_blocks(
        &self,
        shard: &Shard,
        shard_index: usize,
        page: &Page,
        number: u32,
        metadata: &mut ProcessingMetadata,
    ) -> Vec<Block> {
        let mut blocks = Vec::with_capacity(page.blocks.len());
        for layout_block in &page.blocks {
            let text = self.resolver.resolve(shard, &layout_block.anchor);
            let text = text.trim();
            if text.is_empty() {
                metadata.skipped_blocks += 1;
                continue;
            }
            blocks.push(Block::new(layout_block.bbox(), text, number, shard_index));
        }
        metadata.blocks += blocks.len();
        log::debug!(
            "page {number}: {} blocks, {} with text",
            page.blocks.len(),
            blocks.len()
        );
        blocks
    }
}

/// Suffix marking the source of a chunk whose page was remapped
const FILTERED_SUFFIX: &str = " (Filtered)";

fn remap_pages(chunks: &mut [Chunk], page_map: &PageMap) {
    for chunk in chunks {
        if let Some(page) = page_map.remap(chunk.page) {
            chunk.page = page;
            let origin = chunk.source_file.as_deref().unwrap_or(&chunk.source);
            chunk.source = format!("{origin}{FILTERED_SUFFIX}");
        }
    }
}

/// Builder for LayoutSegmenter
pub struct LayoutSegmenterBuilder {
    config: EngineConfig,
    resolver: Arc<dyn TextResolver>,
}

impl Default for LayoutSegmenterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutSegmenterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            resolver: Arc::new(OffsetResolver),
        }
    }

    /// Set the variant tag
    pub fn variant<S: Into<String>>(mut self, variant: S) -> Self {
        self.config.variant = variant.into();
        self
    }

    /// Set the source label
    pub fn source<S: Into<String>>(mut self, source: S) -> Self {
        self.config.source = source.into();
        self
    }

    /// Set the source file name
    pub fn source_file(mut self, source_file: Option<String>) -> Self {
        self.config.source_file = source_file;
        self
    }

    /// Set the page map
    pub fn page_map(mut self, page_map: Option<PageMap>) -> Self {
        self.config.page_map = page_map;
        self
    }

    /// Replace the text resolver
    pub fn resolver<R: TextResolver + 'static>(mut self, resolver: R) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Build the segmenter
    pub fn build(self) -> Result<LayoutSegmenter> {
        let mut segmenter = LayoutSegmenter::with_config(self.config)?;
        segmenter.resolver = self.resolver;
        Ok(segmenter)
    }
}
