//! Configuration types for the engine

use crate::error::{EngineError, Result};
use crate::page_map::PageMap;
use folio_core::{ChunkEmitter, DEFAULT_SOURCE};

/// Variant tag used when the caller sets none
pub const DEFAULT_VARIANT: &str = "default";

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Ruleset/document tag stamped on every chunk
    pub variant: String,
    /// Ingestion label stamped on every chunk
    pub source: String,
    /// Name of the ingested file, if any
    pub source_file: Option<String>,
    /// Optional remapping of processed to original page numbers
    pub page_map: Option<PageMap>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            variant: DEFAULT_VARIANT.to_string(),
            source: DEFAULT_SOURCE.to_string(),
            source_file: None,
            page_map: None,
        }
    }
}

impl EngineConfig {
    /// Create a configuration for one variant
    pub fn new(variant: impl Into<String>) -> Self {
        Self {
            variant: variant.into(),
            ..Default::default()
        }
    }

    /// Check the configuration for values no chunk could carry
    pub fn validate(&self) -> Result<()> {
        if self.variant.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "variant must not be empty".to_string(),
            ));
        }
        if self.source.trim().is_empty() {
            return Err(EngineError::ConfigError(
                "source must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Emitter stamping this configuration's tags
    pub fn emitter(&self) -> ChunkEmitter {
        ChunkEmitter::new(self.variant.clone())
            .with_source(self.source.clone())
            .with_source_file(self.source_file.clone())
    }
}
