//! Shard file loading

use anyhow::{Context, Result};
use folio_engine::{Input, Shard};
use std::path::Path;

/// Loads Document AI JSON shards from disk
pub struct FileReader;

impl FileReader {
    /// Read one shard file
    pub fn read_shard(path: &Path) -> Result<Shard> {
        let shard = Input::from_file(path)
            .into_shard()
            .with_context(|| format!("Failed to read shard: {}", path.display()))?;
        log::debug!(
            "{}: {} pages, {} chars of text",
            path.display(),
            shard.pages().len(),
            shard.char_len()
        );
        Ok(shard)
    }

    /// File name used to tag chunks from `path`
    pub fn source_name(path: &Path) -> Option<String> {
        Input::from_file(path).file_name()
    }
}
