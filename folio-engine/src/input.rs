//! Input abstraction for layout shards
//!
//! Shards may come from files, in-memory JSON, raw bytes or a stream, or be
//! built directly; all of them end up as a [`Shard`].

use crate::docai;
use crate::document::Shard;
use crate::error::{EngineError, Result};
use std::io::Read;
use std::path::PathBuf;

/// Unified shard source
pub enum Input {
    /// Document AI JSON text
    Json(String),
    /// Path to a Document AI JSON file
    File(PathBuf),
    /// Bytes holding UTF-8 Document AI JSON
    Bytes(Vec<u8>),
    /// Reader stream (stdin, network, etc.)
    Reader(Box<dyn Read + Send>),
    /// An already assembled shard
    Shard(Shard),
}

impl std::fmt::Debug for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::Json(json) => f
                .debug_tuple("Json")
                .field(&format!("<{} bytes>", json.len()))
                .finish(),
            Input::File(path) => f.debug_tuple("File").field(path).finish(),
            Input::Bytes(bytes) => f
                .debug_tuple("Bytes")
                .field(&format!("<{} bytes>", bytes.len()))
                .finish(),
            Input::Reader(_) => f.debug_tuple("Reader").field(&"<Reader>").finish(),
            Input::Shard(shard) => f
                .debug_tuple("Shard")
                .field(&format!("<{} pages>", shard.pages().len()))
                .finish(),
        }
    }
}

impl Input {
    /// Create input from JSON text
    pub fn from_json<S: Into<String>>(json: S) -> Self {
        Input::Json(json.into())
    }

    /// Create input from a file path
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Input::File(path.into())
    }

    /// Create input from bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }

    /// Create input from a reader
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Input::Reader(Box::new(reader))
    }

    /// Load the shard, decoding JSON as needed
    pub fn into_shard(self) -> Result<Shard> {
        match self {
            Input::Json(json) => docai::parse_shard(&json),
            Input::File(path) => docai::read_shard(&path),
            Input::Bytes(bytes) => {
                let json = String::from_utf8(bytes)
                    .map_err(|e| EngineError::EncodingError(format!("Invalid UTF-8: {e}")))?;
                docai::parse_shard(&json)
            }
            Input::Reader(mut reader) => {
                let mut buffer = Vec::new();
                reader.read_to_end(&mut buffer).map_err(|e| {
                    EngineError::IoError(format!("Failed to read from stream: {e}"))
                })?;
                let json = String::from_utf8(buffer).map_err(|e| {
                    EngineError::EncodingError(format!("Invalid UTF-8 from stream: {e}"))
                })?;
                docai::parse_shard(&json)
            }
            Input::Shard(shard) => Ok(shard),
        }
    }

    /// Name of the originating file, if any
    pub fn file_name(&self) -> Option<String> {
        match self {
            Input::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            _ => None,
        }
    }
}

impl From<PathBuf> for Input {
    fn from(path: PathBuf) -> Self {
        Input::File(path)
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<Shard> for Input {
    fn from(shard: Shard) -> Self {
        Input::Shard(shard)
    }
}
