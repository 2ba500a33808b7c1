//! Document AI layout JSON
//!
//! Reads the JSON shards written by a Document AI batch job (one
//! `Document` per file). Only the fields segmentation needs are decoded;
//! everything else is ignored. Int64 fields arrive as JSON strings in the
//! proto3 mapping, so indices accept both strings and numbers.

use crate::document::{LayoutBlock, Page, Shard, TextAnchor, TextSegment};
use crate::error::{EngineError, Result};
use folio_core::Vertex;
use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct DocumentJson {
    text: String,
    pages: Vec<PageJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct PageJson {
    #[serde(alias = "page_number", deserialize_with = "optional_index")]
    page_number: Option<u64>,
    blocks: Vec<BlockJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BlockJson {
    layout: LayoutJson,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LayoutJson {
    #[serde(alias = "text_anchor")]
    text_anchor: TextAnchorJson,
    #[serde(alias = "bounding_poly")]
    bounding_poly: BoundingPolyJson,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TextAnchorJson {
    #[serde(alias = "text_segments")]
    text_segments: Vec<TextSegmentJson>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct TextSegmentJson {
    #[serde(alias = "start_index", deserialize_with = "index")]
    start_index: u64,
    #[serde(alias = "end_index", deserialize_with = "index")]
    end_index: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BoundingPolyJson {
    #[serde(alias = "normalized_vertices")]
    normalized_vertices: Vec<Vertex>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IndexRepr {
    Number(u64),
    Text(String),
}

fn index<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    match IndexRepr::deserialize(deserializer)? {
        IndexRepr::Number(n) => Ok(n),
        IndexRepr::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::invalid_value(Unexpected::Str(&s), &"a non-negative integer")),
    }
}

fn optional_index<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<u64>, D::Error> {
    index(deserializer).map(Some)
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

impl From<DocumentJson> for Shard {
    fn from(doc: DocumentJson) -> Self {
        let pages = doc
            .pages
            .into_iter()
            .map(|page| Page {
                page_number: page
                    .page_number
                    .filter(|&n| n > 0)
                    .and_then(|n| u32::try_from(n).ok()),
                blocks: page
                    .blocks
                    .into_iter()
                    .map(|block| LayoutBlock {
                        polygon: block.layout.bounding_poly.normalized_vertices,
                        anchor: TextAnchor {
                            segments: block
                                .layout
                                .text_anchor
                                .text_segments
                                .into_iter()
                                .map(|s| {
                                    TextSegment::new(to_usize(s.start_index), to_usize(s.end_index))
                                })
                                .collect(),
                        },
                    })
                    .collect(),
            })
            .collect();
        Shard::new(doc.text, pages)
    }
}

/// Parse one shard from a JSON string
pub fn parse_shard(json: &str) -> Result<Shard> {
    let doc: DocumentJson = serde_json::from_str(json)?;
    Ok(doc.into())
}

/// Read one shard from any reader
pub fn from_reader<R: Read>(reader: R) -> Result<Shard> {
    let doc: DocumentJson = serde_json::from_reader(reader)?;
    Ok(doc.into())
}

/// Read one shard from a JSON file
pub fn read_shard<P: AsRef<Path>>(path: P) -> Result<Shard> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| EngineError::IoError(format!("Failed to open {}: {e}", path.display())))?;
    from_reader(BufReader::new(file)).map_err(|e| match e {
        EngineError::InvalidDocument(msg) => {
            EngineError::InvalidDocument(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}
