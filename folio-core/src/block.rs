//! Positioned text units produced by the layout reader

use crate::geometry::BoundingBox;
use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One OCR-detected text region with its resolved text
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Page-relative geometry
    pub bbox: BoundingBox,
    /// Resolved text (may be empty)
    pub text: String,
    /// Page the block was read from
    pub page: u32,
    /// Index of the shard the page belongs to
    pub shard: usize,
}

impl Block {
    /// Create a block
    pub fn new(bbox: BoundingBox, text: impl Into<String>, page: u32, shard: usize) -> Self {
        Self {
            bbox,
            text: text.into(),
            page,
            shard,
        }
    }
}

/// Page number attached to a chunk
///
/// Serializes as a plain integer, or as the string `"unknown"` when no page
/// was ever processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageNumber {
    /// A real page number
    Known(u32),
    /// No page was processed
    #[default]
    Unknown,
}

impl PageNumber {
    /// The numeric page, if known
    pub fn get(self) -> Option<u32> {
        match self {
            PageNumber::Known(n) => Some(n),
            PageNumber::Unknown => None,
        }
    }
}

impl From<u32> for PageNumber {
    fn from(page: u32) -> Self {
        PageNumber::Known(page)
    }
}

impl fmt::Display for PageNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageNumber::Known(n) => write!(f, "{n}"),
            PageNumber::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for PageNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageNumber::Known(n) => serializer.serialize_u32(*n),
            PageNumber::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

impl<'de> Deserialize<'de> for PageNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u32),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(PageNumber::Known(n)),
            Repr::Text(text) if text == "unknown" => Ok(PageNumber::Unknown),
            Repr::Text(other) => Err(de::Error::invalid_value(
                Unexpected::Str(&other),
                &"a page number or \"unknown\"",
            )),
        }
    }
}
