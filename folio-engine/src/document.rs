//! Layout document model: shards of pages of positioned blocks
//!
//! Blocks do not carry their text; they carry a [`TextAnchor`] into the
//! owning shard's text, resolved by a [`TextResolver`](crate::TextResolver).

use folio_core::{BoundingBox, Vertex};
use std::iter;
use std::sync::OnceLock;

/// A half-open range of character offsets into a shard's text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextSegment {
    /// First character
    pub start: usize,
    /// One past the last character
    pub end: usize,
}

impl TextSegment {
    /// Create a segment
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Opaque reference to a block's text: one or more segments
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextAnchor {
    /// Segments, concatenated in order
    pub segments: Vec<TextSegment>,
}

impl TextAnchor {
    /// Anchor covering a single segment
    pub fn single(start: usize, end: usize) -> Self {
        Self {
            segments: vec![TextSegment::new(start, end)],
        }
    }
}

/// A block as delivered by the layout reader
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutBlock {
    /// Bounding polygon in normalized page coordinates (may be empty)
    pub polygon: Vec<Vertex>,
    /// Reference to the block's text
    pub anchor: TextAnchor,
}

impl LayoutBlock {
    /// Geometry derived from the polygon
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_vertices(&self.polygon)
    }
}

/// One page of blocks, in whatever order the layout reader produced
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Page number declared by the layout reader
    pub page_number: Option<u32>,
    /// Blocks on the page
    pub blocks: Vec<LayoutBlock>,
}

/// A run of pages processed as one OCR batch, with their shared text
#[derive(Debug, Clone, Default)]
pub struct Shard {
    text: String,
    pages: Vec<Page>,
    // Byte offset of every char plus the end; left empty for ASCII text
    char_index: OnceLock<Vec<usize>>,
}

impl Shard {
    /// Create a shard from its full text and pages
    pub fn new(text: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            text: text.into(),
            pages,
            char_index: OnceLock::new(),
        }
    }

    /// Start building a shard from literal block texts
    pub fn builder() -> ShardBuilder {
        ShardBuilder::default()
    }

    /// The shard's full text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The shard's pages
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of characters in the shard's text
    pub fn char_len(&self) -> usize {
        match self.char_index() {
            [] => self.text.len(),
            index => index.len() - 1,
        }
    }

    /// Slice the text by character offsets.
    ///
    /// Offsets past the end are clamped; an inverted range is empty.
    pub fn slice_chars(&self, start: usize, end: usize) -> &str {
        let (start, end) = (self.byte_offset(start), self.byte_offset(end));
        if start >= end {
            ""
        } else {
            &self.text[start..end]
        }
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        match self.char_index() {
            [] => char_offset.min(self.text.len()),
            index => index[char_offset.min(index.len() - 1)],
        }
    }

    fn char_index(&self) -> &[usize] {
        self.char_index.get_or_init(|| {
            if self.text.is_ascii() {
                Vec::new()
            } else {
                self.text
                    .char_indices()
                    .map(|(i, _)| i)
                    .chain(iter::once(self.text.len()))
                    .collect()
            }
        })
    }
}

/// A whole document: shards in input order
#[derive(Debug, Clone, Default)]
pub struct LayoutDocument {
    /// Shards in processing order
    pub shards: Vec<Shard>,
}

impl LayoutDocument {
    /// Create a document from ordered shards
    pub fn new(shards: Vec<Shard>) -> Self {
        Self { shards }
    }

    /// Total number of pages across shards
    pub fn page_count(&self) -> usize {
        self.shards.iter().map(|s| s.pages().len()).sum()
    }
}

impl From<Shard> for LayoutDocument {
    fn from(shard: Shard) -> Self {
        Self::new(vec![shard])
    }
}

impl FromIterator<Shard> for LayoutDocument {
    fn from_iter<I: IntoIterator<Item = Shard>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Assembles a shard from literal texts, recording anchors as it goes
#[derive(Debug, Default)]
pub struct ShardBuilder {
    text: String,
    chars: usize,
    pages: Vec<Page>,
}

impl ShardBuilder {
    /// Start a new page
    pub fn page(mut self, page_number: Option<u32>) -> Self {
        self.pages.push(Page {
            page_number,
            blocks: Vec::new(),
        });
        self
    }

    /// Add a block with a rectangular box
    pub fn block(self, text: &str, bbox: BoundingBox) -> Self {
        let polygon = vec![
            Vertex::new(bbox.left, bbox.top),
            Vertex::new(bbox.left, bbox.bottom),
        ];
        self.block_with_polygon(text, polygon)
    }

    /// Add a block without geometry
    pub fn block_without_geometry(self, text: &str) -> Self {
        self.block_with_polygon(text, Vec::new())
    }

    /// Add a block with an explicit polygon
    pub fn block_with_polygon(mut self, text: &str, polygon: Vec<Vertex>) -> Self {
        let start = self.chars;
        let end = start + text.chars().count();
        self.text.push_str(text);
        self.text.push('\n');
        self.chars = end + 1;

        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(LayoutBlock {
                polygon,
                anchor: TextAnchor::single(start, end),
            });
        }
        self
    }

    /// Finish the shard
    pub fn build(self) -> Shard {
        Shard::new(self.text, self.pages)
    }
}
