//! Page-relative geometry for layout blocks

use serde::{Deserialize, Serialize};

/// A polygon vertex in normalized page coordinates (0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    /// Horizontal position, 0.0 is the left page edge
    #[serde(default)]
    pub x: f64,
    /// Vertical position, 0.0 is the top page edge
    #[serde(default)]
    pub y: f64,
}

impl Vertex {
    /// Create a vertex
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Vertical extent and left edge of a block
///
/// Only the three coordinates the reading-order pass needs are kept.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest y of the polygon
    pub top: f64,
    /// Largest y of the polygon
    pub bottom: f64,
    /// Smallest x of the polygon
    pub left: f64,
}

impl BoundingBox {
    /// Create a bounding box from explicit coordinates
    pub fn new(top: f64, bottom: f64, left: f64) -> Self {
        Self { top, bottom, left }
    }

    /// Derive the box from polygon vertices.
    ///
    /// Missing geometry (no vertices, or no finite coordinates) yields the
    /// origin box so the block sorts first on its page.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut ys = vertices.iter().map(|v| v.y).filter(|y| y.is_finite());
        let mut xs = vertices.iter().map(|v| v.x).filter(|x| x.is_finite());

        let (top, bottom) = match ys.next() {
            Some(first) => ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))),
            None => (0.0, 0.0),
        };
        let left = xs.next().map_or(0.0, |first| xs.fold(first, f64::min));

        Self { top, bottom, left }
    }

    /// Vertical midpoint
    pub fn center_y(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }

    /// Whether `y` lies within `[top, bottom]`
    pub fn spans_y(&self, y: f64) -> bool {
        self.top <= y && y <= self.bottom
    }
}
