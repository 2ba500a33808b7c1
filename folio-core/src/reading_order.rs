//! Reading-order reconstruction for one page of blocks
//!
//! Layout engines frequently return blocks column-major or in no particular
//! order. Blocks are sorted top-down and grouped into rows: a block joins the
//! open row when its vertical center falls inside the vertical extent of the
//! row's first block. Rows are then read left to right.
//!
//! The grouping needs every block of the page, so this must never be called
//! on a partial page.

use crate::block::Block;
use std::mem;

/// Group a page's blocks into rows, each row ordered left to right
pub fn group_rows(mut blocks: Vec<Block>) -> Vec<Vec<Block>> {
    // Stable, so blocks with equal tops keep reader order
    blocks.sort_by(|a, b| a.bbox.top.total_cmp(&b.bbox.top));

    let mut rows = Vec::new();
    let mut blocks = blocks.into_iter();
    let Some(first) = blocks.next() else {
        return rows;
    };

    let mut reference = first.bbox;
    let mut current = vec![first];

    for block in blocks {
        if reference.spans_y(block.bbox.center_y()) {
            current.push(block);
        } else {
            rows.push(close_row(mem::take(&mut current)));
            reference = block.bbox;
            current.push(block);
        }
    }
    rows.push(close_row(current));

    rows
}

/// Reorder a page's blocks into row-major reading order
pub fn reconstruct(blocks: Vec<Block>) -> Vec<Block> {
    group_rows(blocks).into_iter().flatten().collect()
}

fn close_row(mut row: Vec<Block>) -> Vec<Block> {
    row.sort_by(|a, b| a.bbox.left.total_cmp(&b.bbox.left));
    row
}
