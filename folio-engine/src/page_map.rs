//! Remapping of processed page numbers to original page numbers
//!
//! When only selected pages of a source file are sent for layout analysis,
//! the layout reader numbers the filtered document from 1. A page map
//! restores the original numbering: entry `i` is the original number of
//! processed page `i + 1`.
//!
//! Entries are kept as inclusive runs, so `1-4000000000` costs one run
//! rather than one slot per page.

use crate::error::{EngineError, Result};
use folio_core::PageNumber;
use std::fmt;
use std::str::FromStr;

/// Inclusive run of original page numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageRun {
    start: u32,
    end: u32,
}

impl PageRun {
    fn len(self) -> u64 {
        u64::from(self.end - self.start) + 1
    }
}

/// Maps 1-based processed page numbers to original page numbers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMap {
    runs: Vec<PageRun>,
}

impl PageMap {
    /// Create a page map; every original page number must be positive
    pub fn new(pages: Vec<u32>) -> Result<Self> {
        let mut map = Self { runs: Vec::new() };
        for (pos, page) in pages.into_iter().enumerate() {
            if page == 0 {
                return Err(EngineError::InvalidPageMap {
                    reason: format!("entry {} is page 0; pages are numbered from 1", pos + 1),
                });
            }
            map.push_run(page, page);
        }
        map.check_not_empty()
    }

    /// Parse a comma-separated list of pages and inclusive ranges,
    /// e.g. `"3,4,7-9"`
    pub fn parse(spec: &str) -> Result<Self> {
        let mut map = Self { runs: Vec::new() };
        for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (start, end) = match part.split_once('-') {
                Some((start, end)) => (parse_page(start)?, parse_page(end)?),
                None => {
                    let page = parse_page(part)?;
                    (page, page)
                }
            };
            if start == 0 {
                return Err(EngineError::InvalidPageMap {
                    reason: format!("'{part}' includes page 0; pages are numbered from 1"),
                });
            }
            if start > end {
                return Err(EngineError::InvalidPageMap {
                    reason: format!("range {part} is descending"),
                });
            }
            map.push_run(start, end);
        }
        map.check_not_empty()
    }

    fn push_run(&mut self, start: u32, end: u32) {
        match self.runs.last_mut() {
            Some(last) if last.end.checked_add(1) == Some(start) => last.end = end,
            _ => self.runs.push(PageRun { start, end }),
        }
    }

    fn check_not_empty(self) -> Result<Self> {
        if self.runs.is_empty() {
            return Err(EngineError::InvalidPageMap {
                reason: "no pages given".to_string(),
            });
        }
        Ok(self)
    }

    /// Number of processed pages the map covers
    pub fn len(&self) -> u64 {
        self.runs.iter().map(|run| run.len()).sum()
    }

    /// Always false; an empty map is rejected on construction
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Original page numbers, in processed order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.runs.iter().flat_map(|run| run.start..=run.end)
    }

    /// Original number of a 1-based processed page, if the map covers it
    pub fn original(&self, processed: u32) -> Option<u32> {
        let mut index = u64::from(processed.checked_sub(1)?);
        for run in &self.runs {
            if index < run.len() {
                return u32::try_from(u64::from(run.start) + index).ok();
            }
            index -= run.len();
        }
        None
    }

    /// Map a processed page number, or `None` when the map does not cover it
    pub fn remap(&self, page: PageNumber) -> Option<PageNumber> {
        page.get()
            .and_then(|n| self.original(n))
            .map(PageNumber::Known)
    }

    /// Map a processed page number; pages outside the map are unchanged
    pub fn apply(&self, page: PageNumber) -> PageNumber {
        self.remap(page).unwrap_or(page)
    }
}

fn parse_page(text: &str) -> Result<u32> {
    text.trim()
        .parse()
        .map_err(|_| EngineError::InvalidPageMap {
            reason: format!("'{}' is not a page number", text.trim()),
        })
}

impl FromStr for PageMap {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PageMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, run) in self.runs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match run.len() {
                1 => write!(f, "{}", run.start)?,
                2 => write!(f, "{},{}", run.start, run.end)?,
                _ => write!(f, "{}-{}", run.start, run.end)?,
            }
        }
        Ok(())
    }
}
