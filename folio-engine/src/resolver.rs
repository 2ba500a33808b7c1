//! Text resolution for block anchors

use crate::document::{Shard, TextAnchor};

/// Turns a block's text reference into its literal text
///
/// Implementations must not panic on malformed anchors.
pub trait TextResolver: Send + Sync {
    /// Resolve an anchor against its shard
    fn resolve(&self, shard: &Shard, anchor: &TextAnchor) -> String;
}

/// Resolves anchors as character offsets into the shard text
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetResolver;

impl TextResolver for OffsetResolver {
    fn resolve(&self, shard: &Shard, anchor: &TextAnchor) -> String {
        anchor
            .segments
            .iter()
            .map(|segment| shard.slice_chars(segment.start, segment.end))
            .collect()
    }
}

impl<F> TextResolver for F
where
    F: Fn(&Shard, &TextAnchor) -> String + Send + Sync,
{
    fn resolve(&self, shard: &Shard, anchor: &TextAnchor) -> String {
        self(shard, anchor)
    }
}
