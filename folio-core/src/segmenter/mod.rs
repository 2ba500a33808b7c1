//! Hierarchical segmentation state machine
//!
//! Segmentation is a left fold of [`transition`] over the classified token
//! stream of a whole document, in shard, page and reading order. State
//! carries across page and shard boundaries, so one document's stream must
//! be fed sequentially; independent documents each get their own state.

mod state;

#[cfg(test)]
mod tests;

pub use state::{
    HeadingContext, Mode, SegmenterState, DEFAULT_CHAPTER, DEFAULT_HEADING, DEFAULT_SECTION,
};

use crate::block::PageNumber;
use crate::classifier::{ClassifiedToken, Tag};
use crate::emitter::{Chunk, ChunkDraft, ChunkEmitter};

/// A rule header only closes the open chunk when the buffer holds more than
/// this many characters; shorter buffers are merged into the new heading.
pub const RULE_MERGE_THRESHOLD: usize = 20;

/// A token longer than this many characters looks like content, not a
/// section title.
pub const CONTENT_LENGTH_THRESHOLD: usize = 40;

/// Apply one token to the state.
///
/// Returns the next state and, when the token closes a chunk, its draft.
/// A token closes at most one chunk. Tokens with empty text leave the
/// state untouched.
pub fn transition(
    mut state: SegmenterState,
    token: &ClassifiedToken,
) -> (SegmenterState, Option<ChunkDraft>) {
    let text = token.text();
    if text.is_empty() {
        return (state, None);
    }
    state.page = PageNumber::Known(token.block.page);

    match std::mem::take(&mut state.mode) {
        Mode::Collecting => collect(state, token),
        Mode::AwaitingNumberResolution { pending } => {
            if !is_structural(&token.tag) && !looks_like_content(text) {
                // "1" followed by "Objectives": a section title split in two
                let draft = state.flush();
                state.context.section = format!("{pending} {text}");
                (state, draft)
            } else {
                // A page number, or nothing we can resolve: keep it as text
                state.buffer.push_str(&pending);
                state.buffer.push('\n');
                collect(state, token)
            }
        }
    }
}

/// Close the stream: a still-pending number is kept as text, then the open
/// buffer is flushed.
pub fn finish(mut state: SegmenterState) -> Option<ChunkDraft> {
    if let Mode::AwaitingNumberResolution { pending } = std::mem::take(&mut state.mode) {
        state.buffer.push_str(&pending);
        state.buffer.push('\n');
    }
    state.flush()
}

fn collect(
    mut state: SegmenterState,
    token: &ClassifiedToken,
) -> (SegmenterState, Option<ChunkDraft>) {
    let text = token.text();

    match &token.tag {
        Tag::Chapter => {
            let draft = state.flush();
            state.context.chapter = text.to_string();
            (state, draft)
        }
        Tag::Section => {
            let draft = state.flush();
            state.context.section = text.to_string();
            (state, draft)
        }
        Tag::RuleHeader(number) => {
            if state.buffer_len() > RULE_MERGE_THRESHOLD {
                let draft = state.flush();
                state.context.heading = number.clone();
                state.buffer = format!("{text} ");
                (state, draft)
            } else {
                // Lonely header: merge it with the previous one. Only the
                // number joins the heading; the full text, trailing words
                // included, is seeded into the buffer like a fresh chunk.
                state.context.heading.push(' ');
                state.context.heading.push_str(number);
                state.buffer.push_str(text);
                state.buffer.push(' ');
                (state, None)
            }
        }
        Tag::StandaloneNumber => {
            state.mode = Mode::AwaitingNumberResolution {
                pending: text.to_string(),
            };
            (state, None)
        }
        Tag::Body => {
            state.buffer.push_str(text);
            state.buffer.push('\n');
            (state, None)
        }
    }
}

/// Tags that can never be the title half of a split section heading
fn is_structural(tag: &Tag) -> bool {
    matches!(
        tag,
        Tag::Chapter | Tag::RuleHeader(_) | Tag::StandaloneNumber
    )
}

/// Long text, or text ending in a period, reads as content
pub fn looks_like_content(text: &str) -> bool {
    text.chars().count() > CONTENT_LENGTH_THRESHOLD || text.ends_with('.')
}

/// Stateful driver around [`transition`] that finalizes chunks
#[derive(Debug)]
pub struct Segmenter {
    state: SegmenterState,
    emitter: ChunkEmitter,
    emitted: usize,
}

impl Segmenter {
    /// Create a segmenter that stamps chunks with the emitter's tags
    pub fn new(emitter: ChunkEmitter) -> Self {
        Self {
            state: SegmenterState::new(),
            emitter,
            emitted: 0,
        }
    }

    /// Current state
    pub fn state(&self) -> &SegmenterState {
        &self.state
    }

    /// Number of chunks emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Record that a new page is being processed.
    ///
    /// Pages without any text still count as processed for the final flush.
    pub fn begin_page(&mut self, page: u32) {
        self.state.page = PageNumber::Known(page);
    }

    /// Feed one token, returning the chunk it closed, if any
    pub fn feed(&mut self, token: &ClassifiedToken) -> Option<Chunk> {
        let state = std::mem::take(&mut self.state);
        let (next, draft) = transition(state, token);
        self.state = next;

        log::trace!("{} token {:?} -> {:?}", token.tag, token.text(), self.state.mode);
        draft.map(|draft| self.emit(draft))
    }

    /// Finish the stream, returning the last chunk, if any
    pub fn finish(mut self) -> Option<Chunk> {
        let state = std::mem::take(&mut self.state);
        finish(state).map(|draft| self.emit(draft))
    }

    fn emit(&mut self, draft: ChunkDraft) -> Chunk {
        self.emitted += 1;
        let chunk = self.emitter.emit(draft);
        log::debug!(
            "chunk {} closed on page {} under {:?} / {:?} / {:?}",
            self.emitted,
            chunk.page,
            chunk.chapter,
            chunk.section,
            chunk.heading
        );
        chunk
    }
}

/// Segment an already ordered and classified token stream
pub fn segment_tokens<'a, I>(tokens: I, emitter: ChunkEmitter) -> Vec<Chunk>
where
    I: IntoIterator<Item = &'a ClassifiedToken>,
{
    let mut segmenter = Segmenter::new(emitter);
    let mut chunks: Vec<Chunk> = tokens
        .into_iter()
        .filter_map(|token| segmenter.feed(token))
        .collect();
    chunks.extend(segmenter.finish());
    chunks
}
