use super::*;
use crate::block::Block;
use crate::classifier::Classifier;
use crate::geometry::BoundingBox;

fn token_on(text: &str, page: u32) -> ClassifiedToken {
    Classifier::new().classify_block(Block::new(BoundingBox::default(), text, page, 0))
}

fn token(text: &str) -> ClassifiedToken {
    token_on(text, 1)
}

/// Fold texts through `transition`, collecting drafts
fn run(texts: &[&str]) -> (SegmenterState, Vec<ChunkDraft>) {
    texts
        .iter()
        .fold((SegmenterState::new(), Vec::new()), |(state, mut drafts), text| {
            let (next, draft) = transition(state, &token(text));
            drafts.extend(draft);
            (next, drafts)
        })
}

fn segment(texts: &[&str]) -> Vec<Chunk> {
    let tokens: Vec<_> = texts.iter().map(|t| token(t)).collect();
    segment_tokens(&tokens, ChunkEmitter::new("test"))
}

const LONG_RULE_TEXT: &str = "This is the rule text, intentionally long enough.";

#[test]
fn test_initial_state() {
    let state = SegmenterState::new();
    assert_eq!(state.context.chapter, DEFAULT_CHAPTER);
    assert_eq!(state.context.section, DEFAULT_SECTION);
    assert_eq!(state.context.heading, DEFAULT_HEADING);
    assert!(state.buffer.is_empty());
    assert_eq!(state.mode, Mode::Collecting);
    assert_eq!(state.page, PageNumber::Unknown);
}

#[test]
fn test_body_accumulates_with_newlines() {
    let (state, drafts) = run(&["First line.", "Second line."]);
    assert!(drafts.is_empty());
    assert_eq!(state.buffer, "First line.\nSecond line.\n");
}

#[test]
fn test_short_headers_merge() {
    let chunks = segment(&["9.4", "9.5", "Body text of 9.5."]);

    assert_eq!(chunks.len(), 1);
    assert!(chunks[0].heading.ends_with("9.5"));
    assert!(chunks[0].content.contains("9.4 9.5 Body text of 9.5."));
}

#[test]
fn test_merged_header_adds_only_its_number_to_heading() {
    let (state, drafts) = run(&["1.1 Umpiring shall be fair"]);

    assert!(drafts.is_empty());
    // Trailing header text goes to the buffer, never to the heading
    assert_eq!(state.context.heading, "Front Matter 1.1");
    assert_eq!(state.buffer, "1.1 Umpiring shall be fair ");
}

#[test]
fn test_rule_header_flushes_long_buffer() {
    let (state, drafts) = run(&[
        "Rule 9.12 Penalty Stroke",
        "A penalty stroke is awarded.",
        "Rule 9.13 Procedures",
    ]);

    assert_eq!(drafts.len(), 1);
    assert!(drafts[0].context.heading.contains("9.12"));
    assert!(drafts[0].content.contains("A penalty stroke is awarded."));
    // Only the matched number becomes the heading; the rest seeds the buffer
    assert_eq!(state.context.heading, "Rule 9.13");
    assert_eq!(state.buffer, "Rule 9.13 Procedures ");
}

#[test]
fn test_rule_header_splitting() {
    let chunks = segment(&[
        "Rule 9.12 Penalty Stroke",
        "A penalty stroke is awarded.",
        "Rule 9.13 Procedures",
        "The ball is placed.",
    ]);

    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].heading.contains("9.12"));
    assert!(chunks[0].content.contains("A penalty stroke"));
    assert_eq!(chunks[1].heading, "Rule 9.13");
    assert_eq!(chunks[1].content, "Rule 9.13 Procedures The ball is placed.");
}

#[test]
fn test_buffer_threshold_is_exclusive() {
    // Exactly 20 characters in the buffer: still merged
    let (state, drafts) = run(&["Nineteen characters", "1.1"]);
    assert_eq!("Nineteen characters\n".chars().count(), RULE_MERGE_THRESHOLD);
    assert!(drafts.is_empty());
    assert_eq!(state.context.heading, "Front Matter 1.1");

    let (state, drafts) = run(&["Twenty characters ok", "1.1"]);
    assert_eq!(drafts.len(), 1);
    assert_eq!(state.context.heading, "1.1");
}

#[test]
fn test_number_resolves_to_section_title() {
    let long_body = "The objectives of the game are described in detail below";
    let (state, drafts) = run(&["1", "Objectives", long_body]);

    assert!(drafts.is_empty());
    assert_eq!(state.context.section, "1 Objectives");
    assert_eq!(state.mode, Mode::Collecting);
    // The title is consumed, only the following body is buffered
    assert_eq!(state.buffer, format!("{long_body}\n"));
}

#[test]
fn test_section_resolution_flushes_with_previous_context() {
    let (state, drafts) = run(&["Introductory paragraph text.", "2", "Definitions"]);

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].context.section, DEFAULT_SECTION);
    assert_eq!(drafts[0].content, "Introductory paragraph text.\n");
    assert_eq!(state.context.section, "2 Definitions");
    assert!(state.buffer.is_empty());
}

#[test]
fn test_number_falls_back_to_page_number() {
    let (state, drafts) = run(&["42", LONG_RULE_TEXT]);

    assert!(drafts.is_empty());
    assert_eq!(state.context.section, DEFAULT_SECTION);
    assert_eq!(state.buffer, format!("42\n{LONG_RULE_TEXT}\n"));
}

#[test]
fn test_short_sentence_is_content() {
    // A trailing period marks content even when the text is short
    let (state, _) = run(&["36", "Content B."]);
    assert_eq!(state.context.section, DEFAULT_SECTION);
    assert_eq!(state.buffer, "36\nContent B.\n");
}

#[test]
fn test_page_number_between_paragraphs() {
    let chunks = segment(&[
        "Rule 1.1 Start",
        "Content A.",
        "36",
        "Content B.",
        "Rule 1.2 Stop",
    ]);

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, "Rule 1.1 Start Content A.\n36\nContent B.");
    assert_eq!(chunks[1].heading, "Rule 1.2");
}

#[test]
fn test_pending_number_before_chapter() {
    let (state, drafts) = run(&["Some body text here.", "36", "UMPIRING"]);

    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].content, "Some body text here.\n36\n");
    assert_eq!(drafts[0].context.chapter, DEFAULT_CHAPTER);
    assert_eq!(state.context.chapter, "UMPIRING");
}

#[test]
fn test_pending_number_before_rule_header() {
    let (state, drafts) = run(&["Some body text here.", "36", "2.1"]);

    assert_eq!(drafts.len(), 1);
    assert!(drafts[0].content.ends_with("36\n"));
    assert_eq!(state.context.heading, "2.1");
    assert_eq!(state.buffer, "2.1 ");
}

#[test]
fn test_consecutive_numbers() {
    let (state, _) = run(&["36", "37"]);
    assert_eq!(state.buffer, "36\n");
    assert_eq!(state.pending(), Some("37"));

    let chunks = segment(&["36", "37"]);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "36\n37");
}

#[test]
fn test_chapter_and_section_flush() {
    let (state, drafts) = run(&[
        "Preface text.",
        "PLAYING THE GAME",
        "Chapter intro.",
        "1 Field of play",
    ]);

    assert_eq!(drafts.len(), 2);
    assert_eq!(drafts[0].context.chapter, DEFAULT_CHAPTER);
    assert_eq!(drafts[1].context.chapter, "PLAYING THE GAME");
    assert_eq!(drafts[1].context.section, DEFAULT_SECTION);
    assert_eq!(state.context.section, "1 Field of play");
    assert!(state.buffer.is_empty());
}

#[test]
fn test_headers_on_empty_buffer_emit_nothing() {
    let (state, drafts) = run(&["PLAYING THE GAME", "1 Field of play", "UMPIRING"]);
    assert!(drafts.is_empty());
    assert_eq!(state.context.chapter, "UMPIRING");
    assert_eq!(state.context.section, "1 Field of play");
}

#[test]
fn test_empty_token_is_ignored() {
    let state = SegmenterState {
        mode: Mode::AwaitingNumberResolution {
            pending: "7".to_string(),
        },
        ..SegmenterState::new()
    };
    let (next, draft) = transition(state.clone(), &token(""));
    assert!(draft.is_none());
    assert_eq!(next, state);
}

#[test]
fn test_page_recorded_at_flush_time() {
    let tokens = vec![
        token_on("Body text that starts on page one.", 1),
        token_on("More body text on page two.", 2),
        token_on("UMPIRING", 3),
        token_on("Closing text.", 3),
    ];
    let chunks = segment_tokens(&tokens, ChunkEmitter::new("test"));

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].page, PageNumber::Known(3));
    assert_eq!(chunks[1].page, PageNumber::Known(3));
}

#[test]
fn test_finish_keeps_pending_number() {
    let (state, _) = run(&["Last body line.", "48"]);
    let draft = finish(state).expect("buffer is not empty");
    assert_eq!(draft.content, "Last body line.\n48\n");
}

#[test]
fn test_finish_without_text() {
    assert!(finish(SegmenterState::new()).is_none());

    let mut segmenter = Segmenter::new(ChunkEmitter::new("test"));
    segmenter.begin_page(5);
    assert!(segmenter.finish().is_none());
}

#[test]
fn test_flush_without_page_is_unknown() {
    let mut state = SegmenterState {
        buffer: "orphan text".to_string(),
        ..SegmenterState::new()
    };
    let draft = state.flush().unwrap();
    assert_eq!(draft.page, PageNumber::Unknown);
    assert!(state.buffer.is_empty());
}

#[test]
fn test_segmenter_counts_emitted_chunks() {
    let mut segmenter = Segmenter::new(ChunkEmitter::new("outdoor"));
    assert!(segmenter.feed(&token("Preface text.")).is_none());

    let chunk = segmenter.feed(&token("UMPIRING")).expect("chapter flushes");
    assert_eq!(chunk.variant, "outdoor");
    assert_eq!(segmenter.emitted(), 1);
    assert_eq!(segmenter.state().context.chapter, "UMPIRING");
}

#[test]
fn test_looks_like_content() {
    assert!(looks_like_content("Ends with a period."));
    assert!(looks_like_content(&"x".repeat(41)));
    assert!(!looks_like_content(&"x".repeat(40)));
    assert!(!looks_like_content("Objectives"));
}
