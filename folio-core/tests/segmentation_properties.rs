//! Behavioral properties of the segmentation pipeline

use folio_core::{
    reading_order, segment_tokens, Block, BoundingBox, Chunk, ChunkEmitter, ClassifiedToken,
    Classifier, PageNumber, Segmenter, Tag,
};
use proptest::prelude::*;

fn tokens_on_page(texts: &[&str], page: u32) -> Vec<ClassifiedToken> {
    let classifier = Classifier::new();
    texts
        .iter()
        .map(|text| classifier.classify_block(Block::new(BoundingBox::default(), *text, page, 0)))
        .collect()
}

fn segment(texts: &[String]) -> Vec<Chunk> {
    let texts: Vec<&str> = texts.iter().map(String::as_str).collect();
    segment_tokens(&tokens_on_page(&texts, 1), ChunkEmitter::new("test"))
}

#[test]
fn test_two_page_hierarchy() {
    let mut tokens = tokens_on_page(
        &["PLAYING THE GAME", "1 Field of play", "1.1", "The field is rectangular."],
        1,
    );
    tokens.extend(tokens_on_page(
        &["UMPIRING", "2 Applying the rules", "2.1", "Umpires shall blow the whistle."],
        2,
    ));

    let chunks = segment_tokens(&tokens, ChunkEmitter::new("outdoor"));

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].chapter, "PLAYING THE GAME");
    assert_eq!(chunks[0].section, "1 Field of play");
    assert!(chunks[0].heading.contains("1.1"));
    assert_eq!(chunks[0].page, PageNumber::Known(2));
    assert_eq!(chunks[1].chapter, "UMPIRING");
    assert_eq!(chunks[1].section, "2 Applying the rules");
    assert!(chunks[1].heading.contains("2.1"));
    assert_eq!(chunks[1].content, "2.1 Umpires shall blow the whistle.");
}

#[test]
fn test_section_number_carries_across_pages() {
    // The number ends page 3, its title starts page 4
    let mut tokens = tokens_on_page(&["Closing paragraph of the section.", "3"], 3);
    tokens.extend(tokens_on_page(&["Players", "Each team has eleven players on the field."], 4));

    let mut segmenter = Segmenter::new(ChunkEmitter::new("outdoor"));
    let mut chunks: Vec<Chunk> = tokens.iter().filter_map(|t| segmenter.feed(t)).collect();
    assert_eq!(segmenter.state().context.section, "3 Players");
    chunks.extend(segmenter.finish());

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content, "Closing paragraph of the section.");
    assert_eq!(chunks[0].page, PageNumber::Known(4));
    assert_eq!(chunks[1].section, "3 Players");
}

#[test]
fn test_no_headers_single_front_matter_chunk() {
    let chunks = segment(&[
        "Just some text.".to_string(),
        "And some more text.".to_string(),
    ]);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].heading, "Front Matter");
    assert_eq!(chunks[0].chapter, "General");
    assert_eq!(chunks[0].content, "Just some text.\nAnd some more text.");
}

#[test]
fn test_reading_order_feeds_segmenter() {
    // The rule number sits a little lower than its paragraph, to its left
    let page = vec![
        Block::new(BoundingBox::new(0.30, 0.36, 0.12), "Teams consist of eleven players.", 1, 0),
        Block::new(BoundingBox::new(0.31, 0.33, 0.05), "3.1", 1, 0),
        Block::new(BoundingBox::new(0.10, 0.12, 0.05), "PLAYERS", 1, 0),
    ];
    let classifier = Classifier::new();
    let tokens: Vec<_> = reading_order::reconstruct(page)
        .into_iter()
        .map(|b| classifier.classify_block(b))
        .collect();

    assert_eq!(tokens[0].tag, Tag::Chapter);
    assert_eq!(tokens[1].tag, Tag::RuleHeader("3.1".to_string()));

    let chunks = segment_tokens(&tokens, ChunkEmitter::new("outdoor"));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, "3.1 Teams consist of eleven players.");
}

fn token_text() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => (0u32..1000).prop_map(|i| format!("Body {i} ends here.")),
        1 => prop::sample::select(vec!["PLAYING THE GAME", "UMPIRING", "DEFINITIONS"])
            .prop_map(str::to_string),
        1 => prop::sample::select(vec!["1 Field of play", "2 Applying the rules"])
            .prop_map(str::to_string),
        2 => prop::sample::select(vec!["9.4", "9.5", "1.1 Short rule", "Rule 4"])
            .prop_map(str::to_string),
        1 => prop::sample::select(vec!["36", "1"]).prop_map(str::to_string),
        1 => Just(String::new()),
    ]
}

proptest! {
    #[test]
    fn prop_segmentation_is_deterministic(texts in prop::collection::vec(token_text(), 0..40)) {
        prop_assert_eq!(segment(&texts), segment(&texts));
    }

    #[test]
    fn prop_body_text_is_conserved(texts in prop::collection::vec(token_text(), 0..40)) {
        let chunks = segment(&texts);
        let joined: String = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        for text in texts.iter().filter(|t| t.starts_with("Body ")) {
            let expected = texts.iter().filter(|t| *t == text).count();
            prop_assert_eq!(joined.matches(text.as_str()).count(), expected);
        }
    }

    #[test]
    fn prop_chunks_are_never_empty(texts in prop::collection::vec(token_text(), 0..40)) {
        for chunk in segment(&texts) {
            prop_assert!(!chunk.content.is_empty());
            prop_assert_eq!(chunk.content.trim(), chunk.content.as_str());
        }
    }

    #[test]
    fn prop_structural_headers_force_flush(texts in prop::collection::vec(token_text(), 0..40)) {
        let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let tokens = tokens_on_page(&text_refs, 1);
        let mut segmenter = Segmenter::new(ChunkEmitter::new("test"));

        for token in &tokens {
            let collecting = segmenter.state().pending().is_none();
            let has_text = !segmenter.state().buffer.trim().is_empty();
            let before = segmenter.emitted();
            segmenter.feed(token);

            if collecting && matches!(token.tag, Tag::Chapter | Tag::Section) {
                prop_assert_eq!(segmenter.emitted() - before, usize::from(has_text));
            }
        }
    }
}
