//! Heuristic tagging of block text
//!
//! The classifier is an ordered list of rules; the first rule that matches
//! decides the tag. Order matters: a short all-caps phrase is a chapter
//! even though nothing else would reject it, and a bare number must not be
//! read as a rule header.

use crate::block::Block;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Structural role of one block of text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// All-caps chapter title, e.g. "PLAYING THE GAME"
    Chapter,
    /// Numbered section title, e.g. "1 Field of play"
    Section,
    /// Numbered rule heading; carries the matched number, e.g. "9.12"
    RuleHeader(String),
    /// Digits only: a section number or a page number, undecided
    StandaloneNumber,
    /// Anything else
    Body,
}

impl Tag {
    /// Short lowercase name of the tag
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Chapter => "chapter",
            Tag::Section => "section",
            Tag::RuleHeader(_) => "rule-header",
            Tag::StandaloneNumber => "number",
            Tag::Body => "body",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::RuleHeader(number) => write!(f, "rule-header({number})"),
            other => f.write_str(other.name()),
        }
    }
}

/// A block together with its tag
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedToken {
    /// The classified block
    pub block: Block,
    /// Its structural role
    pub tag: Tag,
}

impl ClassifiedToken {
    /// Pair a block with a tag
    pub fn new(block: Block, tag: Tag) -> Self {
        Self { block, tag }
    }

    /// The block's text
    pub fn text(&self) -> &str {
        &self.block.text
    }
}

type Matcher = Box<dyn Fn(&str) -> Option<Tag> + Send + Sync>;

/// A named classification rule
struct Rule {
    name: &'static str,
    matcher: Matcher,
}

/// Ordered, first-match-wins text classifier
pub struct Classifier {
    rules: Vec<Rule>,
}

/// Minimum length, in characters, of an all-caps chapter title
pub const MIN_CHAPTER_LEN: usize = 4;

fn section_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[0-9]+\s+[A-Za-z]").expect("section pattern is valid")
    })
}

fn rule_header_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // "9.12", "1.1.1", "Rule 4.2", "Rule 7". Anchored at the start only, so
    // text following the number on the same block is kept as content.
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(?:(?:rule\s+)?(?:1[0-9]|[1-9])(?:\.[0-9]+)+|rule\s+[0-9]+)")
            .expect("rule header pattern is valid")
    })
}

fn is_chapter(text: &str) -> bool {
    text.chars().count() >= MIN_CHAPTER_LEN
        && text
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_whitespace())
}

fn is_standalone_number(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// The leading rule number of `text`, if it starts with one
pub fn rule_number(text: &str) -> Option<&str> {
    rule_header_pattern().find(text).map(|m| m.as_str())
}

impl Classifier {
    /// Create the classifier with the standard rule order
    pub fn new() -> Self {
        let rules = vec![
            Rule {
                name: "chapter",
                matcher: Box::new(|text| is_chapter(text).then_some(Tag::Chapter)),
            },
            Rule {
                name: "section",
                matcher: Box::new(|text| section_pattern().is_match(text).then_some(Tag::Section)),
            },
            Rule {
                name: "rule-header",
                matcher: Box::new(|text| rule_number(text).map(|n| Tag::RuleHeader(n.to_string()))),
            },
            Rule {
                name: "number",
                matcher: Box::new(|text| {
                    is_standalone_number(text).then_some(Tag::StandaloneNumber)
                }),
            },
        ];

        Self { rules }
    }

    /// Classify one block's trimmed text
    pub fn classify(&self, text: &str) -> Tag {
        self.rules
            .iter()
            .find_map(|rule| (rule.matcher)(text))
            .unwrap_or(Tag::Body)
    }

    /// Classify a block by its text
    pub fn classify_block(&self, block: Block) -> ClassifiedToken {
        let tag = self.classify(&block.text);
        ClassifiedToken::new(block, tag)
    }

    /// Rule names in evaluation order, without the body fallback
    pub fn rule_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.name)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classifier")
            .field("rules", &self.rule_names().collect::<Vec<_>>())
            .finish()
    }
}
