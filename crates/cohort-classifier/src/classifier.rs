//! Keyword-based response classification.
//!
//! An ordered keyword table scanned first-match-wins, plus a small
//! sentiment lexicon. Deliberately cheap: the trait seam exists so a
//! learned classifier can replace the keyword table without touching
//! orchestration or statistics.

use crate::types::{Category, ScenarioKind};

/// Maps one free-text answer to a category and computes sentiment.
///
/// Implementations must be total: always return a value, never fail.
pub trait ResponseClassifier: Send + Sync {
    /// Classify one answer into a category.
    fn classify(&self, text: &str, kind: ScenarioKind) -> Category;

    /// Sentiment score in [-1, 1]; exactly 0.0 when no lexicon word appears.
    fn sentiment(&self, text: &str) -> f64;
}

/// Keyword table in priority order. First category with a matching keyword
/// wins, so intensity markers ("strongly support") and purchase phrasing
/// ("would buy") sit above the weaker substrings they contain.
const KEYWORD_TABLE: &[(Category, &[&str])] = &[
    (
        Category::NoPurchase,
        &["wouldn't buy", "would not buy", "not interested", "too expensive", "pass"],
    ),
    (
        Category::PurchaseIntent,
        &["would buy", "buy", "purchase", "order", "interested"],
    ),
    (
        Category::StrongOppose,
        &["strongly oppose", "absolutely not", "never", "terrible"],
    ),
    (
        Category::StrongSupport,
        &["strongly support", "definitely", "absolutely", "enthusiastic"],
    ),
    (
        Category::Oppose,
        &["oppose", "disagree", "against", "dislike", "negative", "disapprove"],
    ),
    (
        Category::Support,
        &["support", "agree", "favor", "like", "positive", "approve"],
    ),
    (
        Category::Concerned,
        &["worried", "concerned", "anxious", "scared", "nervous"],
    ),
    (
        Category::Confident,
        &["confident", "optimistic", "hopeful", "secure"],
    ),
    (
        Category::Neutral,
        &["neutral", "unsure", "uncertain", "mixed", "depends", "maybe"],
    ),
];

// Bare "yes"/"no" are not keywords: substring matching would fire inside
// "know" and "not".

const POSITIVE_WORDS: &[&str] = &["good", "great", "excellent", "love", "like", "positive", "support"];
const NEGATIVE_WORDS: &[&str] = &["bad", "terrible", "hate", "dislike", "negative", "oppose", "worry"];

/// Ordered keyword matcher over the closed taxonomy.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    /// Create new keyword classifier
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fallback category when no keyword matches.
    #[inline]
    #[must_use]
    pub fn fallback(kind: ScenarioKind) -> Category {
        match kind {
            ScenarioKind::Product => Category::NoPurchase,
            ScenarioKind::Policy | ScenarioKind::Other => Category::Neutral,
        }
    }
}

impl ResponseClassifier for KeywordClassifier {
    fn classify(&self, text: &str, kind: ScenarioKind) -> Category {
        let lower = text.to_lowercase();

        for (category, keywords) in KEYWORD_TABLE {
            if keywords.iter().any(|kw| lower.contains(kw)) {
                return *category;
            }
        }

        Self::fallback(kind)
    }

    fn sentiment(&self, text: &str) -> f64 {
        let lower = text.to_lowercase();
        let mut positive = 0usize;
        let mut negative = 0usize;

        for word in lower.split_whitespace() {
            if POSITIVE_WORDS.contains(&word) {
                positive += 1;
            }
            if NEGATIVE_WORDS.contains(&word) {
                negative += 1;
            }
        }

        let total = positive + negative;
        if total == 0 {
            return 0.0;
        }

        (positive as f64 - negative as f64) / total as f64
    }
}
