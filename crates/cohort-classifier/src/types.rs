//! Response taxonomy types.
//!
//! Defines the closed category set answers are classified into, the
//! scenario kinds that pick the fallback category, and the classified
//! answer record the analyzer consumes.

use cohort_persona::PersonaAnswer;
use serde::{Deserialize, Serialize};

/// Kind of scenario being simulated.
///
/// Selects the fallback category when no keyword matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Policy / political support question
    Policy,
    /// Purchase-intent question
    Product,
    /// Anything else
    Other,
}

/// Closed taxonomy of response categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Supports the proposal
    Support,
    /// Emphatic support
    StrongSupport,
    /// Opposes the proposal
    Oppose,
    /// Emphatic opposition
    StrongOppose,
    /// No clear lean either way
    Neutral,
    /// Would buy the product
    PurchaseIntent,
    /// Would not buy the product
    NoPurchase,
    /// Expresses worry
    Concerned,
    /// Expresses confidence
    Confident,
}

impl Category {
    /// Stable string form, matching the serde representation.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Support => "support",
            Self::StrongSupport => "strong_support",
            Self::Oppose => "oppose",
            Self::StrongOppose => "strong_oppose",
            Self::Neutral => "neutral",
            Self::PurchaseIntent => "purchase_intent",
            Self::NoPurchase => "no_purchase",
            Self::Concerned => "concerned",
            Self::Confident => "confident",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persona answer with its assigned category and sentiment.
///
/// One-to-one with [`PersonaAnswer`]; sentiment is bounded to [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedAnswer {
    /// The underlying raw answer
    pub answer: PersonaAnswer,
    /// Assigned category
    pub category: Category,
    /// Sentiment score in [-1, 1]
    pub sentiment: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serde_matches_as_str() {
        let json = serde_json::to_string(&Category::StrongSupport).unwrap();
        assert_eq!(json, "\"strong_support\"");
        assert_eq!(Category::StrongSupport.as_str(), "strong_support");
    }

    #[test]
    fn scenario_kind_round_trips() {
        let kind: ScenarioKind = serde_json::from_str("\"product\"").unwrap();
        assert_eq!(kind, ScenarioKind::Product);
    }
}
