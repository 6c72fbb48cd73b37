//! Cohort Classifier - response taxonomy and keyword classification
//!
//! Maps free-text persona answers onto a closed category set and scores
//! sentiment. The default implementation is an ordered keyword table; the
//! [`ResponseClassifier`] trait keeps it swappable for a learned model
//! without touching orchestration or statistics.
//!
//! # Example
//!
//! ```rust
//! use cohort_classifier::{Category, KeywordClassifier, ResponseClassifier, ScenarioKind};
//!
//! let classifier = KeywordClassifier::new();
//! let category = classifier.classify("I strongly support this", ScenarioKind::Policy);
//! assert_eq!(category, Category::StrongSupport);
//! ```

#![warn(unreachable_pub)]

pub mod classifier;
pub mod types;

pub use classifier::{KeywordClassifier, ResponseClassifier};
pub use types::{Category, ClassifiedAnswer, ScenarioKind};
