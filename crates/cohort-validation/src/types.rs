//! Validation data model.
//!
//! Targets are built ahead of time from independently-sourced polling
//! records; results link a target to a simulation run and are persisted
//! append-only. Accuracy reports are derived on demand and never stored.

use chrono::{DateTime, NaiveDate, Utc};
use cohort_persona::DemographicField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Half-open-free inclusive time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    /// Window start (inclusive)
    pub start: DateTime<Utc>,
    /// Window end (inclusive)
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Create a window.
    #[inline]
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Window covering the last `days` days up to now.
    #[must_use]
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now();
        Self {
            start: end - chrono::Duration::days(days),
            end,
        }
    }

    /// Whether an instant falls inside the window.
    #[inline]
    #[must_use]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// A known historical result to validate predictions against.
///
/// `expected_results` keys are open strings because poll sources label
/// their categories freely ("approve", "yes", ...); pooling into canonical
/// super-categories happens at validation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationTarget {
    /// Target identifier; the second `'_'`-separated segment is treated as
    /// the topic key in accuracy reports
    pub validation_id: String,
    /// Known response distribution, independently sourced
    pub expected_results: BTreeMap<String, f64>,
    /// Sample size of the source poll
    pub source_sample_size: usize,
    /// Which subpopulation the target applies to, if restricted
    pub demographic_filter: Option<BTreeMap<DemographicField, String>>,
}

/// Signed and absolute errors between predicted and actual distributions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBreakdown {
    /// Largest absolute per-category error
    pub largest_error: f64,
    /// Signed error (predicted − actual) per actual label
    pub category_errors: BTreeMap<String, f64>,
    /// Simulated sample size minus source poll sample size
    pub sample_size_delta: i64,
}

/// Result of comparing one prediction to one known distribution.
///
/// Persisted append-only; `accuracy_score` is always recomputed from the
/// stored distributions, never hand-edited.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Target that was validated against
    pub validation_id: String,
    /// Scenario that produced the prediction
    pub scenario_id: String,
    /// Predicted distribution (category label to fraction)
    pub predicted_results: BTreeMap<String, f64>,
    /// Actual distribution from the source poll
    pub actual_results: BTreeMap<String, f64>,
    /// Mean per-super-category accuracy in [0, 1]
    pub accuracy_score: f64,
    /// Accuracy per overlapping demographic field
    pub demographic_accuracy: BTreeMap<DemographicField, f64>,
    /// Error detail
    pub error_breakdown: ErrorBreakdown,
    /// How well the significance score matched achieved accuracy
    pub confidence_calibration: f64,
    /// When the validation ran
    pub validated_at: DateTime<Utc>,
}

/// Accuracy summary over a window of stored validation results.
///
/// Recomputed on every call; "no data" is a valid state with zero
/// validations and empty maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Window the report covers
    pub window: TimeRange,
    /// Number of validations considered
    pub total_validations: usize,
    /// Mean accuracy over all considered validations
    pub overall_accuracy: f64,
    /// Mean accuracy per topic key
    pub accuracy_by_topic: BTreeMap<String, f64>,
    /// Chronological daily mean accuracy
    pub accuracy_trend: Vec<(NaiveDate, f64)>,
    /// Up to 3 best-performing scenario ids
    pub best_scenarios: Vec<String>,
    /// Up to 3 worst-performing scenario ids
    pub worst_scenarios: Vec<String>,
    /// Textual improvement notes
    pub improvement_notes: Vec<String>,
    /// When the report was generated
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_range_contains_is_inclusive() {
        let start = Utc::now();
        let end = start + chrono::Duration::days(1);
        let range = TimeRange::new(start, end);

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(end + chrono::Duration::seconds(1)));
    }
}
