//! Validation of predicted distributions against known polling results.
//!
//! Both sides are pooled onto three canonical super-categories before
//! comparison: the closed predicted taxonomy maps structurally, while
//! actual poll labels map through synonym lists. Per-field demographic
//! accuracy compares leading-category fractions only, which is a known
//! simplification rather than a full distributional comparison.

use crate::report::build_report;
use crate::store::{StoreError, ValidationStore};
use crate::types::{
    AccuracyReport, ErrorBreakdown, TimeRange, ValidationResult, ValidationTarget,
};
use chrono::Utc;
use cohort_classifier::Category;
use cohort_engine::{Distribution, SimulationResult};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The target's expected categories share no super-category overlap
    /// with the simulation's observed categories; an accuracy score would
    /// be meaningless.
    #[error("validation target '{validation_id}' shares no categories with scenario '{scenario_id}'")]
    TargetMismatch {
        /// Target that failed to match
        validation_id: String,
        /// Scenario whose result was being validated
        scenario_id: String,
    },

    /// The record store failed.
    #[error("validation store error: {0}")]
    Store(#[from] StoreError),
}

/// Canonical super-categories used for prediction-vs-poll comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum SuperCategory {
    Support,
    Oppose,
    Neutral,
}

const SUPER_CATEGORIES: [SuperCategory; 3] = [
    SuperCategory::Support,
    SuperCategory::Oppose,
    SuperCategory::Neutral,
];

const SUPPORT_LABELS: &[&str] = &["support", "approve", "favor", "yes", "strong_support"];
const OPPOSE_LABELS: &[&str] = &["oppose", "disapprove", "against", "no", "strong_oppose"];
const NEUTRAL_LABELS: &[&str] = &["neutral", "unsure", "undecided", "mixed"];

/// Super-category of a predicted taxonomy category.
///
/// Purchase and emotion categories pool to none; polls phrased in
/// support/oppose terms cannot score them.
fn super_of_category(category: Category) -> Option<SuperCategory> {
    match category {
        Category::Support | Category::StrongSupport => Some(SuperCategory::Support),
        Category::Oppose | Category::StrongOppose => Some(SuperCategory::Oppose),
        Category::Neutral => Some(SuperCategory::Neutral),
        Category::PurchaseIntent | Category::NoPurchase | Category::Concerned | Category::Confident => None,
    }
}

/// Super-category of an actual poll label (exact match against synonyms).
fn super_of_label(label: &str) -> Option<SuperCategory> {
    if SUPPORT_LABELS.contains(&label) {
        Some(SuperCategory::Support)
    } else if OPPOSE_LABELS.contains(&label) {
        Some(SuperCategory::Oppose)
    } else if NEUTRAL_LABELS.contains(&label) {
        Some(SuperCategory::Neutral)
    } else {
        None
    }
}

fn pool_predicted(distribution: &Distribution, target: SuperCategory) -> f64 {
    distribution
        .iter()
        .filter(|(category, _)| super_of_category(**category) == Some(target))
        .map(|(_, fraction)| fraction)
        .sum()
}

fn pool_actual(actual: &BTreeMap<String, f64>, target: SuperCategory) -> f64 {
    actual
        .iter()
        .filter(|(label, _)| super_of_label(label) == Some(target))
        .map(|(_, fraction)| fraction)
        .sum()
}

/// Compares simulation results to validation targets and tracks accuracy
/// over time through an append-only store.
pub struct ValidationEngine {
    store: Arc<dyn ValidationStore>,
}

impl ValidationEngine {
    /// Create an engine over a record store.
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn ValidationStore>) -> Self {
        Self { store }
    }

    /// Validate one simulation result against one target and persist the
    /// outcome.
    ///
    /// # Errors
    /// - `ValidationError::TargetMismatch` when predicted and expected
    ///   categories share no super-category
    /// - `ValidationError::Store` when the append fails
    pub fn validate(
        &self,
        target: &ValidationTarget,
        result: &SimulationResult,
    ) -> Result<ValidationResult, ValidationError> {
        let observed: BTreeSet<SuperCategory> = result
            .response_categories
            .iter()
            .filter_map(|c| super_of_category(*c))
            .collect();
        let expected: BTreeSet<SuperCategory> = target
            .expected_results
            .keys()
            .filter_map(|label| super_of_label(label))
            .collect();

        if observed.is_disjoint(&expected) {
            return Err(ValidationError::TargetMismatch {
                validation_id: target.validation_id.clone(),
                scenario_id: result.scenario_id.clone(),
            });
        }

        // Mean per-super-category accuracy, each clamped to non-negative.
        let accuracy_score = SUPER_CATEGORIES
            .iter()
            .map(|sc| {
                let predicted = pool_predicted(&result.response_distribution, *sc);
                let actual = pool_actual(&target.expected_results, *sc);
                (1.0 - (predicted - actual).abs()).max(0.0)
            })
            .sum::<f64>()
            / SUPER_CATEGORIES.len() as f64;

        let demographic_accuracy = demographic_accuracy(target, result);
        let error_breakdown = error_breakdown(target, result);

        let confidence_calibration = if accuracy_score > 0.0 {
            (result.significance / accuracy_score).min(1.0)
        } else {
            0.5
        };

        let validation_result = ValidationResult {
            validation_id: target.validation_id.clone(),
            scenario_id: result.scenario_id.clone(),
            predicted_results: result
                .response_distribution
                .iter()
                .map(|(category, fraction)| (category.as_str().to_string(), *fraction))
                .collect(),
            actual_results: target.expected_results.clone(),
            accuracy_score,
            demographic_accuracy,
            error_breakdown,
            confidence_calibration,
            validated_at: Utc::now(),
        };

        self.store.append(&validation_result)?;

        tracing::info!(
            validation = target.validation_id.as_str(),
            scenario = result.scenario_id.as_str(),
            accuracy = accuracy_score,
            "validation recorded"
        );

        Ok(validation_result)
    }

    /// Accuracy report over a window of stored results.
    ///
    /// An empty window yields a zeroed report, not an error; a store
    /// failure is an error, never "no data".
    ///
    /// # Errors
    /// - `ValidationError::Store` when the query fails
    pub fn report(&self, window: &TimeRange) -> Result<AccuracyReport, ValidationError> {
        let records = self.store.query(window)?;
        Ok(build_report(&records, window.clone()))
    }
}

/// Mean leading-category fraction per filtered demographic field.
fn demographic_accuracy(
    target: &ValidationTarget,
    result: &SimulationResult,
) -> BTreeMap<cohort_persona::DemographicField, f64> {
    let mut accuracy = BTreeMap::new();

    let Some(filter) = &target.demographic_filter else {
        return accuracy;
    };

    for field in filter.keys() {
        let Some(groups) = result.demographic_breakdowns.get(field) else {
            continue;
        };
        if groups.is_empty() {
            continue;
        }

        let mean_leading = groups
            .values()
            .map(|local| {
                local
                    .values()
                    .fold(0.0_f64, |acc, fraction| acc.max(*fraction))
            })
            .sum::<f64>()
            / groups.len() as f64;

        accuracy.insert(*field, mean_leading);
    }

    accuracy
}

fn error_breakdown(target: &ValidationTarget, result: &SimulationResult) -> ErrorBreakdown {
    let predicted: BTreeMap<String, f64> = result
        .response_distribution
        .iter()
        .map(|(category, fraction)| (category.as_str().to_string(), *fraction))
        .collect();

    let category_errors: BTreeMap<String, f64> = target
        .expected_results
        .iter()
        .map(|(label, actual)| {
            (label.clone(), predicted.get(label).copied().unwrap_or(0.0) - actual)
        })
        .collect();

    let largest_error = category_errors
        .values()
        .fold(0.0_f64, |acc, error| acc.max(error.abs()));

    ErrorBreakdown {
        largest_error,
        category_errors,
        sample_size_delta: result.total_personas as i64 - target.source_sample_size as i64,
    }
}
