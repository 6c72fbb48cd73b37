//! Statistical aggregation of classified answers.
//!
//! Pure functions over data: distribution, per-demographic breakdowns, a
//! 95% normal-approximation confidence interval for the leading category,
//! and a heuristic significance score. Every aggregate is a commutative
//! reduction (sums and counts), so results are identical under any
//! permutation of the input.

use crate::error::AnalysisError;
use crate::types::{
    Distribution, FieldBreakdown, ScenarioConfig, SimulationMetadata, SimulationResult,
};
use chrono::Utc;
use cohort_classifier::{Category, ClassifiedAnswer};
use cohort_persona::DemographicField;
use std::collections::BTreeMap;

/// Z-score for a 95% confidence level.
const Z_95: f64 = 1.96;

/// Samples below this count get a significance of zero.
const MIN_SIGNIFICANT_SAMPLE: usize = 30;

/// Sample size at which the significance size factor saturates.
const SIZE_FACTOR_CEILING: f64 = 1000.0;

/// Turns a set of classified answers into a [`SimulationResult`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Create new analyzer
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Aggregate classified answers for one scenario.
    ///
    /// # Errors
    /// - `AnalysisError::EmptyInput` if `answers` is empty
    pub fn analyze(
        &self,
        scenario: &ScenarioConfig,
        answers: &[ClassifiedAnswer],
    ) -> Result<SimulationResult, AnalysisError> {
        if answers.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let n = answers.len();
        tracing::debug!(scenario = scenario.scenario_id.as_str(), responses = n, "analyzing responses");

        let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
        for answer in answers {
            *counts.entry(answer.category).or_insert(0) += 1;
        }

        let response_distribution: Distribution = counts
            .iter()
            .map(|(category, count)| (*category, *count as f64 / n as f64))
            .collect();

        let leading = response_distribution
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map_or(0.0, |(_, p)| *p);

        Ok(SimulationResult {
            scenario_id: scenario.scenario_id.clone(),
            total_personas: n,
            demographic_breakdowns: demographic_breakdowns(answers),
            confidence_interval: confidence_interval(leading, n),
            significance: significance(&response_distribution, n),
            response_categories: counts.keys().copied().collect(),
            response_distribution,
            answers: answers.to_vec(),
            metadata: SimulationMetadata {
                kind: scenario.kind,
                description: scenario.description.clone(),
                // The analyzer only sees successful answers; the simulator
                // overwrites these with the real attempt counts.
                total_attempted: n,
                success_rate: 1.0,
                completed_at: Utc::now(),
            },
        })
    }
}

/// Local distributions grouped by each breakdown field's value.
///
/// Personas missing a field value are grouped under `"unknown"`.
fn demographic_breakdowns(
    answers: &[ClassifiedAnswer],
) -> BTreeMap<DemographicField, FieldBreakdown> {
    let mut breakdowns = BTreeMap::new();

    for field in DemographicField::BREAKDOWN_FIELDS {
        let mut group_counts: BTreeMap<String, BTreeMap<Category, usize>> = BTreeMap::new();

        for classified in answers {
            let value = classified
                .answer
                .demographic(field)
                .unwrap_or("unknown")
                .to_string();
            *group_counts
                .entry(value)
                .or_default()
                .entry(classified.category)
                .or_insert(0) += 1;
        }

        let field_breakdown: FieldBreakdown = group_counts
            .into_iter()
            .map(|(value, counts)| {
                let total: usize = counts.values().sum();
                let local: Distribution = counts
                    .into_iter()
                    .map(|(category, count)| (category, count as f64 / total as f64))
                    .collect();
                (value, local)
            })
            .collect();

        breakdowns.insert(field, field_breakdown);
    }

    breakdowns
}

/// 95% normal-approximation interval for fraction `p` over `n` samples,
/// clamped to [0, 1] and rounded to 3 decimals. `(0, 0)` for `n == 0`.
#[must_use]
pub fn confidence_interval(p: f64, n: usize) -> (f64, f64) {
    if n == 0 {
        return (0.0, 0.0);
    }

    let margin = Z_95 * (p * (1.0 - p) / n as f64).sqrt();
    (round3((p - margin).max(0.0)), round3((p + margin).min(1.0)))
}

/// Heuristic significance: size factor times category spread.
///
/// Not a statistical test; callers must treat it as a relative confidence
/// signal, not a p-value. The formula (including the small-sample cutoff)
/// is preserved exactly because downstream accuracy calibration depends on
/// its scale.
#[must_use]
pub fn significance(distribution: &Distribution, n: usize) -> f64 {
    if distribution.is_empty() || n < MIN_SIGNIFICANT_SAMPLE {
        return 0.0;
    }

    let max = distribution.values().fold(f64::MIN, |acc, v| acc.max(*v));
    let min = distribution.values().fold(f64::MAX, |acc, v| acc.min(*v));
    let spread = max - min;

    let size_factor = (n as f64 / SIZE_FACTOR_CEILING).min(1.0);
    round3(size_factor * spread)
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
