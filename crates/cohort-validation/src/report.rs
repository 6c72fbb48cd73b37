//! Accuracy report derivation.
//!
//! Pure over a slice of validation results, so hosts that keep their own
//! history can build reports without a store. Nothing here is persisted;
//! reports are recomputed on every call.

use crate::types::{AccuracyReport, TimeRange, ValidationResult};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

/// Overall accuracy below this triggers a modeling note.
const LOW_OVERALL_ACCURACY: f64 = 0.7;

/// Fewer validations than this triggers a frequency note.
const MIN_VALIDATION_COUNT: usize = 10;

/// Topic accuracy below this lists the topic as needing improvement.
const LOW_TOPIC_ACCURACY: f64 = 0.6;

/// Scenarios surfaced at each end of the ranking.
const RANKED_SCENARIO_COUNT: usize = 3;

/// Topic key embedded in a validation id: the second `'_'`-separated
/// segment, or `"general"` when there is none.
#[must_use]
pub fn topic_key(validation_id: &str) -> &str {
    validation_id.split('_').nth(1).unwrap_or("general")
}

/// Build an accuracy report over a set of validation results.
///
/// Zero results is a valid state: the report carries zero validations and
/// empty maps, not an error.
#[must_use]
pub fn build_report(results: &[ValidationResult], window: TimeRange) -> AccuracyReport {
    if results.is_empty() {
        return AccuracyReport {
            window,
            total_validations: 0,
            overall_accuracy: 0.0,
            accuracy_by_topic: BTreeMap::new(),
            accuracy_trend: Vec::new(),
            best_scenarios: Vec::new(),
            worst_scenarios: Vec::new(),
            improvement_notes: Vec::new(),
            generated_at: Utc::now(),
        };
    }

    let overall_accuracy =
        results.iter().map(|r| r.accuracy_score).sum::<f64>() / results.len() as f64;

    let accuracy_by_topic = accuracy_by_topic(results);
    let accuracy_trend = accuracy_trend(results);
    let (best_scenarios, worst_scenarios) = ranked_scenarios(results);
    let improvement_notes = improvement_notes(overall_accuracy, results.len(), &accuracy_by_topic);

    AccuracyReport {
        window,
        total_validations: results.len(),
        overall_accuracy,
        accuracy_by_topic,
        accuracy_trend,
        best_scenarios,
        worst_scenarios,
        improvement_notes,
        generated_at: Utc::now(),
    }
}

fn accuracy_by_topic(results: &[ValidationResult]) -> BTreeMap<String, f64> {
    let mut by_topic: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for result in results {
        by_topic
            .entry(topic_key(&result.validation_id).to_string())
            .or_default()
            .push(result.accuracy_score);
    }

    by_topic
        .into_iter()
        .map(|(topic, scores)| {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            (topic, mean)
        })
        .collect()
}

fn accuracy_trend(results: &[ValidationResult]) -> Vec<(NaiveDate, f64)> {
    let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for result in results {
        by_date
            .entry(result.validated_at.date_naive())
            .or_default()
            .push(result.accuracy_score);
    }

    by_date
        .into_iter()
        .map(|(date, scores)| {
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            (date, mean)
        })
        .collect()
}

fn ranked_scenarios(results: &[ValidationResult]) -> (Vec<String>, Vec<String>) {
    let mut ranked: Vec<&ValidationResult> = results.iter().collect();
    ranked.sort_by(|a, b| b.accuracy_score.total_cmp(&a.accuracy_score));

    let best = ranked
        .iter()
        .take(RANKED_SCENARIO_COUNT)
        .map(|r| r.scenario_id.clone())
        .collect();
    let worst = ranked
        .iter()
        .rev()
        .take(RANKED_SCENARIO_COUNT)
        .rev()
        .map(|r| r.scenario_id.clone())
        .collect();

    (best, worst)
}

fn improvement_notes(
    overall_accuracy: f64,
    count: usize,
    accuracy_by_topic: &BTreeMap<String, f64>,
) -> Vec<String> {
    let mut notes = Vec::new();

    if overall_accuracy < LOW_OVERALL_ACCURACY {
        notes.push(
            "Overall accuracy below 70% - consider improving persona behavioral modeling"
                .to_string(),
        );
    }
    if count < MIN_VALIDATION_COUNT {
        notes.push("Limited validation data - increase validation frequency".to_string());
    }

    let low_topics: Vec<&str> = accuracy_by_topic
        .iter()
        .filter(|(_, accuracy)| **accuracy < LOW_TOPIC_ACCURACY)
        .map(|(topic, _)| topic.as_str())
        .collect();
    if !low_topics.is_empty() {
        notes.push(format!("Topics needing improvement: {}", low_topics.join(", ")));
    }

    notes
}
