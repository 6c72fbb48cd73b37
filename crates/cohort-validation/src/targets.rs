//! Building validation targets from historical poll records.
//!
//! Poll storage itself is a host concern; callers hand over whatever
//! records they consider candidates and the builder filters them down to
//! usable targets.

use crate::types::ValidationTarget;
use chrono::{DateTime, Utc};
use cohort_persona::DemographicField;
use std::collections::BTreeMap;

/// Default minimum source-poll sample size for a usable target.
const DEFAULT_MIN_SAMPLE_SIZE: usize = 500;

/// Default cap on targets built per call.
const DEFAULT_MAX_TARGETS: usize = 20;

/// A historical poll record supplied by the host's poll store.
#[derive(Debug, Clone)]
pub struct PollRecord {
    /// Source poll identifier
    pub poll_id: String,
    /// Topic the poll covered (becomes the report topic key)
    pub topic: String,
    /// The question the poll asked
    pub question: String,
    /// Published response distribution (label to fraction)
    pub results: BTreeMap<String, f64>,
    /// Number of respondents
    pub sample_size: usize,
    /// Subpopulation the poll covered, if restricted
    pub demographic_slice: Option<BTreeMap<DemographicField, String>>,
    /// When the poll was conducted
    pub conducted_at: DateTime<Utc>,
}

/// Builds [`ValidationTarget`]s from candidate poll records.
#[derive(Debug, Clone, Copy)]
pub struct TargetBuilder {
    min_sample_size: usize,
    max_targets: usize,
}

impl TargetBuilder {
    /// Create a builder with the default sample-size floor and target cap.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            max_targets: DEFAULT_MAX_TARGETS,
        }
    }

    /// With minimum source sample size
    #[must_use]
    pub fn with_min_sample_size(mut self, min_sample_size: usize) -> Self {
        self.min_sample_size = min_sample_size;
        self
    }

    /// With maximum number of targets per call
    #[must_use]
    pub fn with_max_targets(mut self, max_targets: usize) -> Self {
        self.max_targets = max_targets;
        self
    }

    /// Build targets from candidate polls, skipping undersized samples.
    ///
    /// Ids take the form `val_{topic}_{date}_{poll_id}` so the topic key
    /// used by accuracy reports falls out of the second segment.
    #[must_use]
    pub fn build(&self, polls: &[PollRecord]) -> Vec<ValidationTarget> {
        polls
            .iter()
            .filter(|poll| poll.sample_size >= self.min_sample_size)
            .take(self.max_targets)
            .map(|poll| ValidationTarget {
                validation_id: format!(
                    "val_{}_{}_{}",
                    poll.topic,
                    poll.conducted_at.format("%Y%m%d"),
                    poll.poll_id
                ),
                expected_results: poll.results.clone(),
                source_sample_size: poll.sample_size,
                demographic_filter: poll.demographic_slice.clone(),
            })
            .collect()
    }
}

impl Default for TargetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::topic_key;

    fn poll(poll_id: &str, topic: &str, sample_size: usize) -> PollRecord {
        let mut results = BTreeMap::new();
        results.insert("support".to_string(), 0.55);
        results.insert("oppose".to_string(), 0.45);
        PollRecord {
            poll_id: poll_id.to_string(),
            topic: topic.to_string(),
            question: "Do you support it?".to_string(),
            results,
            sample_size,
            demographic_slice: None,
            conducted_at: Utc::now(),
        }
    }

    #[test]
    fn undersized_polls_are_skipped() {
        let builder = TargetBuilder::new().with_min_sample_size(500);
        let targets = builder.build(&[poll("p1", "healthcare", 1000), poll("p2", "healthcare", 100)]);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].source_sample_size, 1000);
    }

    #[test]
    fn target_cap_applies() {
        let polls: Vec<PollRecord> =
            (0..5).map(|i| poll(&format!("p{i}"), "economy", 800)).collect();
        let targets = TargetBuilder::new().with_max_targets(2).build(&polls);

        assert_eq!(targets.len(), 2);
    }

    #[test]
    fn validation_id_carries_the_topic_key() {
        let targets = TargetBuilder::new().build(&[poll("p1", "healthcare", 900)]);
        assert_eq!(topic_key(&targets[0].validation_id), "healthcare");
    }
}
