//! Core types for the simulation engine.
//!
//! Defines the scenario configuration supplied per run and the
//! statistical result produced once per run (read-only afterward).

use chrono::{DateTime, Utc};
use cohort_classifier::{Category, ClassifiedAnswer, ScenarioKind};
use cohort_persona::DemographicField;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};

/// Configuration for one simulation scenario.
///
/// Immutable once constructed; built by the caller per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Scenario identifier
    pub scenario_id: String,
    /// Scenario kind (selects the classifier fallback)
    pub kind: ScenarioKind,
    /// Human description of what is being tested
    pub description: String,
    /// The literal question sent to every persona
    pub question: String,
    /// Free-form context passed through to the responder
    pub context: Map<String, Value>,
    /// Optional target-demographic hints
    pub target_demographics: Option<Vec<String>>,
}

impl ScenarioConfig {
    /// Create a scenario with empty context.
    #[must_use]
    pub fn new(
        scenario_id: impl Into<String>,
        kind: ScenarioKind,
        question: impl Into<String>,
    ) -> Self {
        Self {
            scenario_id: scenario_id.into(),
            kind,
            description: String::new(),
            question: question.into(),
            context: Map::new(),
            target_demographics: None,
        }
    }

    /// With human description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With one context entry
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: Value) -> Self {
        self.context.insert(key.into(), value);
        self
    }

    /// With target-demographic hints
    #[must_use]
    pub fn with_target_demographics(mut self, targets: Vec<String>) -> Self {
        self.target_demographics = Some(targets);
        self
    }
}

/// Response distribution: category to fraction of answers.
pub type Distribution = BTreeMap<Category, f64>;

/// Per-field breakdown: demographic value to local distribution.
pub type FieldBreakdown = BTreeMap<String, Distribution>;

/// Run metadata carried on the result for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMetadata {
    /// Scenario kind
    pub kind: ScenarioKind,
    /// Scenario description
    pub description: String,
    /// Personas the run attempted, including failed calls
    pub total_attempted: usize,
    /// Fraction of attempted calls that produced a valid answer
    pub success_rate: f64,
    /// When the analysis completed
    pub completed_at: DateTime<Utc>,
}

/// Statistical result of one simulation run.
///
/// Created once per run and read-only afterward. `total_personas` counts
/// only personas whose call succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Scenario that was simulated
    pub scenario_id: String,
    /// Number of personas that produced a valid answer
    pub total_personas: usize,
    /// Category fractions over all answers; sums to 1.0 ± tolerance
    pub response_distribution: Distribution,
    /// Local distributions per demographic field and value
    pub demographic_breakdowns: BTreeMap<DemographicField, FieldBreakdown>,
    /// 95% normal-approximation interval for the leading category
    pub confidence_interval: (f64, f64),
    /// Heuristic significance score in [0, 1]; a relative confidence
    /// signal, not a p-value
    pub significance: f64,
    /// Categories observed in this run
    pub response_categories: BTreeSet<Category>,
    /// Every classified answer that fed the aggregation
    pub answers: Vec<ClassifiedAnswer>,
    /// Run metadata
    pub metadata: SimulationMetadata,
}

impl SimulationResult {
    /// The leading category and its fraction, if any answers were observed.
    #[must_use]
    pub fn leading_category(&self) -> Option<(Category, f64)> {
        self.response_distribution
            .iter()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(c, p)| (*c, *p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_builder() {
        let scenario = ScenarioConfig::new("healthcare_2024", ScenarioKind::Policy, "Do you support it?")
            .with_description("Universal healthcare support")
            .with_context("policy_type", Value::String("healthcare".into()));

        assert_eq!(scenario.scenario_id, "healthcare_2024");
        assert_eq!(scenario.context.len(), 1);
        assert!(scenario.target_demographics.is_none());
    }
}
