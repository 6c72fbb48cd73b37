//! Scenario simulation composition root.
//!
//! Drives the batch runner, classifies each raw answer, and hands the
//! classified set to the analyzer. Per-persona failures are surfaced in
//! the outcome and logged; only a run with zero valid answers fails.

use crate::analyzer::StatisticalAnalyzer;
use crate::batch::{BatchRunner, CancelFlag, PersonaFailure};
use crate::error::{AnalysisError, SimulationError};
use crate::responder::{PersonaResponder, PollContextProvider};
use crate::types::{ScenarioConfig, SimulationResult};
use cohort_classifier::{ClassifiedAnswer, KeywordClassifier, ResponseClassifier};
use cohort_persona::PersonaProfile;
use serde_json::{Map, Value};
use std::sync::Arc;

/// Default concurrency bound for responder calls.
const DEFAULT_MAX_CONCURRENT: usize = 10;

/// Poll-context items requested from the provider per run.
const POLL_CONTEXT_ITEMS: usize = 3;

/// A completed simulation: the statistical result plus the per-persona
/// failures the caller may inspect or log.
#[derive(Debug)]
pub struct SimulationOutcome {
    /// Aggregated result over all successful answers
    pub result: SimulationResult,
    /// Personas whose responder call failed
    pub failures: Vec<PersonaFailure>,
}

/// Runs scenarios across persona populations.
pub struct ScenarioSimulator {
    responder: Arc<dyn PersonaResponder>,
    classifier: Arc<dyn ResponseClassifier>,
    analyzer: StatisticalAnalyzer,
    poll_provider: Option<Arc<dyn PollContextProvider>>,
    max_concurrent: usize,
}

impl ScenarioSimulator {
    /// Create a simulator with the default keyword classifier.
    #[must_use]
    pub fn new(responder: Arc<dyn PersonaResponder>) -> Self {
        Self {
            responder,
            classifier: Arc::new(KeywordClassifier::new()),
            analyzer: StatisticalAnalyzer::new(),
            poll_provider: None,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// With a custom classifier (e.g. a learned model).
    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn ResponseClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// With a behavioral poll-context provider.
    #[must_use]
    pub fn with_poll_provider(mut self, provider: Arc<dyn PollContextProvider>) -> Self {
        self.poll_provider = Some(provider);
        self
    }

    /// With a concurrency bound for responder calls.
    #[must_use]
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent;
        self
    }

    /// Run one scenario across a persona population.
    ///
    /// `poll_context` is merged with the scenario's own context (scenario
    /// entries win) and, when a provider is configured, with
    /// topic-relevant behavioral hints.
    ///
    /// # Errors
    /// - `SimulationError::NoValidResponses` when the population is empty
    ///   or every responder call failed
    pub async fn run(
        &self,
        scenario: &ScenarioConfig,
        personas: &[PersonaProfile],
        poll_context: &Map<String, Value>,
        cancel: &CancelFlag,
    ) -> Result<SimulationOutcome, SimulationError> {
        tracing::info!(
            scenario = scenario.scenario_id.as_str(),
            personas = personas.len(),
            max_concurrent = self.max_concurrent,
            "starting scenario simulation"
        );

        let context = self.merged_context(scenario, personas, poll_context);

        let runner = BatchRunner::new(self.max_concurrent);
        let batch = runner
            .run(self.responder.as_ref(), personas, &scenario.question, &context, cancel)
            .await;

        if !batch.failures.is_empty() {
            tracing::warn!(
                scenario = scenario.scenario_id.as_str(),
                failed = batch.failures.len(),
                succeeded = batch.answers.len(),
                "some persona calls failed"
            );
        }

        let classified: Vec<ClassifiedAnswer> = batch
            .answers
            .into_iter()
            .map(|answer| {
                let category = self.classifier.classify(&answer.text, scenario.kind);
                let sentiment = self.classifier.sentiment(&answer.text);
                ClassifiedAnswer {
                    answer,
                    category,
                    sentiment,
                }
            })
            .collect();

        let mut result = self
            .analyzer
            .analyze(scenario, &classified)
            .map_err(|error| match error {
                AnalysisError::EmptyInput => SimulationError::NoValidResponses {
                    scenario_id: scenario.scenario_id.clone(),
                    attempted: personas.len(),
                    failed: batch.failures.len(),
                },
            })?;

        // A non-empty result implies at least one persona was attempted.
        result.metadata.total_attempted = personas.len();
        result.metadata.success_rate = result.total_personas as f64 / personas.len() as f64;

        tracing::info!(
            scenario = scenario.scenario_id.as_str(),
            responses = result.total_personas,
            significance = result.significance,
            "simulation complete"
        );

        Ok(SimulationOutcome {
            result,
            failures: batch.failures,
        })
    }

    /// Caller context, provider hints, then scenario context, in ascending
    /// priority.
    fn merged_context(
        &self,
        scenario: &ScenarioConfig,
        personas: &[PersonaProfile],
        poll_context: &Map<String, Value>,
    ) -> Map<String, Value> {
        let mut context = poll_context.clone();

        if let Some(provider) = &self.poll_provider {
            let hints =
                provider.poll_context(&scenario.description, personas.first(), POLL_CONTEXT_ITEMS);
            for (key, value) in hints {
                context.insert(key, value);
            }
        }

        for (key, value) in &scenario.context {
            context.insert(key.clone(), value.clone());
        }

        context
    }
}
