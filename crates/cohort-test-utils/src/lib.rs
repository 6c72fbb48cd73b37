//! Testing utilities for the cohort workspace
//!
//! Shared fixtures: sample persona populations, scripted responders, and
//! pre-built simulation results.

#![allow(missing_docs)]

use async_trait::async_trait;
use cohort_classifier::{Category, ClassifiedAnswer, ScenarioKind};
use cohort_engine::{PersonaResponder, ScenarioConfig, SimulationResult, StatisticalAnalyzer};
use cohort_persona::{DemographicField, PersonaAnswer, PersonaProfile};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Five demographically diverse personas, after the original demo set.
pub fn sample_personas() -> Vec<PersonaProfile> {
    vec![
        persona("Maria Rodriguez", "34", "hispanic", "female", "college", "suburban", "50k_75k"),
        persona("Bob Johnson", "52", "white", "male", "high_school", "rural", "30k_50k"),
        persona("Ashley Chen", "28", "asian", "female", "graduate", "urban", "over_100k"),
        persona("James Wilson", "65", "black", "male", "some_college", "urban", "75k_100k"),
        persona("Sarah Smith", "42", "white", "female", "college", "suburban", "75k_100k"),
    ]
}

/// A population of `n` minimally-specified personas.
pub fn population(n: usize) -> Vec<PersonaProfile> {
    (0..n).map(|i| PersonaProfile::new(format!("persona-{i}"))).collect()
}

pub fn persona(
    name: &str,
    age: &str,
    race: &str,
    gender: &str,
    education: &str,
    location: &str,
    income: &str,
) -> PersonaProfile {
    PersonaProfile::new(name)
        .with_demographic(DemographicField::Age, age)
        .with_demographic(DemographicField::RaceEthnicity, race)
        .with_demographic(DemographicField::Gender, gender)
        .with_demographic(DemographicField::Education, education)
        .with_demographic(DemographicField::LocationType, location)
        .with_demographic(DemographicField::Income, income)
}

pub fn policy_scenario(scenario_id: &str) -> ScenarioConfig {
    ScenarioConfig::new(scenario_id, ScenarioKind::Policy, "Do you support this policy?")
        .with_description("test policy scenario")
}

/// Responder that gives the same answer to every persona.
pub struct StaticResponder(pub String);

#[async_trait]
impl PersonaResponder for StaticResponder {
    async fn ask(
        &self,
        _persona: &PersonaProfile,
        _question: &str,
        _poll_context: &Map<String, Value>,
    ) -> anyhow::Result<String> {
        Ok(self.0.clone())
    }
}

/// Responder with per-persona-name replies; unknown names fail.
#[derive(Default)]
pub struct ScriptedResponder {
    replies: HashMap<String, String>,
}

impl ScriptedResponder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn reply(mut self, persona_name: &str, text: &str) -> Self {
        self.replies.insert(persona_name.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl PersonaResponder for ScriptedResponder {
    async fn ask(
        &self,
        persona: &PersonaProfile,
        _question: &str,
        _poll_context: &Map<String, Value>,
    ) -> anyhow::Result<String> {
        self.replies
            .get(&persona.name)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no scripted reply for '{}'", persona.name))
    }
}

/// Responder that always fails.
pub struct FailingResponder;

#[async_trait]
impl PersonaResponder for FailingResponder {
    async fn ask(
        &self,
        _persona: &PersonaProfile,
        _question: &str,
        _poll_context: &Map<String, Value>,
    ) -> anyhow::Result<String> {
        anyhow::bail!("simulated provider outage")
    }
}

/// Classified answers with the given per-category counts.
pub fn classified_answers(counts: &[(Category, usize)]) -> Vec<ClassifiedAnswer> {
    let mut answers = Vec::new();
    for (category, count) in counts {
        for i in 0..*count {
            let p = PersonaProfile::new(format!("{category}-{i}"));
            answers.push(ClassifiedAnswer {
                answer: PersonaAnswer::new(&p, format!("{category} answer")),
                category: *category,
                sentiment: 0.0,
            });
        }
    }
    answers
}

/// A ready-made simulation result with the given category counts.
pub fn simulation_result(scenario_id: &str, counts: &[(Category, usize)]) -> SimulationResult {
    let answers = classified_answers(counts);
    StatisticalAnalyzer::new()
        .analyze(&policy_scenario(scenario_id), &answers)
        .expect("non-empty counts")
}
