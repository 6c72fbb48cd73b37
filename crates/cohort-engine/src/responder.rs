//! Collaborator seams owned by the host process.
//!
//! The engine never talks to an LLM itself; it consumes these capabilities.

use async_trait::async_trait;
use cohort_persona::PersonaProfile;
use serde_json::{Map, Value};

/// "Transform an LLM into this persona and get its answer."
///
/// Supplied by the caller. May fail for any reason (timeout, provider
/// error, malformed persona); the engine treats all failures uniformly as
/// per-persona failures. Retry policy, if any, belongs to the implementor.
#[async_trait]
pub trait PersonaResponder: Send + Sync {
    /// Ask one persona the scenario question.
    async fn ask(
        &self,
        persona: &PersonaProfile,
        question: &str,
        poll_context: &Map<String, Value>,
    ) -> anyhow::Result<String>;
}

/// Supplies behavioral-context hints for a topic (e.g. "68% of similar
/// respondents support X, source Y"), merged into the prompt context
/// before the responder is invoked. The engine passes the map through
/// opaquely.
pub trait PollContextProvider: Send + Sync {
    /// Context entries for a topic, optionally tailored to one persona.
    fn poll_context(
        &self,
        topic: &str,
        persona: Option<&PersonaProfile>,
        max_items: usize,
    ) -> Map<String, Value>;
}
