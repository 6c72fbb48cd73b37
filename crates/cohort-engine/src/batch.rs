//! Concurrent persona fan-out under a global concurrency bound.
//!
//! The population is split into sequential batches of `max_concurrent`;
//! within a batch, responder calls run concurrently. A failing call is
//! recorded and never aborts its siblings. All accumulation happens in the
//! single awaiting task, so there is no shared mutable state to lock.

use crate::PersonaResponder;
use cohort_persona::{PersonaAnswer, PersonaId, PersonaProfile};
use futures::future;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag shared between a caller and a running batch.
///
/// Cancellation stops the launch of new batches promptly; calls already in
/// flight drain naturally.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a flag in the not-cancelled state.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One persona whose responder call failed.
///
/// Recoverable at the batch level: recorded, surfaced to the caller, never
/// fatal to the run on its own.
#[derive(Debug)]
pub struct PersonaFailure {
    /// Persona whose call failed
    pub persona_id: PersonaId,
    /// Persona display name
    pub persona_name: String,
    /// The responder error
    pub error: anyhow::Error,
}

/// Successes and failures collected from one batch run.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// One entry per persona whose call succeeded
    pub answers: Vec<PersonaAnswer>,
    /// One entry per persona whose call failed
    pub failures: Vec<PersonaFailure>,
}

/// Executes one responder call per persona under a concurrency bound.
#[derive(Debug, Clone, Copy)]
pub struct BatchRunner {
    max_concurrent: usize,
}

impl BatchRunner {
    /// Create a runner; a bound of zero is treated as one.
    #[inline]
    #[must_use]
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Maximum responder calls in flight at any instant.
    #[inline]
    #[must_use]
    pub fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }

    /// Ask every persona the question, at most `max_concurrent` at a time.
    ///
    /// Each persona is evaluated at most once; no ordering is guaranteed on
    /// `answers`. Responder errors become [`PersonaFailure`] records. If
    /// `cancel` is observed between batches, remaining personas are skipped
    /// (they appear in neither list).
    pub async fn run(
        &self,
        responder: &dyn PersonaResponder,
        personas: &[PersonaProfile],
        question: &str,
        poll_context: &Map<String, Value>,
        cancel: &CancelFlag,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        let total_batches = personas.len().div_ceil(self.max_concurrent);

        for (index, batch) in personas.chunks(self.max_concurrent).enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(
                    completed_batches = index,
                    total_batches,
                    "cancellation observed; not starting further batches"
                );
                break;
            }

            tracing::debug!(
                batch = index + 1,
                total_batches,
                size = batch.len(),
                "dispatching persona batch"
            );

            let calls = batch.iter().map(|persona| async move {
                (persona, responder.ask(persona, question, poll_context).await)
            });

            for (persona, reply) in future::join_all(calls).await {
                match reply {
                    Ok(text) => outcome.answers.push(PersonaAnswer::new(persona, text)),
                    Err(error) => {
                        tracing::warn!(
                            persona = %persona.id,
                            name = persona.name.as_str(),
                            error = %error,
                            "persona call failed"
                        );
                        outcome.failures.push(PersonaFailure {
                            persona_id: persona.id,
                            persona_name: persona.name.clone(),
                            error,
                        });
                    }
                }
            }
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;

    struct EchoResponder;

    #[async_trait]
    impl PersonaResponder for EchoResponder {
        async fn ask(
            &self,
            persona: &PersonaProfile,
            question: &str,
            _poll_context: &Map<String, Value>,
        ) -> anyhow::Result<String> {
            Ok(format!("{} answering {question}", persona.name))
        }
    }

    /// Fails for personas whose name contains "flaky".
    struct FlakyResponder;

    #[async_trait]
    impl PersonaResponder for FlakyResponder {
        async fn ask(
            &self,
            persona: &PersonaProfile,
            _question: &str,
            _poll_context: &Map<String, Value>,
        ) -> anyhow::Result<String> {
            if persona.name.contains("flaky") {
                anyhow::bail!("provider timeout");
            }
            Ok("I support it".to_string())
        }
    }

    fn population(n: usize) -> Vec<PersonaProfile> {
        (0..n).map(|i| PersonaProfile::new(format!("persona-{i}"))).collect()
    }

    #[tokio::test]
    async fn all_personas_answer_once() {
        let personas = population(7);
        let runner = BatchRunner::new(3);
        let outcome = runner
            .run(&EchoResponder, &personas, "q?", &Map::new(), &CancelFlag::new())
            .await;

        assert_eq!(outcome.answers.len(), 7);
        assert!(outcome.failures.is_empty());

        let mut ids: Vec<_> = outcome.answers.iter().map(|a| a.persona_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[tokio::test]
    async fn failures_do_not_abort_siblings() {
        let mut personas = population(4);
        personas.push(PersonaProfile::new("flaky-1"));
        personas.push(PersonaProfile::new("flaky-2"));

        let runner = BatchRunner::new(2);
        let outcome = runner
            .run(&FlakyResponder, &personas, "q?", &Map::new(), &CancelFlag::new())
            .await;

        assert_eq!(outcome.answers.len(), 4);
        assert_eq!(outcome.failures.len(), 2);
        assert!(outcome.failures.iter().all(|f| f.persona_name.contains("flaky")));
    }

    #[tokio::test]
    async fn cancelled_flag_skips_all_batches() {
        let personas = population(5);
        let cancel = CancelFlag::new();
        cancel.cancel();

        let runner = BatchRunner::new(2);
        let outcome = runner
            .run(&EchoResponder, &personas, "q?", &Map::new(), &cancel)
            .await;

        assert!(outcome.answers.is_empty());
        assert!(outcome.failures.is_empty());
    }

    /// Cancels after the first call is observed; later batches must not start.
    struct CancellingResponder {
        cancel: CancelFlag,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PersonaResponder for CancellingResponder {
        async fn ask(
            &self,
            _persona: &PersonaProfile,
            _question: &str,
            _poll_context: &Map<String, Value>,
        ) -> anyhow::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.cancel.cancel();
            Ok("ok".to_string())
        }
    }

    #[tokio::test]
    async fn cancellation_mid_run_stops_later_batches() {
        let personas = population(10);
        let cancel = CancelFlag::new();
        let responder = CancellingResponder {
            cancel: cancel.clone(),
            calls: AtomicUsize::new(0),
        };

        let runner = BatchRunner::new(2);
        let outcome = runner.run(&responder, &personas, "q?", &Map::new(), &cancel).await;

        // First batch drains; nothing after it starts.
        assert_eq!(outcome.answers.len(), 2);
        assert_eq!(responder.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn zero_bound_is_clamped_to_one() {
        assert_eq!(BatchRunner::new(0).max_concurrent(), 1);
    }
}
