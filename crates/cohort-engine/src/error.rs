//! Error types for the simulation engine.
//!
//! Per-persona responder failures are not represented here: they stop at
//! the batch boundary as [`crate::batch::PersonaFailure`] records. These
//! errors are the fatal ones that propagate to the caller.

/// Statistical analysis errors
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// No classified answers were supplied; no distribution can be computed.
    #[error("no classified answers to analyze")]
    EmptyInput,
}

/// Simulation run errors
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Every persona call failed, or the population was empty.
    ///
    /// Surfaced instead of a zeroed result so "0% support" is never
    /// reported as a finding.
    #[error("scenario '{scenario_id}' produced no valid responses ({attempted} attempted, {failed} failed)")]
    NoValidResponses {
        /// Scenario that was being simulated
        scenario_id: String,
        /// Population size handed to the batch runner
        attempted: usize,
        /// Per-persona failures recorded during the run
        failed: usize,
    },

    /// Analysis failed for a reason other than an empty answer set.
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}
