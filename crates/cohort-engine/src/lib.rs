//! Cohort Engine - scenario simulation and statistical aggregation
//!
//! The component that:
//! - Fans a scenario question out across a persona population under a
//!   concurrency bound, isolating per-persona failures
//! - Classifies each free-text answer via the injected classifier
//! - Aggregates classified answers into a distribution with confidence
//!   bounds and a significance score, broken down by demographic field
//!
//! # Example
//!
//! ```rust,ignore
//! use cohort_engine::{CancelFlag, ScenarioConfig, ScenarioSimulator};
//! use cohort_classifier::ScenarioKind;
//! use std::sync::Arc;
//!
//! # async fn example(responder: Arc<dyn cohort_engine::PersonaResponder>,
//! #                  personas: Vec<cohort_persona::PersonaProfile>) -> anyhow::Result<()> {
//! let scenario = ScenarioConfig::new("healthcare_2024", ScenarioKind::Policy,
//!     "Do you support universal healthcare?");
//! let simulator = ScenarioSimulator::new(responder).with_max_concurrent(5);
//!
//! let outcome = simulator
//!     .run(&scenario, &personas, &serde_json::Map::new(), &CancelFlag::new())
//!     .await?;
//! println!("{} responses", outcome.result.total_personas);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod analyzer;
pub mod batch;
pub mod error;
pub mod responder;
pub mod simulator;
pub mod types;

// Re-exports for convenience
pub use analyzer::StatisticalAnalyzer;
pub use batch::{BatchOutcome, BatchRunner, CancelFlag, PersonaFailure};
pub use error::{AnalysisError, SimulationError};
pub use responder::{PersonaResponder, PollContextProvider};
pub use simulator::{ScenarioSimulator, SimulationOutcome};
pub use types::{
    Distribution, FieldBreakdown, ScenarioConfig, SimulationMetadata, SimulationResult,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the simulation engine
    pub use crate::{
        CancelFlag, PersonaResponder, ScenarioConfig, ScenarioSimulator, SimulationOutcome,
        SimulationResult, StatisticalAnalyzer,
    };
    pub use cohort_classifier::{Category, ScenarioKind};
    pub use cohort_persona::{DemographicField, PersonaProfile};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
