//! Cohort Validation - accuracy tracking against historical polling data
//!
//! Compares predicted response distributions to independently-sourced
//! polling numbers, persists every comparison to an append-only store,
//! and summarizes accuracy trends over time windows on demand.
//!
//! # Example
//!
//! ```rust,ignore
//! use cohort_validation::{MemoryValidationStore, TimeRange, ValidationEngine};
//! use std::sync::Arc;
//!
//! # fn example(target: cohort_validation::ValidationTarget,
//! #            result: cohort_engine::SimulationResult) -> anyhow::Result<()> {
//! let engine = ValidationEngine::new(Arc::new(MemoryValidationStore::new()));
//! let validation = engine.validate(&target, &result)?;
//! println!("accuracy: {:.3}", validation.accuracy_score);
//!
//! let report = engine.report(&TimeRange::last_days(30))?;
//! println!("{} validations", report.total_validations);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod engine;
pub mod report;
pub mod store;
pub mod targets;
pub mod types;

// Re-exports for convenience
pub use engine::{ValidationEngine, ValidationError};
pub use report::{build_report, topic_key};
pub use store::{MemoryValidationStore, StoreError, ValidationStore};
pub use targets::{PollRecord, TargetBuilder};
pub use types::{
    AccuracyReport, ErrorBreakdown, TimeRange, ValidationResult, ValidationTarget,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
