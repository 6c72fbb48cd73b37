//! Cohort Persona - demographic persona data model
//!
//! Leaf crate shared by the simulation and validation layers:
//! - Closed demographic field set for compile-time-checked grouping
//! - Persona profiles (caller-owned, never mutated by the engine)
//! - Raw per-persona answers with demographic snapshots

#![warn(unreachable_pub)]

pub mod demographics;
pub mod persona;

pub use demographics::DemographicField;
pub use persona::{PersonaAnswer, PersonaId, PersonaProfile};
