//! Persona profiles and their raw answers.
//!
//! Profiles are owned by the caller and never mutated by the engine; the
//! demographic snapshot travels with each answer so aggregation does not
//! need the population after the batch completes.

use crate::demographics::DemographicField;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ulid::Ulid;

/// Unique persona identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersonaId(pub Ulid);

impl PersonaId {
    /// Generate new persona ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for PersonaId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A synthetic demographic persona.
///
/// Opaque to the engine beyond its demographic attributes, which are used
/// only for grouping in breakdowns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaProfile {
    /// Persona identifier
    pub id: PersonaId,
    /// Display name (used in failure logs)
    pub name: String,
    /// Demographic attributes, keyed by the closed field set
    pub demographics: BTreeMap<DemographicField, String>,
}

impl PersonaProfile {
    /// Create a persona with no demographic attributes set.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: PersonaId::new(),
            name: name.into(),
            demographics: BTreeMap::new(),
        }
    }

    /// Set one demographic attribute (builder style).
    #[must_use]
    pub fn with_demographic(mut self, field: DemographicField, value: impl Into<String>) -> Self {
        self.demographics.insert(field, value.into());
        self
    }

    /// Look up one demographic attribute.
    #[inline]
    #[must_use]
    pub fn demographic(&self, field: DemographicField) -> Option<&str> {
        self.demographics.get(&field).map(String::as_str)
    }
}

/// One persona's raw answer to a scenario question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaAnswer {
    /// Persona that answered
    pub persona_id: PersonaId,
    /// Persona display name
    pub persona_name: String,
    /// Demographic snapshot taken when the answer was recorded
    pub demographics: BTreeMap<DemographicField, String>,
    /// Raw answer text
    pub text: String,
    /// When the answer was received
    pub answered_at: DateTime<Utc>,
}

impl PersonaAnswer {
    /// Record an answer for a persona, snapshotting its demographics.
    #[must_use]
    pub fn new(persona: &PersonaProfile, text: impl Into<String>) -> Self {
        Self {
            persona_id: persona.id,
            persona_name: persona.name.clone(),
            demographics: persona.demographics.clone(),
            text: text.into(),
            answered_at: Utc::now(),
        }
    }

    /// Demographic value for a field, if the persona carried one.
    #[inline]
    #[must_use]
    pub fn demographic(&self, field: DemographicField) -> Option<&str> {
        self.demographics.get(&field).map(String::as_str)
    }
}
