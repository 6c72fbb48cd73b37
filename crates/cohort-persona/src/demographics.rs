//! Demographic dimensions used for grouping simulation results.

use serde::{Deserialize, Serialize};

/// A demographic dimension of a persona.
///
/// The set is closed so that breakdown keys are checked at compile time
/// rather than spelled as free-form strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DemographicField {
    /// Age bracket (e.g. "34", "25_34")
    Age,
    /// Race / ethnicity
    RaceEthnicity,
    /// Gender
    Gender,
    /// Highest education level
    Education,
    /// Urban / suburban / rural
    LocationType,
    /// Household income bracket
    Income,
    /// Occupation
    Occupation,
}

impl DemographicField {
    /// Fields used for per-group response breakdowns.
    ///
    /// `Occupation` is carried on profiles but excluded here; its value
    /// space is too sparse to produce meaningful group sizes.
    pub const BREAKDOWN_FIELDS: [Self; 6] = [
        Self::Age,
        Self::RaceEthnicity,
        Self::Gender,
        Self::Education,
        Self::LocationType,
        Self::Income,
    ];

    /// Stable string form, matching the serde representation.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::RaceEthnicity => "race_ethnicity",
            Self::Gender => "gender",
            Self::Education => "education",
            Self::LocationType => "location_type",
            Self::Income => "income",
            Self::Occupation => "occupation",
        }
    }
}

impl std::fmt::Display for DemographicField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_fields_exclude_occupation() {
        assert!(!DemographicField::BREAKDOWN_FIELDS.contains(&DemographicField::Occupation));
        assert_eq!(DemographicField::BREAKDOWN_FIELDS.len(), 6);
    }

    #[test]
    fn serde_form_matches_as_str() {
        let json = serde_json::to_string(&DemographicField::RaceEthnicity).unwrap();
        assert_eq!(json, "\"race_ethnicity\"");
        assert_eq!(DemographicField::RaceEthnicity.as_str(), "race_ethnicity");
    }
}
