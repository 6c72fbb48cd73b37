//! End-to-end validation behavior: round-trip accuracy, mismatch
//! surfacing, persistence, and windowed reporting.

use cohort_classifier::Category;
use cohort_engine::{CancelFlag, ScenarioSimulator};
use cohort_test_utils::{policy_scenario, sample_personas, simulation_result, StaticResponder};
use cohort_validation::{
    MemoryValidationStore, StoreError, TimeRange, ValidationEngine, ValidationError,
    ValidationResult, ValidationStore, ValidationTarget,
};
use pretty_assertions::assert_eq;
use serde_json::Map;
use std::collections::BTreeMap;
use std::sync::Arc;

fn target(validation_id: &str, expected: &[(&str, f64)], sample_size: usize) -> ValidationTarget {
    ValidationTarget {
        validation_id: validation_id.to_string(),
        expected_results: expected
            .iter()
            .map(|(label, fraction)| ((*label).to_string(), *fraction))
            .collect(),
        source_sample_size: sample_size,
        demographic_filter: None,
    }
}

#[test]
fn exact_match_scores_perfect_accuracy() {
    let result = simulation_result(
        "healthcare_sim",
        &[(Category::Support, 60), (Category::Oppose, 30), (Category::Neutral, 10)],
    );
    let target = target(
        "val_healthcare_20240101",
        &[("support", 0.6), ("oppose", 0.3), ("neutral", 0.1)],
        1000,
    );

    let engine = ValidationEngine::new(Arc::new(MemoryValidationStore::new()));
    let validation = engine.validate(&target, &result).unwrap();

    assert_eq!(validation.accuracy_score, 1.0);
    assert_eq!(validation.error_breakdown.largest_error, 0.0);
    assert_eq!(validation.error_breakdown.sample_size_delta, -900);
}

#[test]
fn synonym_labels_pool_before_comparison() {
    let result = simulation_result(
        "approval_sim",
        &[(Category::Support, 50), (Category::StrongSupport, 10), (Category::Oppose, 40)],
    );
    // "approve" pools with support, "disapprove" with oppose.
    let target = target(
        "val_approval_20240101",
        &[("approve", 0.6), ("disapprove", 0.4)],
        500,
    );

    let engine = ValidationEngine::new(Arc::new(MemoryValidationStore::new()));
    let validation = engine.validate(&target, &result).unwrap();

    assert!((validation.accuracy_score - 1.0).abs() < 1e-9);
}

#[test]
fn disjoint_categories_are_a_mismatch_error() {
    let result = simulation_result("product_sim", &[(Category::PurchaseIntent, 20)]);
    let target = target("val_policy_20240101", &[("support", 0.5), ("oppose", 0.5)], 500);

    let engine = ValidationEngine::new(Arc::new(MemoryValidationStore::new()));
    let error = engine.validate(&target, &result).unwrap_err();

    assert!(matches!(error, ValidationError::TargetMismatch { .. }));
}

#[test]
fn validations_are_persisted_and_reported() {
    let store = Arc::new(MemoryValidationStore::new());
    let engine = ValidationEngine::new(store.clone());

    let result = simulation_result(
        "healthcare_sim",
        &[(Category::Support, 55), (Category::Oppose, 45)],
    );
    let target = target(
        "val_healthcare_20240101",
        &[("support", 0.5), ("oppose", 0.5)],
        800,
    );

    engine.validate(&target, &result).unwrap();
    engine.validate(&target, &result).unwrap();
    assert_eq!(store.len(), 2);

    let report = engine.report(&TimeRange::last_days(7)).unwrap();
    assert_eq!(report.total_validations, 2);
    assert!(report.accuracy_by_topic.contains_key("healthcare"));
    assert!(!report.best_scenarios.is_empty());
}

#[test]
fn empty_window_reports_no_data_without_error() {
    let engine = ValidationEngine::new(Arc::new(MemoryValidationStore::new()));
    let report = engine.report(&TimeRange::last_days(30)).unwrap();

    assert_eq!(report.total_validations, 0);
    assert!(report.accuracy_by_topic.is_empty());
    assert!(report.accuracy_trend.is_empty());
}

#[test]
fn demographic_accuracy_covers_filtered_fields() {
    use cohort_classifier::ClassifiedAnswer;
    use cohort_engine::StatisticalAnalyzer;
    use cohort_persona::{DemographicField, PersonaAnswer};

    let answers: Vec<ClassifiedAnswer> = sample_personas()
        .iter()
        .map(|p| ClassifiedAnswer {
            answer: PersonaAnswer::new(p, "I support this"),
            category: Category::Support,
            sentiment: 0.5,
        })
        .collect();
    let result = StatisticalAnalyzer::new()
        .analyze(&policy_scenario("demo_sim"), &answers)
        .unwrap();

    let mut filter = BTreeMap::new();
    filter.insert(DemographicField::Gender, "female".to_string());
    let target = ValidationTarget {
        validation_id: "val_demo_20240101".to_string(),
        expected_results: BTreeMap::from([("support".to_string(), 1.0)]),
        source_sample_size: 100,
        demographic_filter: Some(filter),
    };

    let engine = ValidationEngine::new(Arc::new(MemoryValidationStore::new()));
    let validation = engine.validate(&target, &result).unwrap();

    // Every gender group's leading category is support at 1.0.
    assert_eq!(validation.demographic_accuracy[&DemographicField::Gender], 1.0);
}

/// Store whose reads always fail.
struct OutageStore;

impl ValidationStore for OutageStore {
    fn append(&self, _result: &ValidationResult) -> Result<(), StoreError> {
        Err(StoreError::Io("disk gone".to_string()))
    }

    fn query(&self, _window: &TimeRange) -> Result<Vec<ValidationResult>, StoreError> {
        Err(StoreError::Io("disk gone".to_string()))
    }
}

#[test]
fn store_outage_is_an_error_not_no_data() {
    let engine = ValidationEngine::new(Arc::new(OutageStore));
    let error = engine.report(&TimeRange::last_days(30)).unwrap_err();

    assert!(matches!(error, ValidationError::Store(StoreError::Io(_))));
}

#[tokio::test]
async fn simulate_then_validate_flow() {
    let simulator = ScenarioSimulator::new(Arc::new(StaticResponder(
        "I support this policy".to_string(),
    )))
    .with_max_concurrent(3);

    let outcome = simulator
        .run(
            &policy_scenario("healthcare_flow"),
            &sample_personas(),
            &Map::new(),
            &CancelFlag::new(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.result.total_personas, 5);

    let mut expected = BTreeMap::new();
    expected.insert("support".to_string(), 1.0);
    let target = ValidationTarget {
        validation_id: "val_healthcare_20240101_p1".to_string(),
        expected_results: expected,
        source_sample_size: 1200,
        demographic_filter: None,
    };

    let engine = ValidationEngine::new(Arc::new(MemoryValidationStore::new()));
    let validation = engine.validate(&target, &outcome.result).unwrap();

    // Every persona supports; oppose and neutral errors are zero.
    assert!((validation.accuracy_score - 1.0).abs() < 1e-9);
    assert_eq!(validation.scenario_id, "healthcare_flow");
}
