//! Integration tests for the estimation engine
//!
//! Covers:
//! - Artifact recommendation coverage, idempotence and rule monotonicity
//! - The worked calculation example and the uncertainty band
//! - Zero-headcount teams
//! - Export round trips

use pretty_assertions::assert_eq;
use pwb_estimate::export;
use pwb_estimate::models::{
    CompetencyFramework, Grade, Methodology, PmoType, RiskFramework, RoleType, Standard, TeamRole,
};
use pwb_estimate::{
    build_artifacts, calc_radar_values, calculate, Calculation, ConfigTable, EstimationInputs,
    ProjectClassification,
};
use std::collections::{BTreeSet, HashSet};

fn worked_example(role: RoleType) -> EstimationInputs {
    EstimationInputs {
        base_effort: 1000.0,
        methodology: Methodology::Waterfall,
        pmo_type: PmoType::Corporate,
        pm_grade: Grade::Middle,
        competency_framework: CompetencyFramework::None,
        team_roles: vec![TeamRole::new(role, Grade::Middle, 1)],
        work_days_week: 5,
        team_availability: 62.5,
        known_risk_reserve: 0.0,
        management_reserve: 0.0,
        edge_case_buffer: 0.0,
        selected_artifact_count: 0,
        ..Default::default()
    }
}

// =============================================================================
// Recommendation engine
// =============================================================================

#[test]
fn test_every_methodology_covers_catalog_once() {
    let config = ConfigTable::builtin();
    let catalog_ids: HashSet<&str> = config
        .artifacts
        .values()
        .flatten()
        .map(|a| a.id.as_str())
        .collect();

    for methodology in Methodology::ALL {
        for pmo_type in PmoType::ALL {
            let classification = ProjectClassification {
                methodology: *methodology,
                pmo_type: *pmo_type,
                ..Default::default()
            };
            let rec = build_artifacts(config, &classification);

            let ids: Vec<&str> = rec.iter().map(|a| a.id.as_str()).collect();
            let unique: HashSet<&str> = ids.iter().copied().collect();
            assert_eq!(ids.len(), unique.len(), "duplicates for {}", methodology);
            assert_eq!(unique, catalog_ids);
            assert!(rec.iter().all(|a| a.checked == a.recommended));
        }
    }
}

#[test]
fn test_build_artifacts_is_idempotent() {
    let config = ConfigTable::builtin();
    let classification = ProjectClassification {
        methodology: Methodology::Safe,
        pmo_type: PmoType::Corporate,
        standards: BTreeSet::from([Standard::Iso10006]),
        risk_frameworks: BTreeSet::from([RiskFramework::Pramg]),
        competency_framework: CompetencyFramework::Icm,
    };

    let first = build_artifacts(config, &classification);
    let mut touched = first.clone();
    touched.select_all();
    let second = build_artifacts(config, &classification);
    assert_eq!(first, second);
}

#[test]
fn test_rebuild_discards_user_selection() {
    let config = ConfigTable::builtin();
    let classification = ProjectClassification::default();

    let mut rec = build_artifacts(config, &classification);
    assert!(rec.set_checked("wbs", false));
    assert!(rec.set_checked("archive", true));

    let rebuilt = build_artifacts(config, &classification);
    assert!(rebuilt.get("wbs").unwrap().checked);
    assert!(!rebuilt.get("archive").unwrap().checked);
}

#[test]
fn test_augmentation_rules_never_unmark() {
    let config = ConfigTable::builtin();
    for methodology in Methodology::ALL {
        let base = build_artifacts(
            config,
            &ProjectClassification {
                methodology: *methodology,
                pmo_type: PmoType::Small,
                ..Default::default()
            },
        );
        let augmented = build_artifacts(
            config,
            &ProjectClassification {
                methodology: *methodology,
                pmo_type: PmoType::Corporate,
                standards: BTreeSet::from([Standard::Iso10006]),
                risk_frameworks: BTreeSet::from([RiskFramework::Pramg]),
                competency_framework: CompetencyFramework::Icb,
            },
        );
        for artifact in base.iter().filter(|a| a.recommended) {
            assert!(
                augmented.get(&artifact.id).unwrap().recommended,
                "{} lost {}",
                methodology,
                artifact.id
            );
        }
        assert!(augmented.recommended_count() >= base.recommended_count());
    }
}

// =============================================================================
// Calculator engine
// =============================================================================

#[test]
fn test_worked_example_with_neutral_role() {
    let config = ConfigTable::builtin();
    let result = calculate(config, &worked_example(RoleType::Frontend));

    assert_eq!(result.effort, 1250);
    assert_eq!(result.total_effort, 1250);
    assert_eq!(result.duration, 250);
    assert_eq!(result.base, 250);
    assert_eq!(result.optimistic, 149);
    assert_eq!(result.pessimistic, 374);
}

#[test]
fn test_worked_example_with_backend_role() {
    // backend complexity is 1.1
    let result = calculate(ConfigTable::builtin(), &worked_example(RoleType::Backend));

    assert_eq!(result.effort, 1375);
    assert_eq!(result.duration, 275);
    assert_eq!(result.optimistic, 164);
    assert_eq!(result.pessimistic, 411);
}

#[test]
fn test_zero_headcount_skips_team_weighting() {
    let config = ConfigTable::builtin();
    let mut inputs = worked_example(RoleType::Architect);
    inputs.team_roles.clear();

    let result = calculate(config, &inputs);
    assert_eq!(result.effort, 1250);
    // a single person is assumed for the duration
    assert_eq!(result.duration, 250);

    inputs.team_roles = vec![TeamRole::new(RoleType::Architect, Grade::Junior, 0)];
    assert_eq!(calculate(config, &inputs), result);
}

#[test]
fn test_larger_team_shortens_duration() {
    let config = ConfigTable::builtin();
    let mut inputs = worked_example(RoleType::Frontend);
    inputs.team_roles[0].count = 5;

    let result = calculate(config, &inputs);
    assert_eq!(result.effort, 1250);
    assert_eq!(result.duration, 50);
}

#[test]
fn test_artifacts_add_one_percent_each() {
    let config = ConfigTable::builtin();
    let mut inputs = worked_example(RoleType::Frontend);
    inputs.selected_artifact_count = 20;

    let result = calculate(config, &inputs);
    assert_eq!(result.effort, 1500);
}

#[test]
fn test_missing_coefficients_are_neutral() {
    let mut config = ConfigTable::builtin().clone();
    config.methodology_coeffs.clear();
    config.pmo_coeffs.clear();
    config.role_complexity.clear();
    config.standard_coeffs.clear();

    let mut inputs = worked_example(RoleType::Backend);
    inputs.standards = BTreeSet::from([Standard::Iso21504]);
    let result = calculate(&config, &inputs);
    assert_eq!(result.effort, 1000);
}

#[test]
fn test_radar_for_default_inputs() {
    let inputs = EstimationInputs {
        selected_artifact_count: 9,
        ..Default::default()
    };
    let radar = calc_radar_values(ConfigTable::builtin(), &inputs);
    // 15 + 10 + 0 + 3.6
    assert_eq!(radar.uncertainty, 29);
    // 20 + 7.2
    assert_eq!(radar.scope, 27);
    assert_eq!(radar.cost, 30);
    assert_eq!(radar.quality, 25);
    assert_eq!(radar.time, 30);
}

#[test]
fn test_duplicate_entries_in_project_data_do_not_stack() {
    let config = ConfigTable::builtin();
    let single: EstimationInputs =
        serde_json::from_str(r#"{"standards": ["iso10006"], "fixedConstraints": ["cost"]}"#)
            .unwrap();
    let repeated: EstimationInputs = serde_json::from_str(
        r#"{"standards": ["iso10006", "iso10006"], "fixedConstraints": ["cost", "cost"]}"#,
    )
    .unwrap();

    assert_eq!(calculate(config, &repeated), calculate(config, &single));
    assert_eq!(calc_radar_values(config, &repeated), calc_radar_values(config, &single));
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_result_csv_round_trip() {
    let config = ConfigTable::builtin();
    let result = calculate(config, &EstimationInputs::default());
    let csv = export::result_to_csv(&result);
    assert_eq!(export::result_from_csv(&csv).unwrap(), result);
}

#[test]
fn test_calculation_json_round_trip() {
    let config = ConfigTable::builtin();
    let inputs = EstimationInputs {
        team_roles: vec![TeamRole::new(RoleType::Devops, Grade::Senior, 2)
            .with_domain("Kubernetes")
            .with_spec("Helm")],
        standards: BTreeSet::from([Standard::Iso21502]),
        ..Default::default()
    };
    let calculation = Calculation {
        result: calculate(config, &inputs),
        radar: calc_radar_values(config, &inputs),
        inputs,
        ts: chrono::Utc::now(),
    };

    let json = export::to_json(&calculation).unwrap();
    let parsed = export::parse_json(&json).unwrap();
    assert_eq!(parsed.result, calculation.result);
    assert_eq!(parsed.radar, calculation.radar);
    assert_eq!(parsed.inputs, calculation.inputs);
}
