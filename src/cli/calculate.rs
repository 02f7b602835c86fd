//! `pwb calculate`: the orchestration the web form used to do
//!
//! Inputs come from a project file, then flags, then defaults. The artifact
//! count fed to the calculator is, in order of precedence: the
//! `--selected-artifacts` flag, the project's `selectedArtifacts` list applied
//! to a fresh recommendation, or the recommendation's own checked count.

use super::project::{EstimateArgs, ProjectFile};
use super::render;
use crate::config::ConfigTable;
use crate::engine;
use crate::export;
use crate::models::{Calculation, EstimationInputs, TeamRole};
use crate::validator::{self, ValidationError};
use crate::Result;
use anyhow::Context;
use chrono::Utc;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Everything `calculate` needs besides the config
#[derive(Debug, Default)]
pub struct CalculateOptions {
    pub project: Option<PathBuf>,
    pub args: EstimateArgs,
    pub selected_artifacts: Option<u32>,
    pub json: bool,
    pub export_json: Option<PathBuf>,
    pub export_csv: Option<PathBuf>,
}

/// Inputs ready for the calculator, plus what was noticed on the way
#[derive(Debug)]
pub struct PreparedInputs {
    pub inputs: EstimationInputs,
    /// Ids in the project's selection that are not in the catalog
    pub unknown_artifacts: Vec<String>,
    /// True when the team was empty and the default role was added
    pub default_team: bool,
}

/// Merge project file, flags and defaults into calculator inputs
pub fn prepare_inputs(
    config: &ConfigTable,
    project: Option<&Path>,
    args: &EstimateArgs,
    selected_artifacts: Option<u32>,
) -> Result<PreparedInputs> {
    let (mut inputs, selection) = match project {
        Some(path) => {
            let file = ProjectFile::load(path)?;
            (file.inputs, file.selected_artifacts)
        }
        None => (EstimationInputs::default(), None),
    };
    args.apply_to(&mut inputs);

    let default_team = inputs.team_roles.is_empty();
    if default_team {
        inputs.team_roles.push(TeamRole::default());
    }

    let mut artifacts = engine::build_artifacts(config, &inputs.classification());
    let mut unknown_artifacts = Vec::new();
    if let Some(ids) = &selection {
        unknown_artifacts = artifacts.apply_selection(ids);
    }
    inputs.selected_artifact_count = match selected_artifacts {
        Some(count) => count,
        None => u32::try_from(artifacts.selected_count())
            .context("Selected artifact count out of range")?,
    };

    Ok(PreparedInputs {
        inputs,
        unknown_artifacts,
        default_team,
    })
}

/// Validate and run both calculator passes.
///
/// Returns the calculation and any non-blocking warnings.
pub fn estimate(
    config: &ConfigTable,
    inputs: EstimationInputs,
) -> Result<(Calculation, Vec<ValidationError>)> {
    let warnings: Vec<ValidationError> = validator::validate_inputs(&inputs)
        .into_iter()
        .filter(|e| !e.is_blocking())
        .chain(validator::validate_team_domains(config, &inputs))
        .collect();
    let result = validator::calculate_checked(config, &inputs)?;
    let radar = engine::calc_radar_values(config, &inputs);

    Ok((
        Calculation {
            inputs,
            result,
            radar,
            ts: Utc::now(),
        },
        warnings,
    ))
}

pub fn run(config: &ConfigTable, opts: CalculateOptions) -> Result<()> {
    let prepared = prepare_inputs(
        config,
        opts.project.as_deref(),
        &opts.args,
        opts.selected_artifacts,
    )?;

    for id in &prepared.unknown_artifacts {
        eprintln!("{}", format!("⚠ Unknown artifact '{}' ignored", id).yellow());
    }
    if prepared.default_team {
        eprintln!(
            "{}",
            "⚠ No team roles given, assuming one middle backend developer".yellow()
        );
    }

    let (calculation, warnings) = estimate(config, prepared.inputs)?;
    render::print_validation(&warnings);

    if let Some(path) = &opts.export_json {
        std::fs::write(path, export::to_json(&calculation)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    if let Some(path) = &opts.export_csv {
        std::fs::write(path, export::to_csv(config, &calculation))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    if opts.json {
        println!("{}", export::to_json(&calculation)?);
        return Ok(());
    }

    render::print_result(&calculation.result);
    render::print_radar(&calculation.radar);
    render::print_role_loading(&engine::role_loading(config, &calculation.inputs.team_roles));

    for path in opts.export_json.iter().chain(opts.export_csv.iter()) {
        println!("\n{} {}", "✅ Exported".green(), path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::project::ClassificationArgs;
    use crate::models::{Constraint, Grade, Methodology, PmoType, RoleType, Standard};

    #[test]
    fn test_prepare_uses_recommended_count_by_default() {
        let prepared = prepare_inputs(ConfigTable::builtin(), None, &EstimateArgs::default(), None)
            .unwrap();
        // waterfall (7) + corporate governance/stage-gate (2)
        assert_eq!(prepared.inputs.selected_artifact_count, 9);
        assert!(!prepared.default_team);
    }

    #[test]
    fn test_prepare_flag_count_wins() {
        let prepared =
            prepare_inputs(ConfigTable::builtin(), None, &EstimateArgs::default(), Some(3))
                .unwrap();
        assert_eq!(prepared.inputs.selected_artifact_count, 3);
    }

    #[test]
    fn test_prepare_applies_project_selection() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        std::fs::write(
            &path,
            r#"{"methodology": "scrum", "pmoType": "small", "teamRoles": [],
                "selectedArtifacts": ["backlog", "charter", "nope"]}"#,
        )
        .unwrap();

        let prepared =
            prepare_inputs(ConfigTable::builtin(), Some(&path), &EstimateArgs::default(), None)
                .unwrap();
        assert_eq!(prepared.inputs.methodology, Methodology::Scrum);
        assert_eq!(prepared.inputs.pmo_type, PmoType::Small);
        assert_eq!(prepared.inputs.selected_artifact_count, 2);
        assert_eq!(prepared.unknown_artifacts, vec!["nope".to_string()]);
        assert!(prepared.default_team);
        assert_eq!(prepared.inputs.headcount(), 1);
    }

    #[test]
    fn test_estimate_rejects_invalid_inputs() {
        let inputs = EstimationInputs {
            work_days_week: 0,
            ..Default::default()
        };
        let err = estimate(ConfigTable::builtin(), inputs).unwrap_err();
        assert!(err.to_string().contains("workDaysWeek"));
    }

    #[test]
    fn test_repeated_flags_count_once() {
        let once = EstimateArgs {
            fixed_constraints: vec![Constraint::Scope],
            classification: ClassificationArgs {
                standards: vec![Standard::Iso10006],
                ..Default::default()
            },
            ..Default::default()
        };
        let twice = EstimateArgs {
            fixed_constraints: vec![Constraint::Scope, Constraint::Scope],
            classification: ClassificationArgs {
                standards: vec![Standard::Iso10006, Standard::Iso10006],
                ..Default::default()
            },
            ..Default::default()
        };
        let config = ConfigTable::builtin();
        let once = prepare_inputs(config, None, &once, None).unwrap().inputs;
        let twice = prepare_inputs(config, None, &twice, None).unwrap().inputs;
        assert_eq!(twice, once);

        let (a, _) = estimate(config, once).unwrap();
        let (b, _) = estimate(config, twice).unwrap();
        assert_eq!(b.result, a.result);
        assert_eq!(b.radar, a.radar);
    }

    #[test]
    fn test_estimate_rejects_overflowing_team() {
        let inputs = EstimationInputs {
            team_roles: vec![
                TeamRole::new(RoleType::Qa, Grade::Middle, 3_000_000_000),
                TeamRole::new(RoleType::Qa, Grade::Middle, 3_000_000_000),
            ],
            ..Default::default()
        };
        let err = estimate(ConfigTable::builtin(), inputs).unwrap_err();
        assert!(err.to_string().contains("teamRoles[0].count"));
    }

    #[test]
    fn test_estimate_warns_on_unlisted_domain() {
        let inputs = EstimationInputs {
            team_roles: vec![TeamRole::new(RoleType::Mobile, Grade::Middle, 1).with_domain("Web")],
            ..Default::default()
        };
        let (_, warnings) = estimate(ConfigTable::builtin(), inputs).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, "teamRoles[0].domain");
    }

    #[test]
    fn test_run_writes_exports() {
        let dir = tempfile::TempDir::new().unwrap();
        let json_path = dir.path().join("estimate.json");
        let csv_path = dir.path().join("estimate.csv");
        let opts = CalculateOptions {
            export_json: Some(json_path.clone()),
            export_csv: Some(csv_path.clone()),
            json: true,
            ..Default::default()
        };
        run(ConfigTable::builtin(), opts).unwrap();

        let calc = export::parse_json(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(calc.inputs.selected_artifact_count, 9);
        let csv = std::fs::read_to_string(&csv_path).unwrap();
        assert!(csv.starts_with("Parameter,Value\n"));
    }
}
