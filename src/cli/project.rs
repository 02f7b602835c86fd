//! Project files and command-line overrides
//!
//! A project file holds [`EstimationInputs`] fields (camelCase keys) plus an
//! optional explicit artifact selection. TOML, JSON and YAML are accepted,
//! picked by file extension.

use crate::models::{
    AiModel, CompetencyFramework, Constraint, EstimationInputs, Grade, Methodology, PmoType,
    ProjectClassification, RiskFramework, RoleType, Standard, TeamRole,
};
use anyhow::{bail, Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of a project file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFile {
    #[serde(flatten)]
    pub inputs: EstimationInputs,

    /// Checked artifact ids. When absent the recommended artifacts are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_artifacts: Option<Vec<String>>,
}

impl ProjectFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let project = match ext.as_deref() {
            Some("toml") => toml::from_str(&content).context("Failed to parse TOML project file")?,
            Some("json") => {
                serde_json::from_str(&content).context("Failed to parse JSON project file")?
            }
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&content).context("Failed to parse YAML project file")?
            }
            _ => bail!(
                "Unsupported project file '{}': expected .toml, .json, .yaml or .yml",
                path.display()
            ),
        };
        tracing::debug!(path = %path.display(), "loaded project file");
        Ok(project)
    }
}

/// Classification flags shared by `artifacts` and `calculate`
#[derive(Args, Debug, Clone, Default)]
pub struct ClassificationArgs {
    /// Delivery methodology
    #[arg(short, long, value_enum)]
    pub methodology: Option<Methodology>,

    /// PMO type
    #[arg(long, value_enum)]
    pub pmo: Option<PmoType>,

    /// Project management standard (repeatable)
    #[arg(long = "standard", value_enum)]
    pub standards: Vec<Standard>,

    /// Risk framework (repeatable)
    #[arg(long = "risk", value_enum)]
    pub risk_frameworks: Vec<RiskFramework>,

    /// PM competency framework
    #[arg(long, value_enum)]
    pub competency: Option<CompetencyFramework>,
}

impl ClassificationArgs {
    /// Overlay the flags on a classification. Repeatable flags replace the
    /// whole set when given at least once; repeats collapse.
    pub fn apply_to(&self, c: &mut ProjectClassification) {
        if let Some(m) = self.methodology {
            c.methodology = m;
        }
        if let Some(p) = self.pmo {
            c.pmo_type = p;
        }
        if !self.standards.is_empty() {
            c.standards = self.standards.iter().copied().collect();
        }
        if !self.risk_frameworks.is_empty() {
            c.risk_frameworks = self.risk_frameworks.iter().copied().collect();
        }
        if let Some(cf) = self.competency {
            c.competency_framework = cf;
        }
    }
}

/// Numeric and team flags for `calculate`
#[derive(Args, Debug, Clone, Default)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub classification: ClassificationArgs,

    /// Base project size in person-hours
    #[arg(short = 'e', long)]
    pub base_effort: Option<f64>,

    /// Project manager grade
    #[arg(long, value_enum)]
    pub pm_grade: Option<Grade>,

    /// AI model assisting the team (repeatable)
    #[arg(long = "ai", value_enum)]
    pub ai_models: Vec<AiModel>,

    /// Constraint fixed by the customer (repeatable)
    #[arg(long = "fixed", value_enum)]
    pub fixed_constraints: Vec<Constraint>,

    /// Team role as TYPE[:GRADE[:COUNT]], e.g. backend:senior:2 (repeatable)
    #[arg(long = "role", value_parser = parse_role)]
    pub roles: Vec<TeamRole>,

    /// Working days per week
    #[arg(long)]
    pub work_days: Option<u32>,

    /// Team availability in percent of an 8-hour day
    #[arg(long)]
    pub availability: Option<f64>,

    /// Known-risk reserve in percent
    #[arg(long)]
    pub known_risk: Option<f64>,

    /// Management reserve in percent
    #[arg(long)]
    pub management: Option<f64>,

    /// Edge-case buffer in percent
    #[arg(long)]
    pub edge_case: Option<f64>,
}

impl EstimateArgs {
    pub fn apply_to(&self, inputs: &mut EstimationInputs) {
        let mut classification = inputs.classification();
        self.classification.apply_to(&mut classification);
        inputs.methodology = classification.methodology;
        inputs.pmo_type = classification.pmo_type;
        inputs.standards = classification.standards;
        inputs.risk_frameworks = classification.risk_frameworks;
        inputs.competency_framework = classification.competency_framework;

        if let Some(v) = self.base_effort {
            inputs.base_effort = v;
        }
        if let Some(g) = self.pm_grade {
            inputs.pm_grade = g;
        }
        if !self.ai_models.is_empty() {
            inputs.ai_models = self.ai_models.iter().copied().collect();
        }
        if !self.fixed_constraints.is_empty() {
            inputs.fixed_constraints = self.fixed_constraints.iter().copied().collect();
        }
        if !self.roles.is_empty() {
            inputs.team_roles = self.roles.clone();
        }
        if let Some(v) = self.work_days {
            inputs.work_days_week = v;
        }
        if let Some(v) = self.availability {
            inputs.team_availability = v;
        }
        if let Some(v) = self.known_risk {
            inputs.known_risk_reserve = v;
        }
        if let Some(v) = self.management {
            inputs.management_reserve = v;
        }
        if let Some(v) = self.edge_case {
            inputs.edge_case_buffer = v;
        }
    }
}

/// Parse `TYPE[:GRADE[:COUNT]]`
pub fn parse_role(s: &str) -> Result<TeamRole, String> {
    let mut parts = s.split(':');
    let role_type: RoleType = parts
        .next()
        .unwrap_or_default()
        .parse()
        .map_err(|e: crate::models::UnknownKey| e.to_string())?;
    let grade = match parts.next() {
        Some(g) => g.parse().map_err(|e: crate::models::UnknownKey| e.to_string())?,
        None => Grade::default(),
    };
    let count = match parts.next() {
        Some(c) => c
            .trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid role count '{}'", c))?,
        None => 1,
    };
    if parts.next().is_some() {
        return Err(format!("expected TYPE[:GRADE[:COUNT]], got '{}'", s));
    }
    Ok(TeamRole::new(role_type, grade, count))
}
