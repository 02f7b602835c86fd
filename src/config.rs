//! Coefficient tables and taxonomies
//!
//! The built-in table is constructed once per process and never mutated.
//! A TOML file may override any section; sections it omits keep the
//! built-in values. Lookups never fail: a key missing from an overridden
//! section resolves to a neutral factor.

use crate::models::{
    AiModel, ArtifactDef, CompetencyFramework, Grade, Methodology, Phase, PmoType, RoleType,
    Standard,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Default project-local config file name
pub const CONFIG_FILE_NAME: &str = "pwb.toml";

/// Neutral multiplier for any missing coefficient
const NEUTRAL: f64 = 1.0;

/// Methodology risk used by the radar when the table has no entry
const DEFAULT_METHODOLOGY_RISK: f64 = 20.0;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config value {name} = {value}: {expected}")]
    InvalidValue {
        name: String,
        value: f64,
        expected: &'static str,
    },
}

/// All coefficients, labels and catalogs the engines read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigTable {
    /// Effort multiplier per methodology
    pub methodology_coeffs: BTreeMap<Methodology, f64>,

    /// Base risk per methodology (0-35), radar only
    pub methodology_risk: BTreeMap<Methodology, f64>,

    pub pmo_coeffs: BTreeMap<PmoType, f64>,

    /// Applied to the PM grade and to every team role grade
    pub grade_coeffs: BTreeMap<Grade, f64>,

    pub competency_coeffs: BTreeMap<CompetencyFramework, f64>,

    pub ai_coeffs: BTreeMap<AiModel, f64>,

    pub standard_coeffs: BTreeMap<Standard, f64>,

    /// Overhead fraction added per selected artifact
    pub artifact_time_coeff: f64,

    pub role_complexity: BTreeMap<RoleType, f64>,

    pub role_labels: BTreeMap<RoleType, String>,

    /// Expertise domains offered per role
    pub role_domains: BTreeMap<RoleType, Vec<String>>,

    /// Artifact ids recommended by default for each methodology
    pub methodology_artifacts: BTreeMap<Methodology, Vec<String>>,

    /// Artifact catalog by phase
    pub artifacts: BTreeMap<Phase, Vec<ArtifactDef>>,
}

impl Default for ConfigTable {
    fn default() -> Self {
        Self::builtin().clone()
    }
}

impl ConfigTable {
    /// The built-in table, shared by the whole process
    pub fn builtin() -> &'static ConfigTable {
        static BUILTIN: OnceLock<ConfigTable> = OnceLock::new();
        BUILTIN.get_or_init(builtin_table)
    }

    /// Parse a (possibly partial) TOML override.
    ///
    /// Multipliers must be positive and the artifact coefficient and
    /// methodology risks non-negative; anything else is rejected.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.check()?;
        Ok(config)
    }

    /// Reject coefficients the calculator cannot use
    pub fn check(&self) -> Result<(), ConfigError> {
        check_section("methodology_coeffs", &self.methodology_coeffs, POSITIVE)?;
        check_section("methodology_risk", &self.methodology_risk, NON_NEGATIVE)?;
        check_section("pmo_coeffs", &self.pmo_coeffs, POSITIVE)?;
        check_section("grade_coeffs", &self.grade_coeffs, POSITIVE)?;
        check_section("competency_coeffs", &self.competency_coeffs, POSITIVE)?;
        check_section("ai_coeffs", &self.ai_coeffs, POSITIVE)?;
        check_section("standard_coeffs", &self.standard_coeffs, POSITIVE)?;
        check_section("role_complexity", &self.role_complexity, POSITIVE)?;
        check_value("artifact_time_coeff", self.artifact_time_coeff, NON_NEGATIVE)
    }

    /// Load an override file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config override");
        Ok(config)
    }

    /// Resolve the effective table: an explicit path, else `pwb.toml` in
    /// `project_root` if present, else the built-in table.
    pub fn discover(explicit: Option<&Path>, project_root: &Path) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let local = project_root.join(CONFIG_FILE_NAME);
        if local.exists() {
            return Self::load(&local);
        }
        Ok(Self::builtin().clone())
    }

    /// Pretty TOML of the whole table, loadable as an override file
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Effort multiplier for a methodology
    pub fn methodology_coeff(&self, m: Methodology) -> f64 {
        self.methodology_coeffs.get(&m).copied().unwrap_or(NEUTRAL)
    }

    /// Radar base risk for a methodology, 20 when unset
    pub fn methodology_risk(&self, m: Methodology) -> f64 {
        self.methodology_risk
            .get(&m)
            .copied()
            .unwrap_or(DEFAULT_METHODOLOGY_RISK)
    }

    /// Effort multiplier for a PMO type
    pub fn pmo_coeff(&self, p: PmoType) -> f64 {
        self.pmo_coeffs.get(&p).copied().unwrap_or(NEUTRAL)
    }

    /// Effort multiplier for a grade
    pub fn grade_coeff(&self, g: Grade) -> f64 {
        self.grade_coeffs.get(&g).copied().unwrap_or(NEUTRAL)
    }

    /// Effort multiplier for a competency framework
    pub fn competency_coeff(&self, c: CompetencyFramework) -> f64 {
        self.competency_coeffs.get(&c).copied().unwrap_or(NEUTRAL)
    }

    /// Effort multiplier for an AI model
    pub fn ai_coeff(&self, a: AiModel) -> f64 {
        self.ai_coeffs.get(&a).copied().unwrap_or(NEUTRAL)
    }

    /// Effort multiplier for a standard
    pub fn standard_coeff(&self, s: Standard) -> f64 {
        self.standard_coeffs.get(&s).copied().unwrap_or(NEUTRAL)
    }

    /// Complexity weight for a role
    pub fn role_complexity(&self, r: RoleType) -> f64 {
        self.role_complexity.get(&r).copied().unwrap_or(NEUTRAL)
    }

    /// Display label for a role, falling back to its key
    pub fn role_label(&self, r: RoleType) -> &str {
        self.role_labels
            .get(&r)
            .map(String::as_str)
            .unwrap_or_else(|| r.as_str())
    }

    /// Expertise domains for a role; "General" when none are configured
    pub fn role_domains(&self, r: RoleType) -> Vec<&str> {
        match self.role_domains.get(&r) {
            Some(domains) if !domains.is_empty() => domains.iter().map(String::as_str).collect(),
            _ => vec!["General"],
        }
    }

    /// Recommended artifact ids for a methodology (empty if not configured)
    pub fn recommended_artifacts(&self, m: Methodology) -> &[String] {
        self.methodology_artifacts
            .get(&m)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Accepted range of a numeric config value
#[derive(Clone, Copy)]
struct Range {
    min: f64,
    inclusive: bool,
    expected: &'static str,
}

const POSITIVE: Range = Range {
    min: 0.0,
    inclusive: false,
    expected: "must be a positive number",
};

const NON_NEGATIVE: Range = Range {
    min: 0.0,
    inclusive: true,
    expected: "must be zero or a positive number",
};

fn check_value(name: &str, value: f64, range: Range) -> Result<(), ConfigError> {
    let in_range = if range.inclusive {
        value >= range.min
    } else {
        value > range.min
    };
    if value.is_finite() && in_range {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        name: name.to_string(),
        value,
        expected: range.expected,
    })
}

fn check_section<K: std::fmt::Display>(
    section: &'static str,
    values: &BTreeMap<K, f64>,
    range: Range,
) -> Result<(), ConfigError> {
    values
        .iter()
        .try_for_each(|(key, value)| check_value(&format!("{}.{}", section, key), *value, range))
}

fn coeffs<K: Ord + Copy, const N: usize>(entries: [(K, f64); N]) -> BTreeMap<K, f64> {
    entries.into_iter().collect()
}

fn strings<K: Ord + Copy>(entries: &[(K, &[&str])]) -> BTreeMap<K, Vec<String>> {
    entries
        .iter()
        .map(|(k, values)| (*k, values.iter().map(|v| v.to_string()).collect()))
        .collect()
}

fn defs(entries: &[(&str, &str)]) -> Vec<ArtifactDef> {
    entries
        .iter()
        .map(|(id, name)| ArtifactDef::new(*id, *name))
        .collect()
}

fn builtin_table() -> ConfigTable {
    use Methodology as M;
    use RoleType as R;

    ConfigTable {
        methodology_coeffs: coeffs([
            (M::Waterfall, 1.00),
            (M::Scrum, 0.85),
            (M::Kanban, 0.90),
            (M::Safe, 1.30),
            (M::Lean, 0.88),
            (M::Scrumban, 0.87),
            (M::Prince2, 1.20),
            (M::Pm2, 1.10),
            (M::Hybrid, 0.95),
        ]),
        methodology_risk: coeffs([
            (M::Waterfall, 25.0),
            (M::Scrum, 18.0),
            (M::Kanban, 15.0),
            (M::Safe, 30.0),
            (M::Lean, 18.0),
            (M::Scrumban, 18.0),
            (M::Prince2, 22.0),
            (M::Pm2, 20.0),
            (M::Hybrid, 22.0),
        ]),
        pmo_coeffs: coeffs([(PmoType::Small, 0.85), (PmoType::Corporate, 1.25)]),
        grade_coeffs: coeffs([
            (Grade::Junior, 1.20),
            (Grade::Middle, 1.00),
            (Grade::Senior, 0.85),
        ]),
        competency_coeffs: coeffs([
            (CompetencyFramework::None, 1.00),
            (CompetencyFramework::Icb, 0.95),
            (CompetencyFramework::Pmcd, 0.93),
            (CompetencyFramework::Ocb, 0.90),
            (CompetencyFramework::Icm, 0.88),
        ]),
        ai_coeffs: coeffs([
            (AiModel::Lstm, 0.90),
            (AiModel::Cnn, 0.95),
            (AiModel::Gru, 0.92),
            (AiModel::Mlp, 0.88),
            (AiModel::Rnn, 0.93),
        ]),
        standard_coeffs: coeffs([
            (Standard::Iso21502, 1.15),
            (Standard::Iso21504, 1.20),
            (Standard::Iso10006, 1.10),
        ]),
        artifact_time_coeff: 0.010,
        role_complexity: coeffs([
            (R::Frontend, 1.0),
            (R::Backend, 1.1),
            (R::Fullstack, 1.15),
            (R::Qa, 0.8),
            (R::Devops, 1.2),
            (R::Analyst, 0.9),
            (R::Designer, 0.8),
            (R::Pm, 1.0),
            (R::Architect, 1.3),
            (R::Security, 1.2),
            (R::Data, 1.1),
            (R::Mobile, 1.1),
        ]),
        role_labels: [
            (R::Frontend, "Frontend Developer"),
            (R::Backend, "Backend Developer"),
            (R::Fullstack, "Fullstack Developer"),
            (R::Qa, "QA Engineer"),
            (R::Devops, "DevOps / Infra"),
            (R::Analyst, "Business Analyst"),
            (R::Designer, "UX/UI Designer"),
            (R::Pm, "Project Manager"),
            (R::Architect, "Software Architect"),
            (R::Security, "Security Engineer"),
            (R::Data, "Data Engineer"),
            (R::Mobile, "Mobile Developer"),
        ]
        .into_iter()
        .map(|(r, label)| (r, label.to_string()))
        .collect(),
        role_domains: strings(&[
            (R::Frontend, &["Web", "Mobile Web", "Desktop (Electron)"]),
            (R::Backend, &["API / REST", "Microservices", "Monolith", "GraphQL"]),
            (R::Fullstack, &["Web", "Mobile", "SaaS"]),
            (R::Qa, &["Manual", "Automation", "Performance", "Security"]),
            (R::Devops, &["CI/CD", "Cloud (AWS/GCP/Azure)", "On-premise", "Kubernetes"]),
            (R::Analyst, &["Business", "System", "Data", "Process"]),
            (R::Designer, &["Product Design", "UX Research", "UI/Visual"]),
            (R::Pm, &["IT Projects", "Product", "Enterprise", "Agile Coaching"]),
            (R::Architect, &["Solution", "Enterprise", "Data", "Security"]),
            (R::Security, &["AppSec", "Cloud Security", "Compliance"]),
            (R::Data, &["Analytics", "ML/AI", "Data Engineering", "BI"]),
            (R::Mobile, &["iOS", "Android", "Cross-platform (RN/Flutter)"]),
        ]),
        methodology_artifacts: strings(&[
            (
                M::Waterfall,
                &["wbs", "schedule", "baseline", "pm-plan", "budget", "risk-register", "comm-plan"],
            ),
            (M::Scrum, &["backlog", "dod", "pm-plan", "burndown", "performance"]),
            (M::Kanban, &["board", "wip-limits", "service-levels", "cumulative-flow"]),
            (M::Safe, &["pi-planning", "program-backlog", "system-demo", "inspect-adapt"]),
            (M::Lean, &["value-stream-map", "kaizen-board", "wip-limits"]),
            (M::Scrumban, &["board", "backlog", "wip-limits", "burndown"]),
            (
                M::Prince2,
                &["business-case", "pm-plan", "baseline", "stage-gate", "risk-register"],
            ),
            (M::Pm2, &["pm-plan", "schedule", "budget", "risk-register", "comm-plan"]),
            (M::Hybrid, &["backlog", "dod", "schedule", "pm-plan", "burndown"]),
        ]),
        artifacts: [
            (
                Phase::Initiation,
                defs(&[
                    ("charter", "Project Charter"),
                    ("stakeholders", "Stakeholder Register"),
                    ("business-case", "Business Case"),
                    ("feasibility", "Feasibility Study"),
                    ("governance", "Governance Framework"),
                    ("competency-assessment", "Competency Assessment"),
                ]),
            ),
            (
                Phase::Planning,
                defs(&[
                    ("pm-plan", "Project Management Plan"),
                    ("wbs", "WBS (Work Breakdown Structure)"),
                    ("schedule", "Project Schedule"),
                    ("budget", "Project Budget"),
                    ("risk-register", "Risk Register"),
                    ("comm-plan", "Communications Plan"),
                    ("baseline", "Baseline Plan"),
                    ("backlog", "Product Backlog"),
                    ("dod", "Definition of Done"),
                    ("board", "Kanban Board"),
                    ("wip-limits", "WIP Limits"),
                    ("pi-planning", "PI Planning"),
                    ("program-backlog", "Program Backlog"),
                    ("value-stream-map", "Value Stream Map"),
                    ("risk-mitigation", "Risk Mitigation Plan"),
                    ("service-levels", "Service Level Agreements"),
                ]),
            ),
            (
                Phase::Execution,
                defs(&[
                    ("deliverables", "Product Deliverables"),
                    ("change-log", "Change Log"),
                    ("quality-audit", "Quality Audit"),
                    ("team-training", "Team Training Plan"),
                    ("quality-plan", "Quality Management Plan"),
                    ("system-demo", "System Demo"),
                    ("kaizen-board", "Kaizen Board"),
                ]),
            ),
            (
                Phase::Monitoring,
                defs(&[
                    ("status-report", "Status Report"),
                    ("performance", "Performance Metrics"),
                    ("risk-monitoring", "Risk Monitoring"),
                    ("stakeholder-engagement", "Stakeholder Engagement Matrix"),
                    ("burndown", "Burndown Chart"),
                    ("stage-gate", "Stage Gate Reviews"),
                    ("cumulative-flow", "Cumulative Flow Diagram"),
                    ("inspect-adapt", "Inspect & Adapt"),
                ]),
            ),
            (
                Phase::Closing,
                defs(&[
                    ("final-report", "Final Report"),
                    ("lessons-learned", "Lessons Learned"),
                    ("handover", "Handover Certificate"),
                    ("archive", "Documentation Archive"),
                ]),
            ),
        ]
        .into_iter()
        .collect(),
    }
}
