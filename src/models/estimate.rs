//! Estimation inputs and results
//!
//! Field names serialize in camelCase so that project files and exported
//! estimates stay compatible with the calculator's earlier JSON exports.

use super::taxonomy::{
    AiModel, CompetencyFramework, Constraint, Grade, Methodology, PmoType, RiskFramework,
    RoleType, Standard,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Classification
// =============================================================================

/// Categorical inputs that drive artifact recommendations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectClassification {
    pub methodology: Methodology,
    pub pmo_type: PmoType,
    pub standards: BTreeSet<Standard>,
    pub risk_frameworks: BTreeSet<RiskFramework>,
    pub competency_framework: CompetencyFramework,
}

// =============================================================================
// Team
// =============================================================================

/// One line of the team composition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRole {
    #[serde(rename = "type")]
    pub role_type: RoleType,

    #[serde(default)]
    pub grade: Grade,

    #[serde(default = "default_role_count")]
    pub count: u32,

    /// Expertise domain (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Free-text specialization within the domain (display only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
}

fn default_role_count() -> u32 {
    1
}

impl TeamRole {
    pub fn new(role_type: RoleType, grade: Grade, count: u32) -> Self {
        Self {
            role_type,
            grade,
            count,
            domain: None,
            spec: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_spec(mut self, spec: impl Into<String>) -> Self {
        self.spec = Some(spec.into());
        self
    }
}

impl Default for TeamRole {
    fn default() -> Self {
        Self::new(RoleType::default(), Grade::default(), default_role_count())
    }
}

/// Total headcount across all roles. Summed wide so that no combination of
/// `u32` counts can overflow.
pub fn team_headcount(roles: &[TeamRole]) -> u64 {
    roles.iter().map(|r| u64::from(r.count)).sum()
}

// =============================================================================
// Inputs
// =============================================================================

/// Everything the calculator engine reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EstimationInputs {
    /// Base size of the project in person-hours
    pub base_effort: f64,
    pub methodology: Methodology,
    pub pmo_type: PmoType,
    pub pm_grade: Grade,
    pub competency_framework: CompetencyFramework,
    pub ai_models: BTreeSet<AiModel>,
    pub standards: BTreeSet<Standard>,
    /// Only used for recommendations, never in the arithmetic
    pub risk_frameworks: BTreeSet<RiskFramework>,
    pub fixed_constraints: BTreeSet<Constraint>,
    pub team_roles: Vec<TeamRole>,
    pub work_days_week: u32,
    /// Share of a working day spent on the project, in percent
    pub team_availability: f64,
    pub known_risk_reserve: f64,
    pub management_reserve: f64,
    pub edge_case_buffer: f64,
    /// Number of currently checked artifacts
    pub selected_artifact_count: u32,
}

impl Default for EstimationInputs {
    fn default() -> Self {
        Self {
            base_effort: 1000.0,
            methodology: Methodology::default(),
            pmo_type: PmoType::default(),
            pm_grade: Grade::default(),
            competency_framework: CompetencyFramework::default(),
            ai_models: BTreeSet::new(),
            standards: BTreeSet::new(),
            risk_frameworks: BTreeSet::new(),
            fixed_constraints: BTreeSet::new(),
            team_roles: vec![TeamRole::default()],
            work_days_week: 5,
            team_availability: 62.5,
            known_risk_reserve: 10.0,
            management_reserve: 5.0,
            edge_case_buffer: 15.0,
            selected_artifact_count: 0,
        }
    }
}

impl EstimationInputs {
    /// The subset of inputs the recommendation engine needs
    pub fn classification(&self) -> ProjectClassification {
        ProjectClassification {
            methodology: self.methodology,
            pmo_type: self.pmo_type,
            standards: self.standards.clone(),
            risk_frameworks: self.risk_frameworks.clone(),
            competency_framework: self.competency_framework,
        }
    }

    pub fn headcount(&self) -> u64 {
        team_headcount(&self.team_roles)
    }

    pub fn is_fixed(&self, constraint: Constraint) -> bool {
        self.fixed_constraints.contains(&constraint)
    }
}

// =============================================================================
// Results
// =============================================================================

/// Effort and duration estimate.
///
/// `duration` and `base` always hold the same value; both are kept because
/// exported files list both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimationResult {
    /// Effort after coefficients, in hours
    pub effort: i64,
    /// Effort plus all reserves, in hours
    pub total_effort: i64,
    /// Working days
    pub duration: i64,
    pub optimistic: i64,
    pub base: i64,
    pub pessimistic: i64,
}

/// Five-axis constraint profile, each axis a percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadarProfile {
    pub uncertainty: u8,
    pub scope: u8,
    pub cost: u8,
    pub quality: u8,
    pub time: u8,
}

impl RadarProfile {
    /// Axes in display order with their labels
    pub fn axes(&self) -> [(&'static str, u8); 5] {
        [
            ("Uncertainty", self.uncertainty),
            ("Scope", self.scope),
            ("Cost", self.cost),
            ("Quality", self.quality),
            ("Time", self.time),
        ]
    }
}

/// Share of the team taken by one role, for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleLoading {
    pub label: String,
    pub domain: Option<String>,
    pub spec: Option<String>,
    pub grade: Grade,
    pub count: u32,
    pub percent: u32,
}

/// A complete calculation as exported: inputs, outputs and when it ran
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub inputs: EstimationInputs,
    pub result: EstimationResult,
    pub radar: RadarProfile,
    pub ts: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_form_defaults() {
        let inputs = EstimationInputs::default();
        assert_eq!(inputs.base_effort, 1000.0);
        assert_eq!(inputs.work_days_week, 5);
        assert_eq!(inputs.team_availability, 62.5);
        assert_eq!(inputs.team_roles, vec![TeamRole::new(RoleType::Backend, Grade::Middle, 1)]);
        assert_eq!(inputs.methodology, Methodology::Waterfall);
        assert_eq!(inputs.pmo_type, PmoType::Corporate);
    }

    #[test]
    fn test_partial_inputs_fill_defaults() {
        let inputs: EstimationInputs = serde_json::from_str(
            r#"{"baseEffort": 400, "methodology": "scrum", "teamRoles": [{"type": "qa", "count": 2}]}"#,
        )
        .unwrap();
        assert_eq!(inputs.base_effort, 400.0);
        assert_eq!(inputs.methodology, Methodology::Scrum);
        assert_eq!(inputs.team_roles[0].grade, Grade::Middle);
        assert_eq!(inputs.headcount(), 2);
        assert_eq!(inputs.known_risk_reserve, 10.0);
    }

    #[test]
    fn test_result_serializes_in_export_order() {
        let result = EstimationResult {
            effort: 1250,
            total_effort: 1500,
            duration: 250,
            optimistic: 149,
            base: 250,
            pessimistic: 374,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(
            json,
            r#"{"effort":1250,"totalEffort":1500,"duration":250,"optimistic":149,"base":250,"pessimistic":374}"#
        );
    }

    #[test]
    fn test_classification_copies_categorical_fields() {
        let inputs = EstimationInputs {
            standards: BTreeSet::from([Standard::Iso10006]),
            risk_frameworks: BTreeSet::from([RiskFramework::Pramg]),
            competency_framework: CompetencyFramework::Icb,
            ..Default::default()
        };
        let c = inputs.classification();
        assert_eq!(c.standards, BTreeSet::from([Standard::Iso10006]));
        assert_eq!(c.risk_frameworks, BTreeSet::from([RiskFramework::Pramg]));
        assert_eq!(c.competency_framework, CompetencyFramework::Icb);
    }

    #[test]
    fn test_repeated_set_entries_collapse_on_load() {
        let inputs: EstimationInputs = serde_json::from_str(
            r#"{"standards": ["iso10006", "iso10006"], "fixedConstraints": ["scope", "scope"],
                "aiModels": ["lstm", "lstm", "gru"]}"#,
        )
        .unwrap();
        assert_eq!(inputs.standards.len(), 1);
        assert_eq!(inputs.fixed_constraints.len(), 1);
        assert_eq!(inputs.ai_models.len(), 2);
    }

    #[test]
    fn test_headcount_does_not_overflow() {
        let inputs = EstimationInputs {
            team_roles: vec![
                TeamRole::new(RoleType::Qa, Grade::Middle, u32::MAX),
                TeamRole::new(RoleType::Qa, Grade::Middle, u32::MAX),
            ],
            ..Default::default()
        };
        assert_eq!(inputs.headcount(), 2 * u64::from(u32::MAX));
    }
}
