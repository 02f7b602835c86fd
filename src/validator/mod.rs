//! Precondition checks for estimation inputs
//!
//! The calculator itself never fails. These checks let callers reject input
//! the arithmetic was not designed for (zero workdays, negative effort, ...)
//! before running it.

use crate::config::ConfigTable;
use crate::engine;
use crate::models::{EstimationInputs, EstimationResult};
use serde::{Deserialize, Serialize};

/// Largest headcount accepted for a single team role
pub const MAX_ROLE_COUNT: u32 = 50;

/// Severity level for validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Blocks calculation
    High,
    /// Calculation runs, result is probably not what the user meant
    Medium,
}

impl Severity {
    /// Display symbol for the severity
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::High => "🔴",
            Severity::Medium => "🟡",
        }
    }

    /// Upper-case label for the severity
    pub fn name(&self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
        }
    }
}

/// A problem with one input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Input field name as it appears in project files
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::High
    }

    /// Format error for display
    pub fn format(&self) -> String {
        format!(
            "{} [{}] {} - {}",
            self.severity.symbol(),
            self.severity.name(),
            self.field,
            self.message
        )
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("Invalid estimation input: {}", join_errors(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check every precondition and return all violations, most severe first.
pub fn validate_inputs(inputs: &EstimationInputs) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !inputs.base_effort.is_finite() || inputs.base_effort <= 0.0 {
        errors.push(ValidationError::new(
            "baseEffort",
            format!("must be a positive number of hours, got {}", inputs.base_effort),
            Severity::High,
        ));
    }

    if !(1..=7).contains(&inputs.work_days_week) {
        errors.push(ValidationError::new(
            "workDaysWeek",
            format!("must be between 1 and 7, got {}", inputs.work_days_week),
            Severity::High,
        ));
    }

    let availability = inputs.team_availability;
    if !availability.is_finite() || availability <= 0.0 || availability > 100.0 {
        errors.push(ValidationError::new(
            "teamAvailability",
            format!("must be a percentage in (0, 100], got {}", availability),
            Severity::High,
        ));
    }

    for (field, value) in [
        ("knownRiskReserve", inputs.known_risk_reserve),
        ("managementReserve", inputs.management_reserve),
        ("edgeCaseBuffer", inputs.edge_case_buffer),
    ] {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::new(
                field,
                format!("must be a non-negative percentage, got {}", value),
                Severity::High,
            ));
        } else if value > 100.0 {
            errors.push(ValidationError::new(
                field,
                format!("reserve of {}% exceeds the base effort", value),
                Severity::Medium,
            ));
        }
    }

    for (i, role) in inputs.team_roles.iter().enumerate() {
        if role.count == 0 {
            errors.push(ValidationError::new(
                format!("teamRoles[{}].count", i),
                "must be at least 1",
                Severity::High,
            ));
        } else if role.count > MAX_ROLE_COUNT {
            errors.push(ValidationError::new(
                format!("teamRoles[{}].count", i),
                format!("must be at most {}, got {}", MAX_ROLE_COUNT, role.count),
                Severity::High,
            ));
        }
    }

    if inputs.team_roles.is_empty() {
        errors.push(ValidationError::new(
            "teamRoles",
            "no team roles; duration assumes a single person and team weighting is skipped",
            Severity::Medium,
        ));
    }

    errors.sort_by_key(|e| e.severity != Severity::High);
    errors
}

/// Flag team roles whose expertise domain is not one the config offers for
/// that role. Free text is still accepted, so these are warnings only.
pub fn validate_team_domains(
    config: &ConfigTable,
    inputs: &EstimationInputs,
) -> Vec<ValidationError> {
    inputs
        .team_roles
        .iter()
        .enumerate()
        .filter_map(|(i, role)| {
            let domain = role.domain.as_deref().filter(|d| !d.is_empty())?;
            let offered = config.role_domains(role.role_type);
            (!offered.contains(&domain)).then(|| {
                ValidationError::new(
                    format!("teamRoles[{}].domain", i),
                    format!(
                        "'{}' is not a listed {} domain (expected one of: {})",
                        domain,
                        role.role_type,
                        offered.join(", ")
                    ),
                    Severity::Medium,
                )
            })
        })
        .collect()
}

/// Validate, then calculate. Fails only on blocking violations.
pub fn calculate_checked(
    config: &ConfigTable,
    inputs: &EstimationInputs,
) -> Result<EstimationResult, EstimateError> {
    let blocking: Vec<ValidationError> = validate_inputs(inputs)
        .into_iter()
        .filter(ValidationError::is_blocking)
        .collect();
    if !blocking.is_empty() {
        return Err(EstimateError::InvalidInput(blocking));
    }
    Ok(engine::calculate(config, inputs))
}
