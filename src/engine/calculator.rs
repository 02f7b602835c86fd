//! Effort, duration and constraint-radar calculator
//!
//! Both entry points are total: unknown coefficients resolve to a neutral
//! factor and an empty team skips the team weighting. Numeric preconditions
//! (positive base effort, workdays in 1..=7, ...) are checked by
//! [`crate::validator`], not here.

use crate::config::ConfigTable;
use crate::models::{
    team_headcount, Constraint, EstimationInputs, EstimationResult, Methodology, PmoType,
    RadarProfile, RoleLoading, Standard, TeamRole,
};

/// Working hours in a full day
const HOURS_PER_DAY: f64 = 8.0;

/// Symmetric base uncertainty around the estimate
const BASE_UNCERTAINTY: f64 = 0.30;

/// Extra padding applied on top of the base uncertainty. Asymmetric on
/// purpose: optimistic is ~59.5% and pessimistic ~149.5% of the base.
const OPTIMISTIC_PADDING: f64 = 0.85;
const PESSIMISTIC_PADDING: f64 = 1.15;

/// Compute effort and duration.
pub fn calculate(config: &ConfigTable, inputs: &EstimationInputs) -> EstimationResult {
    let mut effort = inputs.base_effort;

    effort *= config.methodology_coeff(inputs.methodology);
    effort *= config.pmo_coeff(inputs.pmo_type);
    effort *= config.grade_coeff(inputs.pm_grade);
    effort *= config.competency_coeff(inputs.competency_framework);
    tracing::debug!(effort, "after project coefficients");

    for model in &inputs.ai_models {
        effort *= config.ai_coeff(*model);
    }
    for standard in &inputs.standards {
        effort *= config.standard_coeff(*standard);
    }

    let headcount = team_headcount(&inputs.team_roles);
    if let Some(factor) = team_factor(config, &inputs.team_roles) {
        effort *= factor;
        tracing::debug!(factor, headcount, "applied team weighting");
    }

    effort *= 1.0 + f64::from(inputs.selected_artifact_count) * config.artifact_time_coeff;

    let known_risk = effort * (inputs.known_risk_reserve / 100.0);
    let management = effort * (inputs.management_reserve / 100.0);
    let edge_case = effort * (inputs.edge_case_buffer / 100.0);
    let total = effort + known_risk + management + edge_case;

    let hours_per_day = (inputs.team_availability / 100.0) * HOURS_PER_DAY;
    let hours_per_week = hours_per_day * f64::from(inputs.work_days_week);
    let active_people = headcount.max(1) as f64;
    let weeks = total / (hours_per_week * active_people);
    let days = round(weeks * f64::from(inputs.work_days_week));

    let optimistic = round(days as f64 * (1.0 - BASE_UNCERTAINTY) * OPTIMISTIC_PADDING);
    let pessimistic = round(days as f64 * (1.0 + BASE_UNCERTAINTY) * PESSIMISTIC_PADDING);

    let result = EstimationResult {
        effort: round(effort),
        total_effort: round(total),
        duration: days,
        optimistic,
        base: days,
        pessimistic,
    };
    tracing::debug!(?result, "calculated estimate");
    result
}

/// Headcount-weighted average of grade × role complexity.
/// `None` when the team has no people.
fn team_factor(config: &ConfigTable, roles: &[TeamRole]) -> Option<f64> {
    let (weight, people) = roles.iter().fold((0.0, 0u64), |(weight, people), role| {
        let w = f64::from(role.count)
            * config.grade_coeff(role.grade)
            * config.role_complexity(role.role_type);
        (weight + w, people + u64::from(role.count))
    });
    (people > 0).then(|| weight / people as f64)
}

/// Compute the five-axis constraint radar.
pub fn calc_radar_values(config: &ConfigTable, inputs: &EstimationInputs) -> RadarProfile {
    let artifacts = f64::from(inputs.selected_artifact_count);
    let fixed = |c: Constraint| inputs.is_fixed(c);
    let bonus = |c: Constraint, points: f64| if fixed(c) { points } else { 0.0 };

    let uncertainty = 15.0
        + config.methodology_risk(inputs.methodology) * 0.4
        + inputs.fixed_constraints.len() as f64 * 5.0
        + (artifacts * 0.4).min(10.0);

    let scope = 20.0 + (artifacts * 0.8).min(20.0) + bonus(Constraint::Scope, 20.0);

    let pmo_cost = if inputs.pmo_type == PmoType::Corporate {
        10.0
    } else {
        3.0
    };
    let cost = 20.0
        + pmo_cost
        + inputs.standards.len() as f64 * 4.0
        + bonus(Constraint::Cost, 15.0);

    let standards_quality = if inputs.standards.contains(&Standard::Iso10006) {
        15.0
    } else {
        inputs.standards.len() as f64 * 5.0
    };
    let quality = 25.0 + standards_quality + bonus(Constraint::Quality, 15.0);

    let methodology_time = match inputs.methodology {
        Methodology::Waterfall => 8.0,
        Methodology::Scrum => -4.0,
        _ => 0.0,
    };
    let time = 22.0 + methodology_time + bonus(Constraint::Time, 18.0);

    RadarProfile {
        uncertainty: axis(uncertainty, 0.0, 80.0),
        scope: axis(scope, 0.0, 75.0),
        cost: axis(cost, 0.0, 75.0),
        quality: axis(quality, 0.0, 75.0),
        time: axis(time, 5.0, 75.0),
    }
}

/// Ratio of actual to estimated duration, to be used as a multiplier on the
/// base effort of future estimates. `None` unless both values are positive.
pub fn calibration_factor(actual_days: f64, estimated_days: f64) -> Option<f64> {
    (actual_days > 0.0 && estimated_days > 0.0).then(|| actual_days / estimated_days)
}

/// Per-role share of the team headcount
pub fn role_loading(config: &ConfigTable, roles: &[TeamRole]) -> Vec<RoleLoading> {
    let total = team_headcount(roles).max(1) as f64;
    roles
        .iter()
        .map(|role| RoleLoading {
            label: config.role_label(role.role_type).to_string(),
            domain: role.domain.clone().filter(|d| !d.is_empty()),
            spec: role.spec.clone().filter(|s| !s.is_empty()),
            grade: role.grade,
            count: role.count,
            percent: (f64::from(role.count) / total * 100.0).round() as u32,
        })
        .collect()
}

fn round(value: f64) -> i64 {
    value.round() as i64
}

/// Clamp to the axis range (itself within 0..=100) and round
fn axis(value: f64, min: f64, max: f64) -> u8 {
    value.clamp(min, max).clamp(0.0, 100.0).round() as u8
}
