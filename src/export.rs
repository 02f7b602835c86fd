//! JSON and CSV export of calculations
//!
//! The JSON export is the full [`Calculation`] record. The CSV export is a
//! two-column `Parameter,Value` listing meant for spreadsheets; its row order
//! is fixed.

use crate::config::ConfigTable;
use crate::models::{Calculation, EstimationResult, RadarProfile, TeamRole};

/// Keys of the flat result listing, in export order
const RESULT_KEYS: [&str; 6] = [
    "effort",
    "totalEffort",
    "duration",
    "optimistic",
    "base",
    "pessimistic",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: expected 'key,value'")]
    MalformedRow { line: usize },

    #[error("line {line}: unknown key '{key}'")]
    UnknownKey { line: usize, key: String },

    #[error("line {line}: '{value}' is not a whole number")]
    InvalidNumber { line: usize, value: String },

    #[error("missing key '{0}'")]
    MissingKey(&'static str),
}

/// Pretty-printed JSON of a calculation
pub fn to_json(calculation: &Calculation) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(calculation)?)
}

pub fn parse_json(content: &str) -> Result<Calculation, ExportError> {
    Ok(serde_json::from_str(content)?)
}

/// Spreadsheet-friendly summary of a calculation
pub fn to_csv(config: &ConfigTable, calculation: &Calculation) -> String {
    let Calculation {
        inputs,
        result,
        radar,
        ..
    } = calculation;

    let team = inputs
        .team_roles
        .iter()
        .map(|r| team_entry(config, r))
        .collect::<Vec<_>>()
        .join("; ");

    let mut rows: Vec<(&str, String)> = vec![
        ("Methodology", inputs.methodology.to_string()),
        ("PMO", inputs.pmo_type.to_string()),
        ("Base effort (h)", inputs.base_effort.to_string()),
        ("Artifacts selected", inputs.selected_artifact_count.to_string()),
        ("Team", team),
        ("Total effort (h)", result.total_effort.to_string()),
        ("Duration (days)", result.duration.to_string()),
        ("Optimistic (days)", result.optimistic.to_string()),
        ("Base (days)", result.base.to_string()),
        ("Pessimistic (days)", result.pessimistic.to_string()),
    ];
    rows.extend(radar_rows(radar));

    let mut out = String::from("Parameter,Value\n");
    for (key, value) in rows {
        out.push_str(&format!("{},{}\n", escape(key), escape(&value)));
    }
    out
}

/// `Label · domain · spec(grade)×count`, skipping empty domain and spec
fn team_entry(config: &ConfigTable, role: &TeamRole) -> String {
    let mut label = config.role_label(role.role_type).to_string();
    for extra in [&role.domain, &role.spec].into_iter().flatten() {
        if !extra.is_empty() {
            label.push_str(" · ");
            label.push_str(extra);
        }
    }
    format!("{}({})×{}", label, role.grade, role.count)
}

fn radar_rows(radar: &RadarProfile) -> impl Iterator<Item = (&'static str, String)> {
    let labels = [
        "Radar - Uncertainty",
        "Radar - Scope",
        "Radar - Cost",
        "Radar - Quality",
        "Radar - Time",
    ];
    labels
        .into_iter()
        .zip(radar.axes())
        .map(|(label, (_, value))| (label, format!("{}%", value)))
}

/// Flat `key,value` listing of a result alone
pub fn result_to_csv(result: &EstimationResult) -> String {
    let values = [
        result.effort,
        result.total_effort,
        result.duration,
        result.optimistic,
        result.base,
        result.pessimistic,
    ];
    RESULT_KEYS
        .iter()
        .zip(values)
        .map(|(key, value)| format!("{},{}\n", key, value))
        .collect()
}

/// Parse the output of [`result_to_csv`]. Blank lines are ignored.
pub fn result_from_csv(content: &str) -> Result<EstimationResult, ExportError> {
    let mut values: [Option<i64>; 6] = [None; 6];

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let row = raw.trim();
        if row.is_empty() {
            continue;
        }
        let (key, value) = row
            .split_once(',')
            .ok_or(ExportError::MalformedRow { line })?;
        let key = key.trim();
        let slot = RESULT_KEYS
            .iter()
            .position(|k| *k == key)
            .ok_or_else(|| ExportError::UnknownKey {
                line,
                key: key.to_string(),
            })?;
        let value = value.trim();
        values[slot] = Some(value.parse().map_err(|_| ExportError::InvalidNumber {
            line,
            value: value.to_string(),
        })?);
    }

    let get = |i: usize| values[i].ok_or(ExportError::MissingKey(RESULT_KEYS[i]));
    Ok(EstimationResult {
        effort: get(0)?,
        total_effort: get(1)?,
        duration: get(2)?,
        optimistic: get(3)?,
        base: get(4)?,
        pessimistic: get(5)?,
    })
}

/// Quote a CSV field when it contains a separator, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
