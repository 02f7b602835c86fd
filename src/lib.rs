// pwb-estimate - Project estimation engine
// Artifact recommendations, effort/duration estimates and constraint radar

pub mod cli;
pub mod config;
pub mod engine;
pub mod export;
pub mod models;
pub mod validator;

pub use anyhow::{Context, Result};

// Re-export commonly used types
pub use config::{ConfigError, ConfigTable};
pub use engine::{build_artifacts, calc_radar_values, calculate};
pub use export::ExportError;
pub use models::{
    ArtifactRecommendation, Calculation, EstimationInputs, EstimationResult,
    ProjectClassification, RadarProfile,
};
pub use validator::{calculate_checked, validate_inputs, validate_team_domains, EstimateError};
