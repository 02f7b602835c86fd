//! Estimation engines
//!
//! The recommendation and calculator engines are independent of each other;
//! callers compose them by passing the recommendation's selected count into
//! [`EstimationInputs::selected_artifact_count`](crate::models::EstimationInputs).

pub mod calculator;
pub mod recommendation;

pub use calculator::{calc_radar_values, calculate, calibration_factor, role_loading};
pub use recommendation::build_artifacts;
