pub mod artifact;
pub mod estimate;
pub mod taxonomy;

pub use artifact::{Artifact, ArtifactDef, ArtifactRecommendation};
pub use estimate::{
    team_headcount, Calculation, EstimationInputs, EstimationResult, ProjectClassification,
    RadarProfile, RoleLoading, TeamRole,
};
pub use taxonomy::{
    AiModel, CompetencyFramework, Constraint, Grade, Methodology, Phase, PmoType, RiskFramework,
    RoleType, Standard, UnknownKey,
};
