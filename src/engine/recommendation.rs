//! Artifact recommendation engine
//!
//! Builds the phase-partitioned artifact checklist from a project
//! classification. The result is always rebuilt from the catalog: any
//! selection the user made on a previous recommendation is discarded. Callers
//! that want to keep a selection across rebuilds must re-apply it themselves
//! with [`ArtifactRecommendation::apply_selection`].

use crate::config::ConfigTable;
use crate::models::{
    ArtifactRecommendation, CompetencyFramework, Phase, PmoType, ProjectClassification,
    RiskFramework, Standard,
};

/// An artifact a rule adds on top of the methodology defaults
struct RuleTarget {
    phase: Phase,
    id: &'static str,
}

const CORPORATE_PMO: &[RuleTarget] = &[
    RuleTarget { phase: Phase::Initiation, id: "governance" },
    RuleTarget { phase: Phase::Monitoring, id: "stage-gate" },
];
const ISO_10006: &[RuleTarget] = &[RuleTarget { phase: Phase::Execution, id: "quality-plan" }];
const PRAMG: &[RuleTarget] = &[RuleTarget { phase: Phase::Planning, id: "risk-mitigation" }];
const COMPETENCY: &[RuleTarget] = &[RuleTarget {
    phase: Phase::Initiation,
    id: "competency-assessment",
}];

/// Build the artifact recommendation for a classification.
///
/// Every catalog artifact appears exactly once, with `checked` equal to
/// `recommended`. Pure: identical inputs give identical outputs.
pub fn build_artifacts(
    config: &ConfigTable,
    classification: &ProjectClassification,
) -> ArtifactRecommendation {
    let mut artifacts = ArtifactRecommendation::from_catalog(&config.artifacts);

    // Methodology defaults: full reset, not additive
    let base = config.recommended_artifacts(classification.methodology);
    for artifact in artifacts.iter_mut() {
        let recommended = base.iter().any(|id| *id == artifact.id);
        artifact.recommended = recommended;
        artifact.checked = recommended;
    }

    // Augmentation rules only ever add marks. Targets are disjoint, so the
    // order does not matter.
    if classification.pmo_type == PmoType::Corporate {
        apply_rule(&mut artifacts, "corporate-pmo", CORPORATE_PMO);
    }
    if classification.standards.contains(&Standard::Iso10006) {
        apply_rule(&mut artifacts, "iso10006", ISO_10006);
    }
    if classification.risk_frameworks.contains(&RiskFramework::Pramg) {
        apply_rule(&mut artifacts, "pramg", PRAMG);
    }
    if classification.competency_framework != CompetencyFramework::None {
        apply_rule(&mut artifacts, "competency-framework", COMPETENCY);
    }

    tracing::debug!(
        methodology = %classification.methodology,
        pmo = %classification.pmo_type,
        recommended = artifacts.recommended_count(),
        total = artifacts.total_count(),
        "built artifact recommendation"
    );

    artifacts
}

fn apply_rule(artifacts: &mut ArtifactRecommendation, rule: &str, targets: &[RuleTarget]) {
    for target in targets {
        // A target missing from the catalog is a no-op
        let found = artifacts.recommend(target.phase, target.id);
        tracing::trace!(rule, artifact = target.id, found, "applied recommendation rule");
    }
}
