//! Artifact catalog entries and the per-phase recommendation built from them

use super::taxonomy::Phase;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A project-management artifact as listed in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDef {
    /// Identifier, unique across the whole catalog (e.g. "risk-register")
    pub id: String,
    /// Display name
    pub name: String,
}

impl ArtifactDef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// An artifact with its recommendation and selection state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub name: String,
    /// Standard practice for the classification. Fixed once built.
    pub recommended: bool,
    /// Current user selection. Starts equal to `recommended`.
    pub checked: bool,
}

impl Artifact {
    pub(crate) fn from_def(def: &ArtifactDef) -> Self {
        Self {
            id: def.id.clone(),
            name: def.name.clone(),
            recommended: false,
            checked: false,
        }
    }
}

/// Phase-partitioned artifact list produced by the recommendation engine.
///
/// The recommended flags are only set by the engine; callers mutate the
/// selection through [`set_checked`](Self::set_checked) and friends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactRecommendation {
    phases: BTreeMap<Phase, Vec<Artifact>>,
}

impl ArtifactRecommendation {
    pub(crate) fn from_catalog(catalog: &BTreeMap<Phase, Vec<ArtifactDef>>) -> Self {
        let phases = catalog
            .iter()
            .map(|(phase, defs)| (*phase, defs.iter().map(Artifact::from_def).collect()))
            .collect();
        Self { phases }
    }

    /// Mark an artifact as recommended (and checked) within a phase.
    ///
    /// Only upgrades: an already recommended artifact is left untouched.
    /// Returns false when the phase does not contain the id.
    pub(crate) fn recommend(&mut self, phase: Phase, id: &str) -> bool {
        let Some(artifact) = self
            .phases
            .get_mut(&phase)
            .and_then(|list| list.iter_mut().find(|a| a.id == id))
        else {
            return false;
        };
        if !artifact.recommended {
            artifact.recommended = true;
            artifact.checked = true;
        }
        true
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Artifact> {
        self.phases.values_mut().flatten()
    }

    /// Artifacts of one phase, in catalog order
    pub fn phase(&self, phase: Phase) -> &[Artifact] {
        self.phases.get(&phase).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Phases with their artifacts, in phase order
    pub fn phases(&self) -> impl Iterator<Item = (Phase, &[Artifact])> {
        self.phases.iter().map(|(p, list)| (*p, list.as_slice()))
    }

    /// Every artifact across all phases, in phase then catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.phases.values().flatten()
    }

    /// Look up an artifact by id in any phase
    pub fn get(&self, id: &str) -> Option<&Artifact> {
        self.iter().find(|a| a.id == id)
    }

    /// Set the selection of one artifact. Returns false for an unknown id.
    pub fn set_checked(&mut self, id: &str, checked: bool) -> bool {
        match self.iter_mut().find(|a| a.id == id) {
            Some(artifact) => {
                artifact.checked = checked;
                true
            }
            None => false,
        }
    }

    /// Check every artifact
    pub fn select_all(&mut self) {
        self.iter_mut().for_each(|a| a.checked = true);
    }

    /// Uncheck every artifact
    pub fn deselect_all(&mut self) {
        self.iter_mut().for_each(|a| a.checked = false);
    }

    /// Replace the selection with exactly `ids`.
    ///
    /// Returns the ids that matched no artifact; they are otherwise ignored.
    pub fn apply_selection<S: AsRef<str>>(&mut self, ids: &[S]) -> Vec<String> {
        for artifact in self.iter_mut() {
            artifact.checked = ids.iter().any(|id| id.as_ref() == artifact.id);
        }
        ids.iter()
            .map(|id| id.as_ref())
            .filter(|id| self.get(id).is_none())
            .map(str::to_string)
            .collect()
    }

    /// Ids of checked artifacts, in phase then catalog order
    pub fn selected_ids(&self) -> Vec<&str> {
        self.iter()
            .filter(|a| a.checked)
            .map(|a| a.id.as_str())
            .collect()
    }

    /// Number of checked artifacts. This is the calculator's
    /// `selected_artifact_count`.
    pub fn selected_count(&self) -> usize {
        self.iter().filter(|a| a.checked).count()
    }

    /// Number of artifacts recommended for the classification
    pub fn recommended_count(&self) -> usize {
        self.iter().filter(|a| a.recommended).count()
    }

    /// Number of artifacts in the catalog
    pub fn total_count(&self) -> usize {
        self.phases.values().map(Vec::len).sum()
    }
}
