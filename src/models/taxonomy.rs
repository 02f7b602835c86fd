//! Taxonomies shared by the recommendation and calculator engines
//!
//! Every enum here serializes to the same lowercase key that the coefficient
//! tables, project files and export files use (e.g. `prince2`, `iso10006`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Error returned when a string is not a known taxonomy key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}' (expected one of: {expected})")]
pub struct UnknownKey {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

macro_rules! taxonomy {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $key:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            Serialize, Deserialize, clap::ValueEnum,
        )]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $( $(#[$vmeta])* #[value(name = $key)] $variant ),+
        }

        impl $name {
            /// Every value, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical key used in tables and files
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownKey;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = s.trim().to_ascii_lowercase();
                match key.as_str() {
                    $($key => Ok($name::$variant),)+
                    _ => Err(UnknownKey {
                        kind: $kind,
                        value: s.to_string(),
                        expected: [$($key),+].join(", "),
                    }),
                }
            }
        }
    };
}

taxonomy! {
    /// Project delivery approach
    Methodology, "methodology" {
        Waterfall => "waterfall",
        Scrum => "scrum",
        Kanban => "kanban",
        Safe => "safe",
        Lean => "lean",
        Scrumban => "scrumban",
        Prince2 => "prince2",
        Pm2 => "pm2",
        Hybrid => "hybrid",
    }
}

taxonomy! {
    /// Project Management Office type
    PmoType, "PMO type" {
        Small => "small",
        Corporate => "corporate",
    }
}

taxonomy! {
    /// Seniority grade, used for the PM and for every team role
    Grade, "grade" {
        Junior => "junior",
        Middle => "middle",
        Senior => "senior",
    }
}

taxonomy! {
    /// Competency framework the PM is certified against
    CompetencyFramework, "competency framework" {
        None => "none",
        Icb => "icb",
        Pmcd => "pmcd",
        Ocb => "ocb",
        Icm => "icm",
    }
}

taxonomy! {
    /// Project management standard
    Standard, "standard" {
        Iso21502 => "iso21502",
        Iso21504 => "iso21504",
        Iso10006 => "iso10006",
    }
}

taxonomy! {
    /// Risk management framework
    RiskFramework, "risk framework" {
        Pramg => "pramg",
        Srmppp => "srmppp",
    }
}

taxonomy! {
    /// AI model family used to assist the team
    AiModel, "AI model" {
        Lstm => "lstm",
        Cnn => "cnn",
        Gru => "gru",
        Mlp => "mlp",
        Rnn => "rnn",
    }
}

taxonomy! {
    /// Project constraint fixed by the customer
    Constraint, "constraint" {
        Scope => "scope",
        Time => "time",
        Cost => "cost",
        Quality => "quality",
    }
}

taxonomy! {
    /// Kind of team role
    RoleType, "role type" {
        Frontend => "frontend",
        Backend => "backend",
        Fullstack => "fullstack",
        Qa => "qa",
        Devops => "devops",
        Analyst => "analyst",
        Designer => "designer",
        Pm => "pm",
        Architect => "architect",
        Security => "security",
        Data => "data",
        Mobile => "mobile",
    }
}

taxonomy! {
    /// PMBOK-style project phase. Declaration order is the display order.
    Phase, "phase" {
        Initiation => "initiation",
        Planning => "planning",
        Execution => "execution",
        Monitoring => "monitoring",
        Closing => "closing",
    }
}

impl Default for Methodology {
    fn default() -> Self {
        Methodology::Waterfall
    }
}

impl Default for PmoType {
    fn default() -> Self {
        PmoType::Corporate
    }
}

impl Default for Grade {
    fn default() -> Self {
        Grade::Middle
    }
}

impl Default for CompetencyFramework {
    fn default() -> Self {
        CompetencyFramework::None
    }
}

impl Default for RoleType {
    fn default() -> Self {
        RoleType::Backend
    }
}

impl Phase {
    /// Human-readable phase title
    pub fn title(&self) -> &'static str {
        match self {
            Phase::Initiation => "Initiation",
            Phase::Planning => "Planning",
            Phase::Execution => "Execution",
            Phase::Monitoring => "Monitoring & Control",
            Phase::Closing => "Closing",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_canonical_keys() {
        assert_eq!("prince2".parse::<Methodology>().unwrap(), Methodology::Prince2);
        assert_eq!("ISO10006".parse::<Standard>().unwrap(), Standard::Iso10006);
        assert_eq!(" corporate ".parse::<PmoType>().unwrap(), PmoType::Corporate);
    }

    #[test]
    fn test_from_str_rejects_unknown_key() {
        let err = "agile".parse::<Methodology>().unwrap_err();
        assert_eq!(err.kind, "methodology");
        assert!(err.to_string().contains("waterfall"));
    }

    #[test]
    fn test_serde_uses_canonical_keys() {
        let json = serde_json::to_string(&vec![RoleType::Fullstack, RoleType::Qa]).unwrap();
        assert_eq!(json, r#"["fullstack","qa"]"#);

        let parsed: Vec<AiModel> = serde_json::from_str(r#"["lstm","rnn"]"#).unwrap();
        assert_eq!(parsed, vec![AiModel::Lstm, AiModel::Rnn]);
    }

    #[test]
    fn test_as_str_round_trips_for_every_value() {
        for m in Methodology::ALL {
            assert_eq!(m.as_str().parse::<Methodology>().unwrap(), *m);
        }
        for r in RoleType::ALL {
            assert_eq!(r.to_string().parse::<RoleType>().unwrap(), *r);
        }
    }

    #[test]
    fn test_phase_order() {
        let mut phases = Phase::ALL.to_vec();
        phases.sort();
        assert_eq!(phases.first(), Some(&Phase::Initiation));
        assert_eq!(phases.last(), Some(&Phase::Closing));
    }
}
