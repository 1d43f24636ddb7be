//! Study phase catalog.
//!
//! The four phases form a closed, ordered enumeration. Catalog order is
//! significant: phase segment boundaries are computed by accumulating shares
//! in this order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Pedagogical stage of a study timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Foundation,
    PatternRecognition,
    ActiveApplication,
    Refinement,
}

impl Phase {
    /// The catalog, in boundary order.
    pub const ALL: [Phase; 4] = [
        Phase::Foundation,
        Phase::PatternRecognition,
        Phase::ActiveApplication,
        Phase::Refinement,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Foundation => "Foundation",
            Phase::PatternRecognition => "Pattern Recognition",
            Phase::ActiveApplication => "Active Application",
            Phase::Refinement => "Refinement",
        }
    }

    /// Snake-case identifier, as serialized.
    pub fn id(self) -> &'static str {
        match self {
            Phase::Foundation => "foundation",
            Phase::PatternRecognition => "pattern_recognition",
            Phase::ActiveApplication => "active_application",
            Phase::Refinement => "refinement",
        }
    }

    /// Share of the total weeks, in whole percent. Shares sum to 100.
    pub fn share_percent(self) -> u32 {
        match self {
            Phase::Foundation => 25,
            Phase::PatternRecognition => 25,
            Phase::ActiveApplication => 30,
            Phase::Refinement => 20,
        }
    }

    /// Share of the total weeks as a fraction in (0, 1].
    pub fn share_of_total(self) -> f64 {
        f64::from(self.share_percent()) / 100.0
    }

    pub fn description(self) -> &'static str {
        match self {
            Phase::Foundation => "Rule memorization & outlining",
            Phase::PatternRecognition => "Issue spotting & essay analysis",
            Phase::ActiveApplication => "Timed essays & MBE drills",
            Phase::Refinement => "Simulation & weakness targeting",
        }
    }

    pub fn focus(self) -> &'static str {
        match self {
            Phase::Foundation => "Core Rules & Spaced Repetition",
            Phase::PatternRecognition => "Issue Spotting & Triggers",
            Phase::ActiveApplication => "Timed Writing & Interleaving",
            Phase::Refinement => "Simulation & Weakness Targeting",
        }
    }

    pub fn tasks(self) -> &'static [&'static str] {
        match self {
            Phase::Foundation => &[
                "Active recall of black letter law",
                "Read released essays",
                "Foundational MBE drills (Untimed)",
            ],
            Phase::PatternRecognition => &[
                "Analyze 5-10 essays per subject",
                "Map trigger facts to issues",
                "Targeted MBE sub-topic sets",
            ],
            Phase::ActiveApplication => &[
                "3 timed essays per week",
                "Interleave MBE subjects (Mixed sets)",
                "Whiteboard analysis post-essay",
            ],
            Phase::Refinement => &[
                "Full exam day simulations",
                "Strict self-grading",
                "MBE drills on weakest sub-topics",
            ],
        }
    }

    /// Subjects handed to the day planner for a week in this phase.
    pub fn focus_subjects(self) -> &'static [&'static str] {
        match self {
            Phase::Foundation => &["Torts", "Contracts"],
            Phase::PatternRecognition => &["Civ Pro", "Evidence"],
            Phase::ActiveApplication | Phase::Refinement => &["Mixed MBE", "Essay Practice"],
        }
    }

    /// Position in [`Phase::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_last(self) -> bool {
        self.index() == Phase::ALL.len() - 1
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Phase::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(needle) || p.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "phase".into(),
                message: format!("unknown phase '{s}'"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_sum_to_whole() {
        let total: u32 = Phase::ALL.iter().map(|p| p.share_percent()).sum();
        assert_eq!(total, 100);

        let fraction: f64 = Phase::ALL.iter().map(|p| p.share_of_total()).sum();
        assert!((fraction - 1.0).abs() < 1e-12);
    }

    #[test]
    fn catalog_order_matches_index() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
        assert!(Phase::Refinement.is_last());
        assert!(!Phase::Foundation.is_last());
    }

    #[test]
    fn parses_id_and_display_name() {
        assert_eq!("pattern_recognition".parse::<Phase>().unwrap(), Phase::PatternRecognition);
        assert_eq!("Active Application".parse::<Phase>().unwrap(), Phase::ActiveApplication);
        assert_eq!("REFINEMENT".parse::<Phase>().unwrap(), Phase::Refinement);
        assert!("cramming".parse::<Phase>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&Phase::ActiveApplication).unwrap();
        assert_eq!(json, "\"active_application\"");
    }

    #[test]
    fn late_phases_share_focus_subjects() {
        assert_eq!(Phase::Foundation.focus_subjects(), &["Torts", "Contracts"]);
        assert_eq!(
            Phase::ActiveApplication.focus_subjects(),
            Phase::Refinement.focus_subjects()
        );
    }
}
