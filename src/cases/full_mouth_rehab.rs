//! Full mouth rehabilitation case record
//!
//! An FMR case is sent to the lab several times as treatment progresses; the
//! stage decides which fields the lab needs for the current visit.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, Arch, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::ToothCode;

/// Treatment stage of a full mouth rehabilitation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FmrStage {
    Diagnostic,
    Provisionals,
    TrialBite,
    BisqueTrial,
    FinalUpper,
    FinalLower,
    FinalBoth,
}

impl FmrStage {
    pub const ALL: [FmrStage; 7] = [
        FmrStage::Diagnostic,
        FmrStage::Provisionals,
        FmrStage::TrialBite,
        FmrStage::BisqueTrial,
        FmrStage::FinalUpper,
        FmrStage::FinalLower,
        FmrStage::FinalBoth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FmrStage::Diagnostic => "diagnostic",
            FmrStage::Provisionals => "provisionals",
            FmrStage::TrialBite => "trial bite",
            FmrStage::BisqueTrial => "bisque trial",
            FmrStage::FinalUpper => "final upper",
            FmrStage::FinalLower => "final lower",
            FmrStage::FinalBoth => "final upper and lower",
        }
    }
}

impl std::fmt::Display for FmrStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FmrStage::Diagnostic => write!(f, "diagnostic"),
            FmrStage::Provisionals => write!(f, "provisionals"),
            FmrStage::TrialBite => write!(f, "trial_bite"),
            FmrStage::BisqueTrial => write!(f, "bisque_trial"),
            FmrStage::FinalUpper => write!(f, "final_upper"),
            FmrStage::FinalLower => write!(f, "final_lower"),
            FmrStage::FinalBoth => write!(f, "final_both"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FullMouthRehab {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<FmrStage>,

    /// Planned occlusal vertical dimension change
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ovd: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_approach: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,

    // Trial bite verification
    pub ovd_verified: bool,
    pub centric_verified: bool,

    // Bisque trial checklist
    pub contacts_checked: bool,
    pub occlusion_checked: bool,
    pub esthetics_checked: bool,
    pub phonetics_checked: bool,

    /// Canine guidance, group function, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_scheme: Option<String>,

    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub selected_teeth: BTreeSet<ToothCode>,
}

impl FullMouthRehab {
    fn bisque_checklist(&self) -> [bool; 4] {
        [
            self.contacts_checked,
            self.occlusion_checked,
            self.esthetics_checked,
            self.phonetics_checked,
        ]
    }
}

impl CaseRecord for FullMouthRehab {
    const CASE_TYPE: CaseType = CaseType::FullMouthRehab;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let Some(stage) = self.stage else {
            missing.push("stage");
            return missing;
        };

        match stage {
            FmrStage::Diagnostic => {
                if !is_set(&self.ovd) {
                    missing.push("ovd");
                }
                if !is_set(&self.treatment_approach) {
                    missing.push("treatment_approach");
                }
            }
            FmrStage::TrialBite => {
                if self.arch.is_none() {
                    missing.push("arch");
                }
                if !(self.ovd_verified || self.centric_verified) {
                    missing.push("verification");
                }
            }
            FmrStage::BisqueTrial => {
                if self.arch.is_none() {
                    missing.push("arch");
                }
                if !self.bisque_checklist().iter().any(|checked| *checked) {
                    missing.push("bisque_checklist");
                }
            }
            FmrStage::Provisionals
            | FmrStage::FinalUpper
            | FmrStage::FinalLower
            | FmrStage::FinalBoth => {
                if !is_set(&self.ovd) {
                    missing.push("ovd");
                }
                if !is_set(&self.treatment_approach) {
                    missing.push("treatment_approach");
                }
                if !is_set(&self.guide_scheme) {
                    missing.push("guide_scheme");
                }
                if self.selected_teeth.is_empty() {
                    missing.push("selected_teeth");
                }
            }
        }
        missing
    }

    fn summary(&self) -> String {
        let Some(stage) = self.stage else {
            return "Full mouth rehab (stage not selected)".to_string();
        };
        let arch = match stage {
            FmrStage::TrialBite | FmrStage::BisqueTrial => self
                .arch
                .map(|a| format!(" ({})", a.label()))
                .unwrap_or_default(),
            _ => String::new(),
        };
        let teeth = match self.selected_teeth.len() {
            0 => String::new(),
            n => format!(", {} teeth", n),
        };
        format!("Full mouth rehab: {}{}{}", stage.label(), arch, teeth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(stage: FmrStage) -> FullMouthRehab {
        FullMouthRehab {
            stage: Some(stage),
            ..Default::default()
        }
    }

    #[test]
    fn test_stage_required() {
        assert_eq!(FullMouthRehab::default().missing_fields(), vec!["stage"]);
    }

    #[test]
    fn test_diagnostic_needs_ovd_and_approach_only() {
        let mut fmr = at(FmrStage::Diagnostic);
        assert_eq!(fmr.missing_fields(), vec!["ovd", "treatment_approach"]);
        fmr.ovd = Some("+3mm".to_string());
        fmr.treatment_approach = Some("additive".to_string());
        assert!(fmr.is_complete());
    }

    #[test]
    fn test_trial_bite_needs_arch_and_one_verification() {
        let mut fmr = at(FmrStage::TrialBite);
        assert_eq!(fmr.missing_fields(), vec!["arch", "verification"]);
        fmr.arch = Some(Arch::Both);
        fmr.centric_verified = true;
        assert!(fmr.is_complete());
    }

    #[test]
    fn test_bisque_trial_needs_any_checklist_item() {
        let mut fmr = at(FmrStage::BisqueTrial);
        fmr.arch = Some(Arch::Upper);
        assert_eq!(fmr.missing_fields(), vec!["bisque_checklist"]);
        fmr.phonetics_checked = true;
        assert!(fmr.is_complete());
    }

    #[test]
    fn test_final_stages_need_full_set() {
        for stage in [
            FmrStage::Provisionals,
            FmrStage::FinalUpper,
            FmrStage::FinalLower,
            FmrStage::FinalBoth,
        ] {
            let mut fmr = at(stage);
            assert_eq!(
                fmr.missing_fields(),
                vec!["ovd", "treatment_approach", "guide_scheme", "selected_teeth"]
            );
            fmr.ovd = Some("+2mm".to_string());
            fmr.treatment_approach = Some("crowns".to_string());
            fmr.guide_scheme = Some("canine guidance".to_string());
            fmr.selected_teeth.insert("16".parse().unwrap());
            assert!(fmr.is_complete(), "{stage} should be complete");
        }
    }

    #[test]
    fn test_summary() {
        let mut fmr = at(FmrStage::BisqueTrial);
        fmr.arch = Some(Arch::Upper);
        assert_eq!(fmr.summary(), "Full mouth rehab: bisque trial (upper)");
    }
}
