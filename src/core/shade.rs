//! Shade requirement policy
//!
//! The single place that decides whether the shade step applies. Every caller
//! (sequencer, validator, submission) asks here instead of re-checking case
//! types or materials itself.

use crate::cases::FmrStage;
use crate::core::case_type::CaseType;
use crate::core::draft::OrderDraft;

/// Case types made without a tooth shade
pub const NO_SHADE_CASE_TYPES: [CaseType; 7] = [
    CaseType::NightGuard,
    CaseType::Retainer,
    CaseType::Waxup,
    CaseType::SurgicalGuide,
    CaseType::BleachingTray,
    CaseType::SportsGuard,
    CaseType::ClearAligner,
];

/// Material ids that are metal only and therefore have no shade
pub const METAL_ONLY_MATERIALS: [&str; 3] = ["full-metal", "gold", "gold-inlay"];

/// Whether a shade must be chosen
pub fn needs_shade(
    case_type: Option<CaseType>,
    material: Option<&str>,
    fmr_stage: Option<FmrStage>,
) -> bool {
    if let Some(case_type) = case_type {
        if NO_SHADE_CASE_TYPES.contains(&case_type) {
            return false;
        }
        if case_type == CaseType::FullMouthRehab
            && matches!(fmr_stage, Some(FmrStage::Diagnostic | FmrStage::TrialBite))
        {
            return false;
        }
    }

    if let Some(material) = material {
        if METAL_ONLY_MATERIALS.contains(&material.trim()) {
            return false;
        }
    }

    true
}

/// Shade requirement for the current state of a draft
pub fn needs_shade_for(draft: &OrderDraft) -> bool {
    needs_shade(
        draft.case_type(),
        draft.material.as_deref(),
        draft.case.as_ref().and_then(|c| c.fmr_stage()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_shade_case_types_ignore_material_and_stage() {
        for ct in NO_SHADE_CASE_TYPES {
            assert!(!needs_shade(Some(ct), None, None));
            assert!(!needs_shade(Some(ct), Some("zirconia-mono"), None));
            assert!(!needs_shade(Some(ct), Some("emax"), Some(FmrStage::FinalBoth)));
        }
    }

    #[test]
    fn test_metal_materials_skip_shade() {
        assert!(!needs_shade(Some(CaseType::Crown), Some("full-metal"), None));
        assert!(!needs_shade(Some(CaseType::InlayOnlay), Some("gold-inlay"), None));
        assert!(!needs_shade(Some(CaseType::Bridge), Some("gold"), None));
    }

    #[test]
    fn test_ceramic_crown_needs_shade() {
        assert!(needs_shade(Some(CaseType::Crown), Some("zirconia-mono"), None));
        assert!(needs_shade(Some(CaseType::Crown), None, None));
    }

    #[test]
    fn test_fmr_stage_dependence() {
        let fmr = Some(CaseType::FullMouthRehab);
        assert!(!needs_shade(fmr, None, Some(FmrStage::Diagnostic)));
        assert!(!needs_shade(fmr, None, Some(FmrStage::TrialBite)));
        assert!(needs_shade(fmr, None, Some(FmrStage::BisqueTrial)));
        assert!(needs_shade(fmr, None, Some(FmrStage::FinalUpper)));
        assert!(needs_shade(fmr, None, None));
    }

    #[test]
    fn test_unset_case_type_needs_shade() {
        assert!(needs_shade(None, None, None));
        assert!(!needs_shade(None, Some("gold"), None));
    }
}
