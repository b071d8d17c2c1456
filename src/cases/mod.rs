//! Case sub-record definitions
//!
//! Each case type carries its own clinical record:
//!
//! **Fixed restorations:**
//! - [`Crown`], [`Bridge`], [`Veneer`], [`InlayOnlay`], [`Provisional`]
//!
//! **Removable and implant work:**
//! - [`Denture`], [`Implant`], [`AllOnX`], [`SurgicalGuide`]
//!
//! **Appliances:**
//! - [`NightGuard`], [`Retainer`], [`BleachingTray`], [`SportsGuard`], [`ClearAligner`]
//!
//! **Planning:**
//! - [`Waxup`], [`FullMouthRehab`]
//!
//! [`CaseDetails`] is the tagged union holding exactly one of them.

pub mod all_on_x;
pub mod bleaching_tray;
pub mod bridge;
pub mod clear_aligner;
pub mod crown;
pub mod denture;
pub mod full_mouth_rehab;
pub mod implant;
pub mod inlay_onlay;
pub mod night_guard;
pub mod provisional;
pub mod retainer;
pub mod sports_guard;
pub mod surgical_guide;
pub mod veneer;
pub mod waxup;

pub use all_on_x::AllOnX;
pub use bleaching_tray::BleachingTray;
pub use bridge::Bridge;
pub use clear_aligner::ClearAligner;
pub use crown::Crown;
pub use denture::{Denture, DentureType};
pub use full_mouth_rehab::{FmrStage, FullMouthRehab};
pub use implant::{Implant, ImplantStage};
pub use inlay_onlay::InlayOnlay;
pub use night_guard::NightGuard;
pub use provisional::Provisional;
pub use retainer::{Retainer, RetainerType};
pub use sports_guard::SportsGuard;
pub use surgical_guide::SurgicalGuide;
pub use veneer::Veneer;
pub use waxup::Waxup;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::core::case_type::CaseType;
use crate::core::tooth::ToothCode;

/// Common interface for every case sub-record
pub trait CaseRecord: Default + Serialize + DeserializeOwned {
    /// The case type this record belongs to
    const CASE_TYPE: CaseType;

    /// Fields still blocking the selection step, in display order
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Whether the selection step may be left
    fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// One-line description for the review step
    fn summary(&self) -> String;
}

/// True when an optional text field holds something other than whitespace
pub(crate) fn is_set(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

/// Dental arch an appliance or prosthesis is made for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    Upper,
    Lower,
    Both,
}

impl Arch {
    pub const ALL: [Arch; 3] = [Arch::Upper, Arch::Lower, Arch::Both];

    pub fn label(&self) -> &'static str {
        match self {
            Arch::Upper => "upper",
            Arch::Lower => "lower",
            Arch::Both => "upper and lower",
        }
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arch::Upper => write!(f, "upper"),
            Arch::Lower => write!(f, "lower"),
            Arch::Both => write!(f, "both"),
        }
    }
}

impl std::str::FromStr for Arch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "upper" | "maxillary" => Ok(Arch::Upper),
            "lower" | "mandibular" => Ok(Arch::Lower),
            "both" => Ok(Arch::Both),
            _ => Err(format!("Unknown arch: {}", s)),
        }
    }
}

/// The active case sub-record, one variant per case type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "case_type", rename_all = "snake_case")]
pub enum CaseDetails {
    Crown(Crown),
    Bridge(Bridge),
    Denture(Denture),
    Implant(Implant),
    Veneer(Veneer),
    InlayOnlay(InlayOnlay),
    NightGuard(NightGuard),
    Retainer(Retainer),
    Waxup(Waxup),
    FullMouthRehab(FullMouthRehab),
    SurgicalGuide(SurgicalGuide),
    AllOnX(AllOnX),
    BleachingTray(BleachingTray),
    SportsGuard(SportsGuard),
    ClearAligner(ClearAligner),
    Provisional(Provisional),
}

/// Run the same expression against whichever record is active
macro_rules! with_record {
    ($details:expr, $record:ident => $body:expr) => {
        match $details {
            CaseDetails::Crown($record) => $body,
            CaseDetails::Bridge($record) => $body,
            CaseDetails::Denture($record) => $body,
            CaseDetails::Implant($record) => $body,
            CaseDetails::Veneer($record) => $body,
            CaseDetails::InlayOnlay($record) => $body,
            CaseDetails::NightGuard($record) => $body,
            CaseDetails::Retainer($record) => $body,
            CaseDetails::Waxup($record) => $body,
            CaseDetails::FullMouthRehab($record) => $body,
            CaseDetails::SurgicalGuide($record) => $body,
            CaseDetails::AllOnX($record) => $body,
            CaseDetails::BleachingTray($record) => $body,
            CaseDetails::SportsGuard($record) => $body,
            CaseDetails::ClearAligner($record) => $body,
            CaseDetails::Provisional($record) => $body,
        }
    };
}

impl CaseDetails {
    /// A fresh, empty record for the given case type
    pub fn new(case_type: CaseType) -> Self {
        match case_type {
            CaseType::Crown => CaseDetails::Crown(Crown::default()),
            CaseType::Bridge => CaseDetails::Bridge(Bridge::default()),
            CaseType::Denture => CaseDetails::Denture(Denture::default()),
            CaseType::Implant => CaseDetails::Implant(Implant::default()),
            CaseType::Veneer => CaseDetails::Veneer(Veneer::default()),
            CaseType::InlayOnlay => CaseDetails::InlayOnlay(InlayOnlay::default()),
            CaseType::NightGuard => CaseDetails::NightGuard(NightGuard::default()),
            CaseType::Retainer => CaseDetails::Retainer(Retainer::default()),
            CaseType::Waxup => CaseDetails::Waxup(Waxup::default()),
            CaseType::FullMouthRehab => CaseDetails::FullMouthRehab(FullMouthRehab::default()),
            CaseType::SurgicalGuide => CaseDetails::SurgicalGuide(SurgicalGuide::default()),
            CaseType::AllOnX => CaseDetails::AllOnX(AllOnX::default()),
            CaseType::BleachingTray => CaseDetails::BleachingTray(BleachingTray::default()),
            CaseType::SportsGuard => CaseDetails::SportsGuard(SportsGuard::default()),
            CaseType::ClearAligner => CaseDetails::ClearAligner(ClearAligner::default()),
            CaseType::Provisional => CaseDetails::Provisional(Provisional::default()),
        }
    }

    pub fn case_type(&self) -> CaseType {
        fn tag<R: CaseRecord>(_: &R) -> CaseType {
            R::CASE_TYPE
        }
        with_record!(self, record => tag(record))
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        with_record!(self, record => record.missing_fields())
    }

    pub fn is_complete(&self) -> bool {
        with_record!(self, record => record.is_complete())
    }

    pub fn summary(&self) -> String {
        with_record!(self, record => record.summary())
    }

    /// Stage of a full mouth rehab case, if that is the active case
    pub fn fmr_stage(&self) -> Option<FmrStage> {
        match self {
            CaseDetails::FullMouthRehab(fmr) => fmr.stage,
            _ => None,
        }
    }

    /// Teeth picked on the chart for case types that have a tooth selection
    pub fn selected_teeth(&self) -> Option<&BTreeSet<ToothCode>> {
        match self {
            CaseDetails::Crown(r) => Some(&r.selected_teeth),
            CaseDetails::Veneer(r) => Some(&r.selected_teeth),
            CaseDetails::InlayOnlay(r) => Some(&r.selected_teeth),
            CaseDetails::Waxup(r) => Some(&r.selected_teeth),
            CaseDetails::FullMouthRehab(r) => Some(&r.selected_teeth),
            CaseDetails::Provisional(r) => Some(&r.selected_teeth),
            CaseDetails::Denture(r) => match r.denture_type {
                Some(DentureType::Partial) => Some(&r.missing_teeth),
                Some(DentureType::Immediate) => Some(&r.extraction_teeth),
                _ => None,
            },
            _ => None,
        }
    }

    /// Planned implant sites for case types that have them
    pub fn implant_positions(&self) -> Option<&BTreeSet<ToothCode>> {
        match self {
            CaseDetails::Implant(r) => Some(&r.positions),
            CaseDetails::SurgicalGuide(r) => Some(&r.implant_positions),
            CaseDetails::Denture(r) if r.denture_type == Some(DentureType::Overdenture) => {
                Some(&r.implant_positions)
            }
            _ => None,
        }
    }

    /// Toggle a tooth on the active chart selection
    ///
    /// Returns false when the active case has no tooth selection.
    pub fn toggle_tooth(&mut self, tooth: ToothCode) -> bool {
        match self {
            CaseDetails::InlayOnlay(r) => {
                r.toggle_tooth(tooth);
                true
            }
            CaseDetails::Crown(r) => {
                toggle(&mut r.selected_teeth, tooth);
                r.normalize();
                true
            }
            CaseDetails::Veneer(r) => toggle(&mut r.selected_teeth, tooth),
            CaseDetails::Waxup(r) => toggle(&mut r.selected_teeth, tooth),
            CaseDetails::FullMouthRehab(r) => toggle(&mut r.selected_teeth, tooth),
            CaseDetails::Provisional(r) => toggle(&mut r.selected_teeth, tooth),
            CaseDetails::Denture(r) => match r.chart_teeth_mut() {
                Some(teeth) => toggle(teeth, tooth),
                None => false,
            },
            _ => false,
        }
    }

    /// Toggle an implant site on case types that plan implants
    ///
    /// Dentures only carry implant sites as overdentures.
    pub fn toggle_implant_position(&mut self, position: ToothCode) -> bool {
        match self {
            CaseDetails::Implant(r) => toggle(&mut r.positions, position),
            CaseDetails::SurgicalGuide(r) => toggle(&mut r.implant_positions, position),
            CaseDetails::Denture(r) if r.denture_type == Some(DentureType::Overdenture) => {
                toggle(&mut r.implant_positions, position)
            }
            _ => false,
        }
    }

    /// Set one scalar field by its serialized name
    ///
    /// Used by generic editors driven from the schema registry. The record is
    /// left unchanged if the value does not fit the field.
    pub fn set_field(&mut self, field: &str, value: serde_json::Value) -> Result<(), String> {
        let mut json = serde_json::to_value(&*self).map_err(|e| e.to_string())?;
        let object = json
            .as_object_mut()
            .ok_or_else(|| "Case record is not an object".to_string())?;
        if field == "case_type" {
            return Err("case_type cannot be set as a field".to_string());
        }
        object.insert(field.to_string(), value);
        let updated: CaseDetails = serde_json::from_value(json)
            .map_err(|e| format!("Invalid value for {}: {}", field, e))?;
        *self = updated;
        if let CaseDetails::Crown(crown) = self {
            crown.normalize();
        }
        Ok(())
    }
}

impl From<CaseType> for CaseDetails {
    fn from(case_type: CaseType) -> Self {
        CaseDetails::new(case_type)
    }
}

/// Symmetric-difference toggle of a single tooth
fn toggle(set: &mut BTreeSet<ToothCode>, tooth: ToothCode) -> bool {
    if !set.remove(&tooth) {
        set.insert(tooth);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tooth(code: &str) -> ToothCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_new_matches_case_type() {
        for ct in CaseType::all() {
            let details = CaseDetails::new(*ct);
            assert_eq!(details.case_type(), *ct);
            assert!(!details.summary().is_empty());
        }
    }

    #[test]
    fn test_every_fresh_record_is_incomplete() {
        for ct in CaseType::all() {
            assert!(
                !CaseDetails::new(*ct).is_complete(),
                "{ct} should not be complete when empty"
            );
        }
    }

    #[test]
    fn test_serde_tag_is_case_type() {
        let details = CaseDetails::new(CaseType::AllOnX);
        let yaml = serde_yml::to_string(&details).unwrap();
        assert!(yaml.contains("case_type: all_on_x"));

        let parsed: CaseDetails = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, details);
    }

    #[test]
    fn test_toggle_tooth_is_involutive() {
        let mut details = CaseDetails::new(CaseType::Crown);
        assert!(details.toggle_tooth(tooth("11")));
        assert!(details.toggle_tooth(tooth("21")));
        let before = details.clone();
        details.toggle_tooth(tooth("36"));
        details.toggle_tooth(tooth("36"));
        assert_eq!(details, before);
    }

    #[test]
    fn test_toggle_tooth_unsupported_case() {
        let mut details = CaseDetails::new(CaseType::NightGuard);
        assert!(!details.toggle_tooth(tooth("11")));
        assert_eq!(details, CaseDetails::new(CaseType::NightGuard));
    }

    #[test]
    fn test_toggle_implant_position() {
        let mut details = CaseDetails::new(CaseType::SurgicalGuide);
        assert!(details.toggle_implant_position(tooth("46")));
        match &details {
            CaseDetails::SurgicalGuide(g) => assert!(g.implant_positions.contains(&tooth("46"))),
            other => panic!("unexpected variant {other:?}"),
        }
        assert!(!CaseDetails::new(CaseType::Crown).toggle_implant_position(tooth("46")));
    }

    #[test]
    fn test_set_field_by_name() {
        let mut details = CaseDetails::new(CaseType::Denture);
        details.set_field("denture_type", json!("full")).unwrap();
        details.set_field("arch", json!("upper")).unwrap();
        details.set_field("base_material", json!("heat-cure")).unwrap();
        assert!(details.is_complete());

        let mut guide = CaseDetails::new(CaseType::SurgicalGuide);
        guide.set_field("cbct_provided", json!(true)).unwrap();
        match &guide {
            CaseDetails::SurgicalGuide(g) => assert!(g.cbct_provided),
            other => panic!("unexpected variant {other:?}"),
        }
    }

    #[test]
    fn test_set_field_rejects_bad_value() {
        let mut details = CaseDetails::new(CaseType::Retainer);
        let err = details.set_field("retainer_type", json!("bracket")).unwrap_err();
        assert!(err.contains("retainer_type"));
        assert_eq!(details, CaseDetails::new(CaseType::Retainer));

        assert!(details.set_field("case_type", json!("crown")).is_err());
    }

    #[test]
    fn test_arch_from_str() {
        assert_eq!("Upper".parse::<Arch>().unwrap(), Arch::Upper);
        assert_eq!("mandibular".parse::<Arch>().unwrap(), Arch::Lower);
        assert!("left".parse::<Arch>().is_err());
    }
}
