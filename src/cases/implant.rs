//! Implant restoration case record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::{join_teeth, ToothCode};

/// Clinical stage of the implants being restored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplantStage {
    /// Still osseointegrating; only positions are known
    Healing,
    /// Integrated and ready for restoration
    Ready,
    /// Implant-level impression already taken
    ImpressionTaken,
}

impl ImplantStage {
    pub const ALL: [ImplantStage; 3] = [
        ImplantStage::Healing,
        ImplantStage::Ready,
        ImplantStage::ImpressionTaken,
    ];
}

impl std::fmt::Display for ImplantStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImplantStage::Healing => write!(f, "healing"),
            ImplantStage::Ready => write!(f, "ready"),
            ImplantStage::ImpressionTaken => write!(f, "impression_taken"),
        }
    }
}

impl std::str::FromStr for ImplantStage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "healing" => Ok(ImplantStage::Healing),
            "ready" => Ok(ImplantStage::Ready),
            "impression_taken" => Ok(ImplantStage::ImpressionTaken),
            _ => Err(format!("Unknown implant stage: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Implant {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub positions: BTreeSet<ToothCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implant_stage: Option<ImplantStage>,

    /// Manufacturer system (Straumann BLT, Nobel Active, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub implant_system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub impression_technique: Option<String>,

    /// Screw-retained or cement-retained
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restoration_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abutment_type: Option<String>,
}

impl CaseRecord for Implant {
    const CASE_TYPE: CaseType = CaseType::Implant;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.positions.is_empty() {
            missing.push("positions");
        }
        match self.implant_stage {
            None => missing.push("implant_stage"),
            Some(ImplantStage::Healing) => {}
            Some(ImplantStage::Ready | ImplantStage::ImpressionTaken) => {
                let detail = [
                    ("implant_system", &self.implant_system),
                    ("platform", &self.platform),
                    ("connection", &self.connection),
                    ("impression_technique", &self.impression_technique),
                    ("restoration_type", &self.restoration_type),
                    ("abutment_type", &self.abutment_type),
                ];
                missing.extend(
                    detail
                        .iter()
                        .filter(|(_, value)| !is_set(value))
                        .map(|(name, _)| *name),
                );
            }
        }
        missing
    }

    fn summary(&self) -> String {
        let count = self.positions.len();
        let noun = if count == 1 { "position" } else { "positions" };
        if count == 0 {
            return "Implant (no positions selected)".to_string();
        }
        format!(
            "{} implant {} ({})",
            count,
            noun,
            join_teeth(&self.positions)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tooth(code: &str) -> ToothCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_healing_needs_positions_only() {
        let mut implant = Implant {
            implant_stage: Some(ImplantStage::Healing),
            ..Default::default()
        };
        assert_eq!(implant.missing_fields(), vec!["positions"]);
        implant.positions.insert(tooth("36"));
        assert!(implant.is_complete());
    }

    #[test]
    fn test_ready_needs_full_detail() {
        let mut implant = Implant {
            implant_stage: Some(ImplantStage::Ready),
            positions: [tooth("36")].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(
            implant.missing_fields(),
            vec![
                "implant_system",
                "platform",
                "connection",
                "impression_technique",
                "restoration_type",
                "abutment_type"
            ]
        );

        implant.implant_system = Some("Straumann BLT".to_string());
        implant.platform = Some("RC".to_string());
        implant.connection = Some("internal".to_string());
        implant.impression_technique = Some("closed_tray".to_string());
        implant.restoration_type = Some("screw_retained".to_string());
        implant.abutment_type = Some("ti_base".to_string());
        assert!(implant.is_complete());
    }

    #[test]
    fn test_stage_required() {
        let implant = Implant {
            positions: [tooth("36")].into_iter().collect(),
            ..Default::default()
        };
        assert_eq!(implant.missing_fields(), vec!["implant_stage"]);
    }

    #[test]
    fn test_summary_pluralizes() {
        let mut implant = Implant::default();
        implant.positions.insert(tooth("46"));
        assert_eq!(implant.summary(), "1 implant position (46)");
        implant.positions.insert(tooth("36"));
        assert_eq!(implant.summary(), "2 implant positions (36, 46)");
    }

    #[test]
    fn test_stage_serializes_snake_case() {
        let yaml = serde_yml::to_string(&ImplantStage::ImpressionTaken).unwrap();
        assert_eq!(yaml.trim(), "impression_taken");
    }
}
