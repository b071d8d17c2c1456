//! Surgical guide case record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::{join_teeth, ToothCode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgicalGuide {
    /// Planned implant sites
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub implant_positions: BTreeSet<ToothCode>,

    /// tooth, mucosa or bone supported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide_support: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleeve_system: Option<String>,

    /// A CBCT scan has been supplied for planning
    pub cbct_provided: bool,
}

impl CaseRecord for SurgicalGuide {
    const CASE_TYPE: CaseType = CaseType::SurgicalGuide;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.implant_positions.is_empty() {
            missing.push("implant_positions");
        }
        if !is_set(&self.guide_support) {
            missing.push("guide_support");
        }
        if !self.cbct_provided {
            missing.push("cbct_provided");
        }
        missing
    }

    fn summary(&self) -> String {
        let count = self.implant_positions.len();
        if count == 0 {
            return "Surgical guide (no positions selected)".to_string();
        }
        let noun = if count == 1 { "position" } else { "positions" };
        format!(
            "Surgical guide for {} implant {} ({})",
            count,
            noun,
            join_teeth(&self.implant_positions)
        )
    }
}
