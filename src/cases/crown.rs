//! Crown case record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::{join_teeth, ToothCode};

/// Single-unit or splinted crowns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Crown {
    /// Teeth receiving a crown
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub selected_teeth: BTreeSet<ToothCode>,

    /// Preparation margin (chamfer, shoulder, feather edge, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub occlusal_reduction: Option<String>,

    /// What the crown occludes against (natural, crown, denture, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opposing_dentition: Option<String>,

    pub needs_post_core: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_type: Option<String>,

    /// Join adjacent crowns; only meaningful with more than one tooth
    pub splinted: bool,
}

impl Crown {
    /// Drop the splint flag once fewer than two teeth remain
    pub fn normalize(&mut self) {
        if self.selected_teeth.len() < 2 {
            self.splinted = false;
        }
    }
}

impl CaseRecord for Crown {
    const CASE_TYPE: CaseType = CaseType::Crown;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.selected_teeth.is_empty() {
            missing.push("selected_teeth");
        }
        if !is_set(&self.margin_type) {
            missing.push("margin_type");
        }
        missing
    }

    fn summary(&self) -> String {
        let count = self.selected_teeth.len();
        let noun = if count == 1 { "crown" } else { "crowns" };
        let splint = if self.splinted && count > 1 {
            " splinted"
        } else {
            ""
        };
        if count == 0 {
            "Crown (no teeth selected)".to_string()
        } else {
            format!(
                "{}{} {} ({})",
                count,
                splint,
                noun,
                join_teeth(&self.selected_teeth)
            )
        }
    }
}
