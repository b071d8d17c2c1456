//! Diagnostic wax-up case record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::{join_teeth, ToothCode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Waxup {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub selected_teeth: BTreeSet<ToothCode>,

    /// diagnostic or mockup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl CaseRecord for Waxup {
    const CASE_TYPE: CaseType = CaseType::Waxup;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.selected_teeth.is_empty() {
            missing.push("selected_teeth");
        }
        if !is_set(&self.purpose) {
            missing.push("purpose");
        }
        missing
    }

    fn summary(&self) -> String {
        if self.selected_teeth.is_empty() {
            return "Wax-up (no teeth selected)".to_string();
        }
        format!(
            "Wax-up of {} teeth ({})",
            self.selected_teeth.len(),
            join_teeth(&self.selected_teeth)
        )
    }
}
