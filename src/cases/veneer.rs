//! Veneer case record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::{join_teeth, ToothCode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Veneer {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub selected_teeth: BTreeSet<ToothCode>,

    /// Ceramic family (feldspathic, lithium disilicate, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub veneer_type: Option<String>,

    /// no_prep, minimal or traditional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_type: Option<String>,
}

impl CaseRecord for Veneer {
    const CASE_TYPE: CaseType = CaseType::Veneer;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.selected_teeth.is_empty() {
            missing.push("selected_teeth");
        }
        if !is_set(&self.prep_type) {
            missing.push("prep_type");
        }
        missing
    }

    fn summary(&self) -> String {
        match self.selected_teeth.len() {
            0 => "Veneer (no teeth selected)".to_string(),
            1 => format!("1 veneer ({})", join_teeth(&self.selected_teeth)),
            n => format!("{} veneers ({})", n, join_teeth(&self.selected_teeth)),
        }
    }
}
