//! Provisional (temporary) restoration case record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::{join_teeth, ToothCode};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provisional {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub selected_teeth: BTreeSet<ToothCode>,

    /// shell, milled PMMA, printed, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provisional_type: Option<String>,
}

impl CaseRecord for Provisional {
    const CASE_TYPE: CaseType = CaseType::Provisional;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.selected_teeth.is_empty() {
            missing.push("selected_teeth");
        }
        if !is_set(&self.provisional_type) {
            missing.push("provisional_type");
        }
        missing
    }

    fn summary(&self) -> String {
        match self.selected_teeth.len() {
            0 => "Provisional (no teeth selected)".to_string(),
            1 => format!("1 provisional unit ({})", join_teeth(&self.selected_teeth)),
            n => format!(
                "{} provisional units ({})",
                n,
                join_teeth(&self.selected_teeth)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisional_rule() {
        let mut provisional = Provisional::default();
        provisional.selected_teeth.insert("14".parse().unwrap());
        provisional.selected_teeth.insert("15".parse().unwrap());
        assert_eq!(provisional.missing_fields(), vec!["provisional_type"]);
        provisional.provisional_type = Some("milled".to_string());
        assert!(provisional.is_complete());
        assert_eq!(provisional.summary(), "2 provisional units (14, 15)");
    }
}
