//! Sports mouthguard case record

use serde::{Deserialize, Serialize};

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SportsGuard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl CaseRecord for SportsGuard {
    const CASE_TYPE: CaseType = CaseType::SportsGuard;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !is_set(&self.thickness) {
            missing.push("thickness");
        }
        if !is_set(&self.color) {
            missing.push("color");
        }
        missing
    }

    fn summary(&self) -> String {
        match (&self.thickness, &self.color) {
            (Some(thickness), Some(color)) => format!("Sports guard ({}, {})", thickness, color),
            (Some(detail), None) | (None, Some(detail)) => format!("Sports guard ({})", detail),
            (None, None) => "Sports guard".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sports_guard_rule() {
        let mut guard = SportsGuard::default();
        assert_eq!(guard.missing_fields(), vec!["thickness", "color"]);
        guard.thickness = Some("4mm".to_string());
        guard.color = Some("blue".to_string());
        assert!(guard.is_complete());
        assert_eq!(guard.summary(), "Sports guard (4mm, blue)");
    }
}
