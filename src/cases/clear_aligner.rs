//! Clear aligner case record

use serde::{Deserialize, Serialize};

use crate::cases::{is_set, Arch, CaseRecord};
use crate::core::case_type::CaseType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClearAligner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,

    /// Treatment objective (crowding, spacing, relapse, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_goal: Option<String>,

    pub attachments_allowed: bool,

    /// Interproximal reduction permitted
    pub ipr_allowed: bool,
}

impl CaseRecord for ClearAligner {
    const CASE_TYPE: CaseType = CaseType::ClearAligner;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.arch.is_none() {
            missing.push("arch");
        }
        if !is_set(&self.treatment_goal) {
            missing.push("treatment_goal");
        }
        missing
    }

    fn summary(&self) -> String {
        let arch = self
            .arch
            .map(|a| format!(" ({})", a.label()))
            .unwrap_or_default();
        match &self.treatment_goal {
            Some(goal) if !goal.trim().is_empty() => {
                format!("Clear aligners{} for {}", arch, goal.trim())
            }
            _ => format!("Clear aligners{}", arch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_aligner_rule() {
        let mut aligner = ClearAligner::default();
        assert_eq!(aligner.missing_fields(), vec!["arch", "treatment_goal"]);
        aligner.arch = Some(Arch::Both);
        aligner.treatment_goal = Some("crowding".to_string());
        assert!(aligner.is_complete());
        assert_eq!(
            aligner.summary(),
            "Clear aligners (upper and lower) for crowding"
        );
    }
}
