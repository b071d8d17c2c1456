//! Retainer case record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{Arch, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::{join_teeth, ToothCode};

/// Retention appliance style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RetainerType {
    Hawley,
    Essix,
    /// Bonded lingual wire
    Fixed,
}

impl RetainerType {
    pub const ALL: [RetainerType; 3] = [
        RetainerType::Hawley,
        RetainerType::Essix,
        RetainerType::Fixed,
    ];
}

impl std::fmt::Display for RetainerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetainerType::Hawley => write!(f, "hawley"),
            RetainerType::Essix => write!(f, "essix"),
            RetainerType::Fixed => write!(f, "fixed"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Retainer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retainer_type: Option<RetainerType>,

    /// Teeth the wire is bonded to (fixed retainers)
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub bonded_teeth: BTreeSet<ToothCode>,
}

impl CaseRecord for Retainer {
    const CASE_TYPE: CaseType = CaseType::Retainer;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.arch.is_none() {
            missing.push("arch");
        }
        match self.retainer_type {
            None => missing.push("retainer_type"),
            Some(RetainerType::Fixed) if self.bonded_teeth.is_empty() => {
                missing.push("bonded_teeth")
            }
            Some(_) => {}
        }
        missing
    }

    fn summary(&self) -> String {
        let arch = self
            .arch
            .map(|a| format!(" ({})", a.label()))
            .unwrap_or_default();
        match self.retainer_type {
            Some(RetainerType::Fixed) if !self.bonded_teeth.is_empty() => format!(
                "Fixed retainer{} bonded to {}",
                arch,
                join_teeth(&self.bonded_teeth)
            ),
            Some(RetainerType::Hawley) => format!("Hawley retainer{}", arch),
            Some(RetainerType::Essix) => format!("Essix retainer{}", arch),
            _ => format!("Retainer{}", arch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_retainer_needs_bonded_teeth() {
        let mut retainer = Retainer {
            arch: Some(Arch::Lower),
            retainer_type: Some(RetainerType::Fixed),
            ..Default::default()
        };
        assert_eq!(retainer.missing_fields(), vec!["bonded_teeth"]);
        retainer.bonded_teeth.insert("33".parse().unwrap());
        retainer.bonded_teeth.insert("43".parse().unwrap());
        assert!(retainer.is_complete());
        assert_eq!(
            retainer.summary(),
            "Fixed retainer (lower) bonded to 33, 43"
        );
    }

    #[test]
    fn test_essix_retainer() {
        let mut retainer = Retainer::default();
        assert_eq!(retainer.missing_fields(), vec!["arch", "retainer_type"]);
        retainer.arch = Some(Arch::Both);
        retainer.retainer_type = Some(RetainerType::Essix);
        assert!(retainer.is_complete());
    }
}
