//! Order draft aggregate
//!
//! The draft is the single mutable record a wizard session builds up. It holds
//! the shared order fields plus at most one case sub-record.

use serde::{Deserialize, Serialize};

use crate::cases::CaseDetails;
use crate::core::case_type::CaseType;
use crate::core::sequencer::Step;

/// Turnaround requested from the lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Priority {
    #[default]
    Standard,
    Rush,
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Standard, Priority::Rush, Priority::Urgent];
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Standard => write!(f, "standard"),
            Priority::Rush => write!(f, "rush"),
            Priority::Urgent => write!(f, "urgent"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" => Ok(Priority::Standard),
            "rush" => Ok(Priority::Rush),
            "urgent" => Ok(Priority::Urgent),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Female, Gender::Male, Gender::Other];
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Female => write!(f, "female"),
            Gender::Male => write!(f, "male"),
            Gender::Other => write!(f, "other"),
        }
    }
}

/// Physical impression and records sent with the case
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Impression {
    /// A physical impression is being sent (false means digital scan)
    pub has_impression: bool,

    /// Impression material (PVS, alginate, polyether, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    pub has_bite_registration: bool,

    pub has_opposing_model: bool,
}

/// Patient details; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Delivery postal code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

/// A work order under construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lab_id: Option<String>,

    /// Active case record; `None` until a case type is chosen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub case: Option<CaseDetails>,

    pub step: Step,

    pub impression: Impression,

    /// Material catalog id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub shade: Option<String>,

    pub patient: PatientInfo,

    pub priority: Priority,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub instructions: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<String>,
}

impl OrderDraft {
    /// An empty draft positioned at the first step
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_type(&self) -> Option<CaseType> {
        self.case.as_ref().map(|c| c.case_type())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_draft_is_empty() {
        let draft = OrderDraft::new();
        assert_eq!(draft.step, Step::Lab);
        assert!(draft.lab_id.is_none());
        assert!(draft.case_type().is_none());
        assert_eq!(draft.priority, Priority::Standard);
        assert!(!draft.impression.has_impression);
    }

    #[test]
    fn test_draft_roundtrip() {
        let mut draft = OrderDraft::new();
        draft.lab_id = Some("lab-smile".to_string());
        draft.case = Some(CaseDetails::new(CaseType::Implant));
        draft.patient.age = Some(54);
        draft.photos.push("intraoral-1.jpg".to_string());

        let yaml = serde_yml::to_string(&draft).unwrap();
        let parsed: OrderDraft = serde_yml::from_str(&yaml).unwrap();
        assert_eq!(parsed, draft);
    }

    #[test]
    fn test_minimal_yaml_deserializes_to_defaults() {
        let draft: OrderDraft = serde_yml::from_str("lab_id: lab-1\n").unwrap();
        assert_eq!(draft.lab_id.as_deref(), Some("lab-1"));
        assert_eq!(draft.step, Step::Lab);
        assert_eq!(draft.priority, Priority::Standard);
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!("RUSH".parse::<Priority>().unwrap(), Priority::Rush);
        assert!("asap".parse::<Priority>().is_err());
    }
}
