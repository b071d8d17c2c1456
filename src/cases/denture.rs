//! Denture case record
//!
//! Dentures branch on their subtype: each subtype has its own set of
//! required fields. Fields belonging to other subtypes are kept but ignored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::cases::{is_set, Arch, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::tooth::ToothCode;

/// Minimum implants supporting an overdenture
pub const MIN_OVERDENTURE_IMPLANTS: usize = 2;

/// Removable prosthesis subtype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DentureType {
    Full,
    Partial,
    Immediate,
    Overdenture,
    Obturator,
}

impl DentureType {
    pub const ALL: [DentureType; 5] = [
        DentureType::Full,
        DentureType::Partial,
        DentureType::Immediate,
        DentureType::Overdenture,
        DentureType::Obturator,
    ];
}

impl std::fmt::Display for DentureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DentureType::Full => write!(f, "full"),
            DentureType::Partial => write!(f, "partial"),
            DentureType::Immediate => write!(f, "immediate"),
            DentureType::Overdenture => write!(f, "overdenture"),
            DentureType::Obturator => write!(f, "obturator"),
        }
    }
}

impl std::str::FromStr for DentureType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "full" => Ok(DentureType::Full),
            "partial" => Ok(DentureType::Partial),
            "immediate" => Ok(DentureType::Immediate),
            "overdenture" => Ok(DentureType::Overdenture),
            "obturator" => Ok(DentureType::Obturator),
            _ => Err(format!("Unknown denture type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Denture {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denture_type: Option<DentureType>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,

    /// Denture base (heat-cured acrylic, flexible, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_material: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub teeth_setup: Option<String>,

    // Partial
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub missing_teeth: BTreeSet<ToothCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clasp_design: Option<String>,

    // Immediate
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub extraction_teeth: BTreeSet<ToothCode>,

    // Overdenture
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub implant_positions: BTreeSet<ToothCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment_type: Option<String>,

    // Obturator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub obturator_type: Option<String>,

    /// Aramany class of the maxillary defect
    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub defect_extent: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_method: Option<String>,
}

impl Denture {
    /// Tooth set toggled by the chart for the current subtype
    pub fn chart_teeth_mut(&mut self) -> Option<&mut BTreeSet<ToothCode>> {
        match self.denture_type {
            Some(DentureType::Partial) => Some(&mut self.missing_teeth),
            Some(DentureType::Immediate) => Some(&mut self.extraction_teeth),
            _ => None,
        }
    }
}

impl CaseRecord for Denture {
    const CASE_TYPE: CaseType = CaseType::Denture;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let Some(denture_type) = self.denture_type else {
            missing.push("denture_type");
            return missing;
        };

        if denture_type != DentureType::Obturator && self.arch.is_none() {
            missing.push("arch");
        }

        match denture_type {
            DentureType::Full => {
                if !is_set(&self.base_material) {
                    missing.push("base_material");
                }
            }
            DentureType::Partial => {
                if self.missing_teeth.is_empty() {
                    missing.push("missing_teeth");
                }
                if !is_set(&self.framework_type) {
                    missing.push("framework_type");
                }
            }
            DentureType::Immediate => {
                if self.extraction_teeth.is_empty() {
                    missing.push("extraction_teeth");
                }
            }
            DentureType::Overdenture => {
                if self.implant_positions.len() < MIN_OVERDENTURE_IMPLANTS {
                    missing.push("implant_positions");
                }
                if !is_set(&self.attachment_type) {
                    missing.push("attachment_type");
                }
            }
            DentureType::Obturator => {
                if !is_set(&self.obturator_type) {
                    missing.push("obturator_type");
                }
                if !is_set(&self.defect_class) {
                    missing.push("defect_class");
                }
                if !is_set(&self.defect_extent) {
                    missing.push("defect_extent");
                }
                if !is_set(&self.retention_method) {
                    missing.push("retention_method");
                }
            }
        }
        missing
    }

    fn summary(&self) -> String {
        let Some(denture_type) = self.denture_type else {
            return "Denture (type not selected)".to_string();
        };
        let arch = self
            .arch
            .map(|a| format!(" {}", a.label()))
            .unwrap_or_default();

        match denture_type {
            DentureType::Full => format!("Full{} denture", arch),
            DentureType::Partial => format!(
                "Partial{} denture replacing {} teeth",
                arch,
                self.missing_teeth.len()
            ),
            DentureType::Immediate => format!(
                "Immediate{} denture ({} extractions)",
                arch,
                self.extraction_teeth.len()
            ),
            DentureType::Overdenture => format!(
                "Implant overdenture{} on {} implants",
                arch,
                self.implant_positions.len()
            ),
            DentureType::Obturator => match &self.defect_class {
                Some(class) if !class.trim().is_empty() => {
                    format!("Obturator (defect class {})", class)
                }
                _ => "Obturator".to_string(),
            },
        }
    }
}
