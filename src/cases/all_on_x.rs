//! All-on-X full-arch implant prosthesis case record

use serde::{Deserialize, Serialize};

use crate::cases::{is_set, Arch, CaseRecord};
use crate::core::case_type::CaseType;

/// Fewest implants an All-on-X prosthesis is planned on
pub const MIN_ALL_ON_X_IMPLANTS: u8 = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllOnX {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub implant_count: Option<u8>,

    /// hybrid acrylic, monolithic zirconia, ...
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prosthesis_type: Option<String>,
}

impl CaseRecord for AllOnX {
    const CASE_TYPE: CaseType = CaseType::AllOnX;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.arch.is_none() {
            missing.push("arch");
        }
        if !self
            .implant_count
            .is_some_and(|count| count >= MIN_ALL_ON_X_IMPLANTS)
        {
            missing.push("implant_count");
        }
        if !is_set(&self.prosthesis_type) {
            missing.push("prosthesis_type");
        }
        missing
    }

    fn summary(&self) -> String {
        let count = self
            .implant_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "X".to_string());
        match self.arch {
            Some(arch) => format!("All-on-{} {}", count, arch.label()),
            None => format!("All-on-{}", count),
        }
    }
}
