//! Night guard case record

use serde::{Deserialize, Serialize};

use crate::cases::{is_set, Arch, CaseRecord};
use crate::core::case_type::CaseType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightGuard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,

    /// hard, soft or dual_laminate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guard_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,
}

impl CaseRecord for NightGuard {
    const CASE_TYPE: CaseType = CaseType::NightGuard;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.arch.is_none() {
            missing.push("arch");
        }
        if !is_set(&self.guard_type) {
            missing.push("guard_type");
        }
        missing
    }

    fn summary(&self) -> String {
        let kind = self
            .guard_type
            .as_deref()
            .map(|t| format!("{} ", t.replace('_', " ")))
            .unwrap_or_default();
        match self.arch {
            Some(arch) => format!("{} {}night guard", capitalize_arch(arch), kind),
            None => format!("{}night guard", kind).trim().to_string(),
        }
    }
}

fn capitalize_arch(arch: Arch) -> &'static str {
    match arch {
        Arch::Upper => "Upper",
        Arch::Lower => "Lower",
        Arch::Both => "Upper and lower",
    }
}
