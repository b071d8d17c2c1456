//! Bleaching tray case record

use serde::{Deserialize, Serialize};

use crate::cases::{Arch, CaseRecord};
use crate::core::case_type::CaseType;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BleachingTray {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arch: Option<Arch>,

    /// Gel reservoirs on the labial surfaces
    pub reservoirs: bool,
}

impl CaseRecord for BleachingTray {
    const CASE_TYPE: CaseType = CaseType::BleachingTray;

    fn missing_fields(&self) -> Vec<&'static str> {
        if self.arch.is_none() {
            vec!["arch"]
        } else {
            Vec::new()
        }
    }

    fn summary(&self) -> String {
        let reservoirs = if self.reservoirs { " with reservoirs" } else { "" };
        match self.arch {
            Some(arch) => format!("Bleaching trays ({}){}", arch.label(), reservoirs),
            None => format!("Bleaching trays{}", reservoirs),
        }
    }
}
