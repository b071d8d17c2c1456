//! Case types offered by the order wizard

use serde::{Deserialize, Serialize};

/// The sixteen kinds of lab work an order can describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    Crown,
    Bridge,
    Denture,
    Implant,
    Veneer,
    InlayOnlay,
    NightGuard,
    Retainer,
    Waxup,
    FullMouthRehab,
    SurgicalGuide,
    AllOnX,
    BleachingTray,
    SportsGuard,
    ClearAligner,
    Provisional,
}

impl CaseType {
    /// All case types in the order they are offered to the user
    pub const ALL: [CaseType; 16] = [
        CaseType::Crown,
        CaseType::Bridge,
        CaseType::Denture,
        CaseType::Implant,
        CaseType::Veneer,
        CaseType::InlayOnlay,
        CaseType::NightGuard,
        CaseType::Retainer,
        CaseType::Waxup,
        CaseType::FullMouthRehab,
        CaseType::SurgicalGuide,
        CaseType::AllOnX,
        CaseType::BleachingTray,
        CaseType::SportsGuard,
        CaseType::ClearAligner,
        CaseType::Provisional,
    ];

    pub fn all() -> &'static [CaseType] {
        &Self::ALL
    }

    /// Machine tag, as used in draft files
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::Crown => "crown",
            CaseType::Bridge => "bridge",
            CaseType::Denture => "denture",
            CaseType::Implant => "implant",
            CaseType::Veneer => "veneer",
            CaseType::InlayOnlay => "inlay_onlay",
            CaseType::NightGuard => "night_guard",
            CaseType::Retainer => "retainer",
            CaseType::Waxup => "waxup",
            CaseType::FullMouthRehab => "full_mouth_rehab",
            CaseType::SurgicalGuide => "surgical_guide",
            CaseType::AllOnX => "all_on_x",
            CaseType::BleachingTray => "bleaching_tray",
            CaseType::SportsGuard => "sports_guard",
            CaseType::ClearAligner => "clear_aligner",
            CaseType::Provisional => "provisional",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            CaseType::Crown => "Crown",
            CaseType::Bridge => "Bridge",
            CaseType::Denture => "Denture",
            CaseType::Implant => "Implant",
            CaseType::Veneer => "Veneer",
            CaseType::InlayOnlay => "Inlay / Onlay",
            CaseType::NightGuard => "Night Guard",
            CaseType::Retainer => "Retainer",
            CaseType::Waxup => "Wax-up",
            CaseType::FullMouthRehab => "Full Mouth Rehab",
            CaseType::SurgicalGuide => "Surgical Guide",
            CaseType::AllOnX => "All-on-X",
            CaseType::BleachingTray => "Bleaching Tray",
            CaseType::SportsGuard => "Sports Guard",
            CaseType::ClearAligner => "Clear Aligner",
            CaseType::Provisional => "Provisional",
        }
    }
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' ', '/'], "_");
        CaseType::ALL
            .iter()
            .find(|ct| ct.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown case type: {}", s))
    }
}
