//! Inlay / onlay case record
//!
//! Every selected tooth carries its own surface pattern, written as a
//! combination of the letters M, O, D, B and L (e.g. "MOD").

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::cases::CaseRecord;
use crate::core::case_type::CaseType;
use crate::core::tooth::ToothCode;

/// Surfaces a pattern may reference
pub const SURFACES: [char; 5] = ['M', 'O', 'D', 'B', 'L'];

/// Pattern offered when a tooth is first given a surface
pub const DEFAULT_SURFACE: &str = "O";

/// Check a surface pattern: non-empty, known letters, no repeats
pub fn is_valid_surface_pattern(pattern: &str) -> bool {
    let letters: Vec<char> = pattern.trim().chars().map(|c| c.to_ascii_uppercase()).collect();
    if letters.is_empty() || letters.len() > SURFACES.len() {
        return false;
    }
    let unique: BTreeSet<char> = letters.iter().copied().collect();
    unique.len() == letters.len() && letters.iter().all(|c| SURFACES.contains(c))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InlayOnlay {
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub selected_teeth: BTreeSet<ToothCode>,

    /// Surface pattern per tooth
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub surface_involvement: BTreeMap<ToothCode, String>,

    /// inlay, onlay or overlay
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restoration_kind: Option<String>,
}

impl InlayOnlay {
    /// Selected teeth lacking a valid surface pattern
    pub fn teeth_missing_surfaces(&self) -> Vec<ToothCode> {
        self.selected_teeth
            .iter()
            .filter(|tooth| {
                !self
                    .surface_involvement
                    .get(*tooth)
                    .is_some_and(|p| is_valid_surface_pattern(p))
            })
            .copied()
            .collect()
    }

    /// Toggle a tooth, dropping its surfaces when it is deselected
    pub fn toggle_tooth(&mut self, tooth: ToothCode) {
        if !self.selected_teeth.remove(&tooth) {
            self.selected_teeth.insert(tooth);
        } else {
            self.surface_involvement.remove(&tooth);
        }
    }
}

impl CaseRecord for InlayOnlay {
    const CASE_TYPE: CaseType = CaseType::InlayOnlay;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.selected_teeth.is_empty() {
            missing.push("selected_teeth");
        } else if !self.teeth_missing_surfaces().is_empty() {
            missing.push("surface_involvement");
        }
        missing
    }

    fn summary(&self) -> String {
        if self.selected_teeth.is_empty() {
            return "Inlay/onlay (no teeth selected)".to_string();
        }
        let kind = self.restoration_kind.as_deref().unwrap_or("inlay/onlay");
        let teeth = self
            .selected_teeth
            .iter()
            .map(|t| match self.surface_involvement.get(t) {
                Some(surfaces) if !surfaces.trim().is_empty() => {
                    format!("{} {}", t, surfaces.trim().to_uppercase())
                }
                _ => t.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        let noun = if self.selected_teeth.len() == 1 { "tooth" } else { "teeth" };
        format!(
            "{} on {} {} ({})",
            capitalize(kind),
            self.selected_teeth.len(),
            noun,
            teeth
        )
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tooth(code: &str) -> ToothCode {
        code.parse().unwrap()
    }

    #[test]
    fn test_surface_patterns() {
        assert!(is_valid_surface_pattern("O"));
        assert!(is_valid_surface_pattern("MOD"));
        assert!(is_valid_surface_pattern("mod"));
        assert!(is_valid_surface_pattern("MODBL"));
        assert!(!is_valid_surface_pattern(""));
        assert!(!is_valid_surface_pattern("  "));
        assert!(!is_valid_surface_pattern("MM"));
        assert!(!is_valid_surface_pattern("X"));
    }

    #[test]
    fn test_every_tooth_needs_surface() {
        let mut record = InlayOnlay::default();
        record.toggle_tooth(tooth("16"));
        record.toggle_tooth(tooth("26"));
        record
            .surface_involvement
            .insert(tooth("16"), "MOD".to_string());
        assert_eq!(record.missing_fields(), vec!["surface_involvement"]);
        assert_eq!(record.teeth_missing_surfaces(), vec![tooth("26")]);

        record
            .surface_involvement
            .insert(tooth("26"), DEFAULT_SURFACE.to_string());
        assert!(record.is_complete());
    }

    #[test]
    fn test_deselect_drops_surface() {
        let mut record = InlayOnlay::default();
        record.toggle_tooth(tooth("46"));
        record
            .surface_involvement
            .insert(tooth("46"), "DO".to_string());
        record.toggle_tooth(tooth("46"));
        assert!(record.selected_teeth.is_empty());
        assert!(record.surface_involvement.is_empty());
    }

    #[test]
    fn test_summary() {
        let mut record = InlayOnlay::default();
        record.toggle_tooth(tooth("16"));
        record
            .surface_involvement
            .insert(tooth("16"), "mod".to_string());
        record.restoration_kind = Some("onlay".to_string());
        assert_eq!(record.summary(), "Onlay on 1 tooth (16 MOD)");
    }
}
