//! Bridge case record

use serde::{Deserialize, Serialize};

use crate::cases::{is_set, CaseRecord};
use crate::core::case_type::CaseType;
use crate::core::range::{derive_range, BridgeRange};
use crate::core::tooth::ToothCode;

/// Minimum span for a true bridge
pub const MIN_BRIDGE_UNITS: usize = 3;

/// Fixed partial denture spanning a single quadrant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bridge {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_tooth: Option<ToothCode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_tooth: Option<ToothCode>,

    /// Abutment teeth, in span order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub abutments: Vec<ToothCode>,

    /// Pontic teeth, in span order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub pontics: Vec<ToothCode>,

    pub units: usize,

    /// Pontic form (ovate, modified ridge lap, sanitary, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pontic_design: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connector_type: Option<String>,
}

impl Bridge {
    /// Replace the span with the one derived from `start`..`end`
    pub fn set_range(&mut self, start: ToothCode, end: ToothCode) {
        let BridgeRange {
            abutments,
            pontics,
            units,
            ..
        } = derive_range(start, end);
        self.start_tooth = Some(start);
        self.end_tooth = Some(end);
        self.abutments = abutments;
        self.pontics = pontics;
        self.units = units;
    }

    /// Move a tooth between abutments and pontics
    ///
    /// Teeth outside the span are ignored.
    pub fn toggle_abutment(&mut self, tooth: ToothCode) {
        if let Some(idx) = self.abutments.iter().position(|t| *t == tooth) {
            self.abutments.remove(idx);
            self.pontics.push(tooth);
            self.pontics.sort();
        } else if let Some(idx) = self.pontics.iter().position(|t| *t == tooth) {
            self.pontics.remove(idx);
            self.abutments.push(tooth);
            self.abutments.sort();
        }
    }

    /// Unit count backed by a span that matches start and end
    ///
    /// `None` when the endpoints are unset, cross quadrants, or when the
    /// stored abutments, pontics or `units` disagree with them.
    pub fn checked_units(&self) -> Option<usize> {
        let (start, end) = (self.start_tooth?, self.end_tooth?);
        let expected = derive_range(start, end);
        let consistent = !expected.span.is_empty()
            && self.span() == expected.span
            && self.units == expected.units;
        consistent.then_some(expected.units)
    }

    /// Span covered by the bridge, in order
    pub fn span(&self) -> Vec<ToothCode> {
        let mut span: Vec<ToothCode> = self
            .abutments
            .iter()
            .chain(self.pontics.iter())
            .copied()
            .collect();
        span.sort();
        span
    }
}

impl CaseRecord for Bridge {
    const CASE_TYPE: CaseType = CaseType::Bridge;

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.checked_units().is_some_and(|units| units >= MIN_BRIDGE_UNITS) {
            missing.push("units");
        }
        if !self.pontics.is_empty() && !is_set(&self.pontic_design) {
            missing.push("pontic_design");
        }
        missing
    }

    fn summary(&self) -> String {
        let span = self.span();
        match (self.checked_units(), span.first(), span.last()) {
            (Some(units), Some(low), Some(high)) => {
                format!("{}-unit bridge ({}-{})", units, low, high)
            }
            _ => "Bridge (no span selected)".to_string(),
        }
    }
}
