//! Bridge span derivation
//!
//! Turns a start and end tooth into the span of teeth a bridge covers and the
//! default abutment/pontic split. Pure: the same pair always yields the same
//! result.

use serde::{Deserialize, Serialize};

use crate::core::tooth::ToothCode;

/// Teeth covered by a bridge and their default roles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeRange {
    /// Every tooth from start to end, ascending by position
    pub span: Vec<ToothCode>,
    /// Teeth carrying a retainer crown
    pub abutments: Vec<ToothCode>,
    /// Replacement teeth between abutments
    pub pontics: Vec<ToothCode>,
    /// Number of units (span length)
    pub units: usize,
}

impl BridgeRange {
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }
}

/// Derive the bridge span between two teeth
///
/// Cross-quadrant bridges are not supported and yield an empty range.
pub fn derive_range(start: ToothCode, end: ToothCode) -> BridgeRange {
    if start.quadrant() != end.quadrant() {
        return BridgeRange::default();
    }

    let quadrant = start.quadrant();
    let low = start.position().min(end.position());
    let high = start.position().max(end.position());

    let span: Vec<ToothCode> = (low..=high)
        .filter_map(|position| ToothCode::new(quadrant, position).ok())
        .collect();

    let (abutments, pontics) = match span.as_slice() {
        [] => (Vec::new(), Vec::new()),
        [only] => (vec![*only], Vec::new()),
        [first, middle @ .., last] => (vec![*first, *last], middle.to_vec()),
    };

    BridgeRange {
        units: span.len(),
        span,
        abutments,
        pontics,
    }
}

/// Derive a range from raw codes; malformed codes give an empty range
pub fn derive_range_codes(start: &str, end: &str) -> BridgeRange {
    match (start.parse::<ToothCode>(), end.parse::<ToothCode>()) {
        (Ok(start), Ok(end)) => derive_range(start, end),
        _ => BridgeRange::default(),
    }
}
