//! Step completion checks
//!
//! `can_proceed` gates forward navigation. Incompleteness is not an error: it
//! is recomputed after every mutation and resolved by more input.
//! `field_warnings` reports malformed optional fields without blocking.

use serde::Serialize;

use crate::cases::is_set;
use crate::core::draft::OrderDraft;
use crate::core::sequencer::Step;
use crate::core::shade::needs_shade_for;

/// Required digits in a patient phone number
pub const PHONE_DIGITS: usize = 10;

/// Required digits in a delivery pincode
pub const PINCODE_DIGITS: usize = 6;

const MAX_PATIENT_AGE: u8 = 120;

/// Whether the wizard may advance past `step`
pub fn can_proceed(step: Step, draft: &OrderDraft) -> bool {
    missing_fields(step, draft).is_empty()
}

/// What is blocking `step`; empty when the step is complete
pub fn missing_fields(step: Step, draft: &OrderDraft) -> Vec<&'static str> {
    match step {
        Step::Lab => {
            if is_set(&draft.lab_id) {
                vec![]
            } else {
                vec!["lab_id"]
            }
        }
        Step::CaseType => {
            if draft.case.is_some() {
                vec![]
            } else {
                vec!["case_type"]
            }
        }
        Step::Selection => match &draft.case {
            Some(case) => case.missing_fields(),
            None => vec!["case_type"],
        },
        Step::Impression => {
            if draft.impression.has_impression && !is_set(&draft.impression.material) {
                vec!["impression.material"]
            } else {
                vec![]
            }
        }
        Step::Material => {
            if is_set(&draft.material) {
                vec![]
            } else {
                vec!["material"]
            }
        }
        Step::Shade => {
            if !needs_shade_for(draft) || is_set(&draft.shade) {
                vec![]
            } else {
                vec!["shade"]
            }
        }
        Step::PatientInfo | Step::Details | Step::Review => vec![],
    }
}

/// First step that is not yet complete, checking every step before Review
pub fn first_incomplete_step(draft: &OrderDraft) -> Option<Step> {
    Step::ORDER
        .iter()
        .copied()
        .filter(|s| *s < Step::Review)
        .find(|s| !can_proceed(*s, draft))
}

/// A non-blocking problem with an optional field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWarning {
    pub field: &'static str,
    pub message: String,
}

/// Soft validation of optional patient fields
///
/// These never block navigation; the UI shows them inline.
pub fn field_warnings(draft: &OrderDraft) -> Vec<FieldWarning> {
    let mut warnings = Vec::new();
    let patient = &draft.patient;

    if let Some(phone) = patient.phone.as_deref().filter(|p| !p.trim().is_empty()) {
        if !is_digits(phone, PHONE_DIGITS) {
            warnings.push(FieldWarning {
                field: "patient.phone",
                message: format!("Phone number should be {} digits", PHONE_DIGITS),
            });
        }
    }

    if let Some(pincode) = patient.pincode.as_deref().filter(|p| !p.trim().is_empty()) {
        if !is_digits(pincode, PINCODE_DIGITS) {
            warnings.push(FieldWarning {
                field: "patient.pincode",
                message: format!("Pincode should be {} digits", PINCODE_DIGITS),
            });
        }
    }

    if patient.age.is_some_and(|age| age > MAX_PATIENT_AGE) {
        warnings.push(FieldWarning {
            field: "patient.age",
            message: format!("Age above {} looks like a typo", MAX_PATIENT_AGE),
        });
    }

    warnings
}

/// Parse a typed patient age; blank means "not given"
pub fn parse_age(input: &str) -> Result<Option<u8>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<u8>()
        .map(Some)
        .map_err(|_| format!("Age must be a whole number of years, got '{}'", input))
}

fn is_digits(value: &str, len: usize) -> bool {
    let value = value.trim();
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}
