//! Review summary projection

use crate::core::draft::OrderDraft;
use crate::core::shade::needs_shade_for;

/// Case-specific one-line summary, e.g. "3-unit bridge (35-37)"
pub fn summary(draft: &OrderDraft) -> String {
    match &draft.case {
        Some(case) => case.summary(),
        None => "No case selected".to_string(),
    }
}

/// Labelled lines shown on the review step
pub fn review_lines(draft: &OrderDraft) -> Vec<(&'static str, String)> {
    let mut lines = vec![
        ("Lab", draft.lab_id.clone().unwrap_or_else(|| "-".to_string())),
        (
            "Case type",
            draft
                .case_type()
                .map(|ct| ct.label().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Case", summary(draft)),
    ];

    let impression = if draft.impression.has_impression {
        let mut parts = vec![draft
            .impression
            .material
            .clone()
            .unwrap_or_else(|| "physical".to_string())];
        if draft.impression.has_bite_registration {
            parts.push("bite registration".to_string());
        }
        if draft.impression.has_opposing_model {
            parts.push("opposing model".to_string());
        }
        parts.join(", ")
    } else {
        "Digital scan".to_string()
    };
    lines.push(("Impression", impression));

    lines.push((
        "Material",
        draft.material.clone().unwrap_or_else(|| "-".to_string()),
    ));

    if needs_shade_for(draft) {
        lines.push(("Shade", draft.shade.clone().unwrap_or_else(|| "-".to_string())));
    }

    if let Some(name) = draft.patient.name.as_deref().filter(|n| !n.trim().is_empty()) {
        let mut patient = name.trim().to_string();
        if let Some(age) = draft.patient.age {
            patient.push_str(&format!(", {}", age));
        }
        if let Some(gender) = draft.patient.gender {
            patient.push_str(&format!(", {}", gender));
        }
        lines.push(("Patient", patient));
    }

    lines.push(("Priority", draft.priority.to_string()));

    if !draft.instructions.trim().is_empty() {
        lines.push(("Instructions", draft.instructions.trim().to_string()));
    }
    if !draft.photos.is_empty() {
        lines.push(("Photos", draft.photos.len().to_string()));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cases::{Arch, CaseDetails, Denture, DentureType};
    use crate::core::case_type::CaseType;

    #[test]
    fn test_summary_without_case() {
        assert_eq!(summary(&OrderDraft::new()), "No case selected");
    }

    #[test]
    fn test_summary_for_denture() {
        let draft = OrderDraft {
            case: Some(CaseDetails::Denture(Denture {
                denture_type: Some(DentureType::Full),
                arch: Some(Arch::Upper),
                ..Default::default()
            })),
            ..Default::default()
        };
        assert_eq!(summary(&draft), "Full upper denture");
    }

    #[test]
    fn test_review_lines_hide_shade_when_not_needed() {
        let mut draft = OrderDraft {
            case: Some(CaseDetails::new(CaseType::NightGuard)),
            ..Default::default()
        };
        let labels: Vec<&str> = review_lines(&draft).iter().map(|(l, _)| *l).collect();
        assert!(!labels.contains(&"Shade"));

        draft.case = Some(CaseDetails::new(CaseType::Crown));
        draft.shade = Some("A3".to_string());
        let lines = review_lines(&draft);
        assert!(lines.contains(&("Shade", "A3".to_string())));
        assert!(lines.contains(&("Impression", "Digital scan".to_string())));
    }

    #[test]
    fn test_review_lines_patient() {
        let mut draft = OrderDraft::new();
        draft.patient.name = Some("R. Iyer".to_string());
        draft.patient.age = Some(61);
        let lines = review_lines(&draft);
        assert!(lines.contains(&("Patient", "R. Iyer, 61".to_string())));
    }
}
