//! Wizard step sequencing
//!
//! The wizard runs through nine logical steps. The shade step is skipped when
//! the shade policy says the case needs no shade; the skip affects navigation
//! and the progress display, never the internal step numbers.

use serde::{Deserialize, Serialize};

/// Logical wizard step, numbered 1-9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum Step {
    #[default]
    Lab = 1,
    CaseType = 2,
    Selection = 3,
    Impression = 4,
    Material = 5,
    Shade = 6,
    PatientInfo = 7,
    Details = 8,
    Review = 9,
}

impl Step {
    /// The canonical order of steps
    pub const ORDER: [Step; 9] = [
        Step::Lab,
        Step::CaseType,
        Step::Selection,
        Step::Impression,
        Step::Material,
        Step::Shade,
        Step::PatientInfo,
        Step::Details,
        Step::Review,
    ];

    pub fn first() -> Step {
        Self::ORDER[0]
    }

    pub fn last() -> Step {
        Self::ORDER[Self::ORDER.len() - 1]
    }

    /// Internal step number (1-9)
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Step for an internal number, clamped into 1-9
    pub fn from_number(number: u8) -> Step {
        let idx = number.clamp(1, Self::ORDER.len() as u8) as usize - 1;
        Self::ORDER[idx]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::Lab => "Select Lab",
            Step::CaseType => "Case Type",
            Step::Selection => "Clinical Selection",
            Step::Impression => "Impression",
            Step::Material => "Material",
            Step::Shade => "Shade",
            Step::PatientInfo => "Patient Info",
            Step::Details => "Notes & Photos",
            Step::Review => "Review",
        }
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.number(), self.title())
    }
}

/// Navigation rules for the wizard
pub struct StepSequencer;

impl StepSequencer {
    /// Step after `step`; Material jumps over Shade when no shade is needed
    pub fn next(step: Step, needs_shade: bool) -> Step {
        if step == Step::Material && !needs_shade {
            return Step::PatientInfo;
        }
        Step::from_number(step.number().saturating_add(1))
    }

    /// Step before `step`; PatientInfo jumps back over Shade when no shade is needed
    pub fn prev(step: Step, needs_shade: bool) -> Step {
        if step == Step::PatientInfo && !needs_shade {
            return Step::Material;
        }
        Step::from_number(step.number().saturating_sub(1))
    }

    /// Number of steps shown to the user
    pub fn display_total(needs_shade: bool) -> u8 {
        if needs_shade {
            Step::last().number()
        } else {
            Step::last().number() - 1
        }
    }

    /// Progress position shown to the user
    pub fn display_step(step: Step, needs_shade: bool) -> u8 {
        if !needs_shade && step.number() > Step::Shade.number() {
            step.number() - 1
        } else {
            step.number()
        }
    }

    /// Steps actually visited, in order
    pub fn visible_steps(needs_shade: bool) -> Vec<Step> {
        Step::ORDER
            .iter()
            .copied()
            .filter(|s| needs_shade || *s != Step::Shade)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_numbers() {
        assert_eq!(Step::Lab.number(), 1);
        assert_eq!(Step::Shade.number(), 6);
        assert_eq!(Step::Review.number(), 9);
        assert_eq!(Step::from_number(0), Step::Lab);
        assert_eq!(Step::from_number(42), Step::Review);
    }

    #[test]
    fn test_next_is_plus_one_when_shade_needed() {
        assert_eq!(StepSequencer::next(Step::Material, true), Step::Shade);
        assert_eq!(StepSequencer::next(Step::Shade, true), Step::PatientInfo);
        assert_eq!(StepSequencer::next(Step::Lab, false), Step::CaseType);
    }

    #[test]
    fn test_shade_skipped_both_directions() {
        assert_eq!(StepSequencer::next(Step::Material, false), Step::PatientInfo);
        assert_eq!(StepSequencer::prev(Step::PatientInfo, false), Step::Material);
        assert_eq!(StepSequencer::prev(Step::PatientInfo, true), Step::Shade);
    }

    #[test]
    fn test_clamped_at_ends() {
        assert_eq!(StepSequencer::next(Step::Review, true), Step::Review);
        assert_eq!(StepSequencer::prev(Step::Lab, true), Step::Lab);
    }

    #[test]
    fn test_display_total() {
        assert_eq!(StepSequencer::display_total(true), 9);
        assert_eq!(StepSequencer::display_total(false), 8);
    }

    #[test]
    fn test_display_step_always_in_range() {
        for needs_shade in [true, false] {
            let total = StepSequencer::display_total(needs_shade);
            for step in Step::ORDER {
                let shown = StepSequencer::display_step(step, needs_shade);
                assert!(
                    (1..=total).contains(&shown),
                    "{step} shown as {shown}/{total}"
                );
            }
        }
    }

    #[test]
    fn test_display_step_renumbers_after_shade() {
        assert_eq!(StepSequencer::display_step(Step::Material, false), 5);
        assert_eq!(StepSequencer::display_step(Step::PatientInfo, false), 6);
        assert_eq!(StepSequencer::display_step(Step::Review, false), 8);
        assert_eq!(StepSequencer::display_step(Step::Review, true), 9);
    }

    #[test]
    fn test_visible_steps() {
        assert_eq!(StepSequencer::visible_steps(true).len(), 9);
        let skipped = StepSequencer::visible_steps(false);
        assert_eq!(skipped.len(), 8);
        assert!(!skipped.contains(&Step::Shade));
    }

    #[test]
    fn test_walk_forward_without_shade() {
        let mut step = Step::first();
        let mut visited = vec![step];
        while step != Step::last() {
            step = StepSequencer::next(step, false);
            visited.push(step);
        }
        assert_eq!(visited, StepSequencer::visible_steps(false));
    }
}
