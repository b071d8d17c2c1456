//! Order draft store
//!
//! Owns the draft for one wizard session. All writes go through the setters
//! here; they never fail. Invalid combinations are accepted and simply keep
//! the relevant step from completing.
//!
//! The store is a plain value: create one per session and call [`reset`]
//! (or drop it) when the session ends.
//!
//! [`reset`]: OrderDraftStore::reset

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::cases::{
    AllOnX, BleachingTray, Bridge, CaseDetails, ClearAligner, Crown, Denture, FullMouthRehab,
    Implant, InlayOnlay, NightGuard, Provisional, Retainer, RetainerType, SportsGuard,
    SurgicalGuide, Veneer, Waxup,
};
use crate::core::case_type::CaseType;
use crate::core::draft::{Gender, OrderDraft, Priority};
use crate::core::sequencer::{Step, StepSequencer};
use crate::core::shade::needs_shade_for;
use crate::core::submission::{OrderId, OrderSubmission};
use crate::core::summary;
use crate::core::tooth::ToothCode;
use crate::core::validator::{self, FieldWarning};

/// Errors returned by [`OrderDraftStore::submit`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Order can only be submitted from the review step (current: {current})")]
    NotAtReview { current: Step },

    #[error("Step {step} is incomplete: missing {}", missing.join(", "))]
    Incomplete {
        step: Step,
        missing: Vec<&'static str>,
    },
}

/// Generates one partial-update helper per case record
macro_rules! case_updaters {
    ($($(#[$doc:meta])* $name:ident => $variant:ident($record:ty);)*) => {
        $(
            $(#[$doc])*
            ///
            /// Returns false (and changes nothing) if another case type is active.
            pub fn $name(&mut self, update: impl FnOnce(&mut $record)) -> bool {
                match &mut self.draft.case {
                    Some(CaseDetails::$variant(record)) => {
                        update(record);
                        self.after_case_change(stringify!($name));
                        true
                    }
                    _ => false,
                }
            }
        )*
    };
}

/// Mutable draft for a single wizard session
#[derive(Debug, Clone, Default)]
pub struct OrderDraftStore {
    draft: OrderDraft,
}

impl OrderDraftStore {
    /// Start a new session with an empty draft
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume a session from a saved draft
    pub fn from_draft(draft: OrderDraft) -> Self {
        Self { draft }
    }

    /// Current draft snapshot
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    pub fn into_draft(self) -> OrderDraft {
        self.draft
    }

    pub fn step(&self) -> Step {
        self.draft.step
    }

    pub fn case_type(&self) -> Option<CaseType> {
        self.draft.case_type()
    }

    // =====================================================================
    // Shared fields
    // =====================================================================

    pub fn set_lab(&mut self, lab_id: impl Into<String>) {
        let lab_id = lab_id.into();
        debug!(lab_id = %lab_id, "lab selected");
        self.draft.lab_id = Some(lab_id);
    }

    /// Switch case type, discarding any record for the previous type
    pub fn set_case_type(&mut self, case_type: CaseType) {
        debug!(
            from = ?self.draft.case_type(),
            to = %case_type,
            "case type set, case record replaced"
        );
        self.draft.case = Some(CaseDetails::new(case_type));
    }

    pub fn set_has_impression(&mut self, has_impression: bool) {
        debug!(has_impression, "impression toggled");
        self.draft.impression.has_impression = has_impression;
    }

    pub fn set_impression_material(&mut self, material: Option<String>) {
        debug!(material = ?material, "impression material set");
        self.draft.impression.material = material;
    }

    pub fn set_bite_registration(&mut self, value: bool) {
        self.draft.impression.has_bite_registration = value;
    }

    pub fn set_opposing_model(&mut self, value: bool) {
        self.draft.impression.has_opposing_model = value;
    }

    pub fn set_material(&mut self, material: Option<String>) {
        debug!(material = ?material, "material set");
        self.draft.material = material;
    }

    pub fn set_shade(&mut self, shade: Option<String>) {
        debug!(shade = ?shade, "shade set");
        self.draft.shade = shade;
    }

    pub fn set_patient_name(&mut self, name: Option<String>) {
        self.draft.patient.name = name;
    }

    pub fn set_patient_age(&mut self, age: Option<u8>) {
        self.draft.patient.age = age;
    }

    pub fn set_patient_gender(&mut self, gender: Option<Gender>) {
        self.draft.patient.gender = gender;
    }

    pub fn set_patient_phone(&mut self, phone: Option<String>) {
        self.draft.patient.phone = phone;
    }

    pub fn set_patient_pincode(&mut self, pincode: Option<String>) {
        self.draft.patient.pincode = pincode;
    }

    pub fn set_priority(&mut self, priority: Priority) {
        debug!(priority = %priority, "priority set");
        self.draft.priority = priority;
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.draft.instructions = instructions.into();
    }

    pub fn add_photo(&mut self, photo: impl Into<String>) {
        self.draft.photos.push(photo.into());
    }

    /// Remove the photo at `index`; out-of-range indexes are ignored
    pub fn remove_photo(&mut self, index: usize) {
        if index < self.draft.photos.len() {
            self.draft.photos.remove(index);
        }
    }

    // =====================================================================
    // Case records
    // =====================================================================

    /// Apply an arbitrary change to the active case record
    pub fn update_case(&mut self, update: impl FnOnce(&mut CaseDetails)) -> bool {
        match &mut self.draft.case {
            Some(case) => {
                update(case);
                self.after_case_change("update_case");
                true
            }
            None => false,
        }
    }

    case_updaters! {
        /// Partially update the crown record
        update_crown => Crown(Crown);
        /// Partially update the bridge record
        update_bridge => Bridge(Bridge);
        update_denture => Denture(Denture);
        update_implant => Implant(Implant);
        update_veneer => Veneer(Veneer);
        update_inlay_onlay => InlayOnlay(InlayOnlay);
        update_night_guard => NightGuard(NightGuard);
        update_retainer => Retainer(Retainer);
        update_waxup => Waxup(Waxup);
        update_full_mouth_rehab => FullMouthRehab(FullMouthRehab);
        update_surgical_guide => SurgicalGuide(SurgicalGuide);
        update_all_on_x => AllOnX(AllOnX);
        update_bleaching_tray => BleachingTray(BleachingTray);
        update_sports_guard => SportsGuard(SportsGuard);
        update_clear_aligner => ClearAligner(ClearAligner);
        update_provisional => Provisional(Provisional);
    }

    /// Set the bridge span and reset the abutment/pontic split
    pub fn set_bridge_range(&mut self, start: ToothCode, end: ToothCode) -> bool {
        self.update_bridge(|bridge| bridge.set_range(start, end))
    }

    /// Move a bridge tooth between abutments and pontics
    pub fn toggle_abutment(&mut self, tooth: ToothCode) -> bool {
        self.update_bridge(|bridge| bridge.toggle_abutment(tooth))
    }

    /// Toggle a tooth on the active case's chart selection
    pub fn toggle_tooth(&mut self, tooth: ToothCode) -> bool {
        let applied = self
            .draft
            .case
            .as_mut()
            .is_some_and(|case| case.toggle_tooth(tooth));
        debug!(tooth = %tooth, applied, "tooth toggled");
        applied
    }

    /// Toggle an implant site on implant, surgical guide or overdenture cases
    pub fn toggle_implant_position(&mut self, position: ToothCode) -> bool {
        let applied = self
            .draft
            .case
            .as_mut()
            .is_some_and(|case| case.toggle_implant_position(position));
        debug!(position = %position, applied, "implant position toggled");
        applied
    }

    /// Toggle a bonded tooth on a fixed retainer
    pub fn toggle_bonded_tooth(&mut self, tooth: ToothCode) -> bool {
        let mut applied = false;
        self.update_retainer(|retainer| {
            if retainer.retainer_type == Some(RetainerType::Fixed) {
                if !retainer.bonded_teeth.remove(&tooth) {
                    retainer.bonded_teeth.insert(tooth);
                }
                applied = true;
            }
        });
        applied
    }

    /// Set the surface pattern for a selected inlay/onlay tooth
    ///
    /// Teeth that are not selected are left without a pattern.
    pub fn set_surface(&mut self, tooth: ToothCode, pattern: impl Into<String>) -> bool {
        let pattern = pattern.into().trim().to_uppercase();
        let mut applied = false;
        self.update_inlay_onlay(|record| {
            if record.selected_teeth.contains(&tooth) {
                record.surface_involvement.insert(tooth, pattern);
                applied = true;
            }
        });
        applied
    }

    fn after_case_change(&mut self, source: &'static str) {
        if let Some(CaseDetails::Crown(crown)) = &mut self.draft.case {
            crown.normalize();
        }
        debug!(source, case_type = ?self.draft.case_type(), "case record updated");
    }

    // =====================================================================
    // Derived values
    // =====================================================================

    pub fn can_proceed(&self) -> bool {
        validator::can_proceed(self.draft.step, &self.draft)
    }

    /// Fields blocking the current step
    pub fn missing_fields(&self) -> Vec<&'static str> {
        validator::missing_fields(self.draft.step, &self.draft)
    }

    pub fn needs_shade(&self) -> bool {
        needs_shade_for(&self.draft)
    }

    pub fn display_step(&self) -> u8 {
        StepSequencer::display_step(self.draft.step, self.needs_shade())
    }

    pub fn display_total(&self) -> u8 {
        StepSequencer::display_total(self.needs_shade())
    }

    pub fn summary(&self) -> String {
        summary::summary(&self.draft)
    }

    pub fn warnings(&self) -> Vec<FieldWarning> {
        validator::field_warnings(&self.draft)
    }

    // =====================================================================
    // Navigation
    // =====================================================================

    /// Advance one step if the current step is complete
    ///
    /// Returns whether the step changed.
    pub fn next_step(&mut self) -> bool {
        if !self.can_proceed() {
            debug!(step = %self.draft.step, missing = ?self.missing_fields(), "cannot proceed");
            return false;
        }
        let next = StepSequencer::next(self.draft.step, self.needs_shade());
        self.move_to(next)
    }

    /// Go back one step; returns whether the step changed
    pub fn prev_step(&mut self) -> bool {
        let prev = StepSequencer::prev(self.draft.step, self.needs_shade());
        self.move_to(prev)
    }

    /// Jump back to an earlier step (review "edit" links)
    ///
    /// Jumping forward is refused so completion checks cannot be bypassed.
    pub fn go_to(&mut self, step: Step) -> bool {
        if step > self.draft.step {
            return false;
        }
        self.move_to(step)
    }

    fn move_to(&mut self, step: Step) -> bool {
        if step == self.draft.step {
            return false;
        }
        debug!(from = %self.draft.step, to = %step, "step changed");
        self.draft.step = step;
        true
    }

    // =====================================================================
    // Lifecycle
    // =====================================================================

    /// Discard the draft and start over
    pub fn reset(&mut self) {
        info!("order draft reset");
        self.draft = OrderDraft::new();
    }

    /// Produce the final order and reset the store
    ///
    /// The store is left untouched when the draft cannot be submitted.
    pub fn submit(&mut self) -> Result<OrderSubmission, DraftError> {
        if self.draft.step != Step::Review {
            return Err(DraftError::NotAtReview {
                current: self.draft.step,
            });
        }
        if let Some(step) = validator::first_incomplete_step(&self.draft) {
            return Err(DraftError::Incomplete {
                step,
                missing: validator::missing_fields(step, &self.draft),
            });
        }

        let draft = &self.draft;
        let (Some(lab_id), Some(case), Some(material)) =
            (&draft.lab_id, &draft.case, &draft.material)
        else {
            return Err(DraftError::Incomplete {
                step: Step::Lab,
                missing: validator::missing_fields(Step::Lab, draft),
            });
        };

        let submission = OrderSubmission {
            id: OrderId::new(),
            submitted_at: Utc::now(),
            lab_id: lab_id.clone(),
            case: case.clone(),
            impression: draft.impression.clone(),
            material: material.clone(),
            shade: if self.needs_shade() {
                draft.shade.clone()
            } else {
                None
            },
            patient: draft.patient.clone(),
            priority: draft.priority,
            instructions: draft.instructions.trim().to_string(),
            photos: draft.photos.clone(),
            summary: self.summary(),
        };
        self.draft = OrderDraft::new();

        info!(order_id = %submission.id, summary = %submission.summary, "order submitted");
        Ok(submission)
    }
}
