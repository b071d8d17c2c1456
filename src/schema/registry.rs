//! Case schema registry - field tables per case type
//!
//! Describes every field of each case record, how it is entered and when it
//! is required. The completion checks themselves live on the records; this
//! table drives generic editors and the `schema` command.

use std::collections::HashMap;

use crate::cases::{CaseDetails, DentureType, FmrStage, ImplantStage, RetainerType};
use crate::core::case_type::CaseType;

/// How a field's value is entered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Teeth toggled on the chart
    Teeth,
    /// Implant sites toggled on the chart
    ImplantSites,
    /// Teeth bonded to a fixed retainer
    BondedTeeth,
    /// Surface pattern per selected tooth
    Surfaces,
    /// Bridge start and end teeth
    ToothRange,
    /// Computed from other fields
    Derived,
    /// One of a fixed set of values
    Choice(&'static [&'static str]),
    Arch,
    Flag,
    Count,
    Text,
}

impl FieldKind {
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::Teeth => "teeth",
            FieldKind::ImplantSites => "implant sites",
            FieldKind::BondedTeeth => "bonded teeth",
            FieldKind::Surfaces => "surfaces",
            FieldKind::ToothRange => "tooth range",
            FieldKind::Derived => "derived",
            FieldKind::Choice(_) => "choice",
            FieldKind::Arch => "arch",
            FieldKind::Flag => "yes/no",
            FieldKind::Count => "number",
            FieldKind::Text => "text",
        }
    }

    /// Whether the value is a plain scalar settable by name
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            FieldKind::Choice(_)
                | FieldKind::Arch
                | FieldKind::Flag
                | FieldKind::Count
                | FieldKind::Text
        )
    }
}

/// When a field must be filled in
#[derive(Debug, Clone, Copy)]
pub enum Requirement {
    Required,
    Optional,
    /// Required only while `applies` holds for the record
    When {
        condition: &'static str,
        applies: fn(&CaseDetails) -> bool,
    },
}

impl Requirement {
    pub fn label(&self) -> String {
        match self {
            Requirement::Required => "required".to_string(),
            Requirement::Optional => "optional".to_string(),
            Requirement::When { condition, .. } => format!("when {}", condition),
        }
    }

    /// Whether an editor should offer the field for this record
    pub fn is_relevant(&self, case: &CaseDetails) -> bool {
        match self {
            Requirement::Required | Requirement::Optional => true,
            Requirement::When { applies, .. } => applies(case),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub requirement: Requirement,
}

const fn field(name: &'static str, kind: FieldKind, requirement: Requirement) -> FieldSpec {
    FieldSpec {
        name,
        kind,
        requirement,
    }
}

/// Field table for one case type
#[derive(Debug, Clone, Copy)]
pub struct CaseSchema {
    pub case_type: CaseType,
    pub fields: &'static [FieldSpec],
}

impl CaseSchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

use FieldKind::*;
use Requirement::{Optional, Required};

const MARGINS: &[&str] = &["chamfer", "shoulder", "knife_edge", "feather_edge"];
const DENTURE_TYPES: &[&str] = &["full", "partial", "immediate", "overdenture", "obturator"];
const IMPLANT_STAGES: &[&str] = &["healing", "ready", "impression_taken"];
const RETAINER_TYPES: &[&str] = &["hawley", "essix", "fixed"];
const WAXUP_PURPOSES: &[&str] = &["diagnostic", "mockup"];
const FMR_STAGES: &[&str] = &[
    "diagnostic",
    "provisionals",
    "trial_bite",
    "bisque_trial",
    "final_upper",
    "final_lower",
    "final_both",
];
const GUIDE_SUPPORTS: &[&str] = &["tooth", "mucosa", "bone"];

fn denture_is(case: &CaseDetails, kind: DentureType) -> bool {
    matches!(case, CaseDetails::Denture(d) if d.denture_type == Some(kind))
}

fn denture_not_obturator(case: &CaseDetails) -> bool {
    matches!(
        case,
        CaseDetails::Denture(d)
            if d.denture_type.is_some_and(|t| t != DentureType::Obturator)
    )
}

fn denture_full(case: &CaseDetails) -> bool {
    denture_is(case, DentureType::Full)
}

fn denture_partial(case: &CaseDetails) -> bool {
    denture_is(case, DentureType::Partial)
}

fn denture_immediate(case: &CaseDetails) -> bool {
    denture_is(case, DentureType::Immediate)
}

fn denture_overdenture(case: &CaseDetails) -> bool {
    denture_is(case, DentureType::Overdenture)
}

fn denture_obturator(case: &CaseDetails) -> bool {
    denture_is(case, DentureType::Obturator)
}

fn implant_loaded(case: &CaseDetails) -> bool {
    matches!(
        case,
        CaseDetails::Implant(i)
            if matches!(i.implant_stage, Some(ImplantStage::Ready | ImplantStage::ImpressionTaken))
    )
}

fn retainer_fixed(case: &CaseDetails) -> bool {
    matches!(case, CaseDetails::Retainer(r) if r.retainer_type == Some(RetainerType::Fixed))
}

fn inlay_has_teeth(case: &CaseDetails) -> bool {
    matches!(case, CaseDetails::InlayOnlay(r) if !r.selected_teeth.is_empty())
}

fn crown_has_post(case: &CaseDetails) -> bool {
    matches!(case, CaseDetails::Crown(c) if c.needs_post_core)
}

fn crown_multiple(case: &CaseDetails) -> bool {
    matches!(case, CaseDetails::Crown(c) if c.selected_teeth.len() > 1)
}

fn bridge_has_pontics(case: &CaseDetails) -> bool {
    matches!(case, CaseDetails::Bridge(b) if !b.pontics.is_empty())
}

fn fmr_in(case: &CaseDetails, stages: &[FmrStage]) -> bool {
    case.fmr_stage().is_some_and(|s| stages.contains(&s))
}

fn fmr_planning(case: &CaseDetails) -> bool {
    fmr_in(
        case,
        &[
            FmrStage::Diagnostic,
            FmrStage::Provisionals,
            FmrStage::FinalUpper,
            FmrStage::FinalLower,
            FmrStage::FinalBoth,
        ],
    )
}

fn fmr_restorative(case: &CaseDetails) -> bool {
    fmr_in(
        case,
        &[
            FmrStage::Provisionals,
            FmrStage::FinalUpper,
            FmrStage::FinalLower,
            FmrStage::FinalBoth,
        ],
    )
}

fn fmr_try_in(case: &CaseDetails) -> bool {
    fmr_in(case, &[FmrStage::TrialBite, FmrStage::BisqueTrial])
}

fn fmr_trial_bite(case: &CaseDetails) -> bool {
    fmr_in(case, &[FmrStage::TrialBite])
}

fn fmr_bisque(case: &CaseDetails) -> bool {
    fmr_in(case, &[FmrStage::BisqueTrial])
}

const fn when(condition: &'static str, applies: fn(&CaseDetails) -> bool) -> Requirement {
    Requirement::When { condition, applies }
}

const CROWN: &[FieldSpec] = &[
    field("selected_teeth", Teeth, Required),
    field("margin_type", Choice(MARGINS), Required),
    field("occlusal_reduction", Text, Optional),
    field("opposing_dentition", Text, Optional),
    field("needs_post_core", Flag, Optional),
    field("post_type", Text, when("post and core is needed", crown_has_post)),
    field("splinted", Flag, when("more than one tooth", crown_multiple)),
];

const BRIDGE: &[FieldSpec] = &[
    field("start_tooth", ToothRange, Required),
    field("end_tooth", ToothRange, Required),
    field("abutments", Derived, Optional),
    field("pontics", Derived, Optional),
    field("units", Derived, Required),
    field("pontic_design", Text, when("the span has pontics", bridge_has_pontics)),
    field("connector_type", Text, Optional),
];

const DENTURE: &[FieldSpec] = &[
    field("denture_type", Choice(DENTURE_TYPES), Required),
    field("arch", Arch, when("not an obturator", denture_not_obturator)),
    field("base_material", Text, when("full", denture_full)),
    field("teeth_setup", Text, Optional),
    field("missing_teeth", Teeth, when("partial", denture_partial)),
    field("framework_type", Text, when("partial", denture_partial)),
    field("clasp_design", Text, Optional),
    field("extraction_teeth", Teeth, when("immediate", denture_immediate)),
    field("implant_positions", ImplantSites, when("overdenture (2 or more)", denture_overdenture)),
    field("attachment_type", Text, when("overdenture", denture_overdenture)),
    field("obturator_type", Text, when("obturator", denture_obturator)),
    field("defect_class", Text, when("obturator", denture_obturator)),
    field("defect_extent", Text, when("obturator", denture_obturator)),
    field("retention_method", Text, when("obturator", denture_obturator)),
];

const IMPLANT: &[FieldSpec] = &[
    field("positions", ImplantSites, Required),
    field("implant_stage", Choice(IMPLANT_STAGES), Required),
    field("implant_system", Text, when("ready or impression taken", implant_loaded)),
    field("platform", Text, when("ready or impression taken", implant_loaded)),
    field("connection", Text, when("ready or impression taken", implant_loaded)),
    field("impression_technique", Text, when("ready or impression taken", implant_loaded)),
    field("restoration_type", Text, when("ready or impression taken", implant_loaded)),
    field("abutment_type", Text, when("ready or impression taken", implant_loaded)),
];

const VENEER: &[FieldSpec] = &[
    field("selected_teeth", Teeth, Required),
    field("veneer_type", Text, Optional),
    field("prep_type", Text, Required),
];

const INLAY_ONLAY: &[FieldSpec] = &[
    field("selected_teeth", Teeth, Required),
    field("surface_involvement", Surfaces, when("for every selected tooth", inlay_has_teeth)),
    field("restoration_kind", Choice(&["inlay", "onlay"]), Optional),
];

const NIGHT_GUARD: &[FieldSpec] = &[
    field("arch", Arch, Required),
    field("guard_type", Choice(&["hard", "soft", "dual_laminate"]), Required),
    field("thickness", Text, Optional),
];

const RETAINER: &[FieldSpec] = &[
    field("arch", Arch, Required),
    field("retainer_type", Choice(RETAINER_TYPES), Required),
    field("bonded_teeth", BondedTeeth, when("fixed", retainer_fixed)),
];

const WAXUP: &[FieldSpec] = &[
    field("selected_teeth", Teeth, Required),
    field("purpose", Choice(WAXUP_PURPOSES), Required),
];

const FULL_MOUTH_REHAB: &[FieldSpec] = &[
    field("stage", Choice(FMR_STAGES), Required),
    field("ovd", Text, when("diagnostic, provisional or final", fmr_planning)),
    field("treatment_approach", Text, when("diagnostic, provisional or final", fmr_planning)),
    field("arch", Arch, when("trial bite or bisque trial", fmr_try_in)),
    field("ovd_verified", Flag, when("trial bite (or centric)", fmr_trial_bite)),
    field("centric_verified", Flag, when("trial bite (or OVD)", fmr_trial_bite)),
    field("contacts_checked", Flag, when("bisque trial (any check)", fmr_bisque)),
    field("occlusion_checked", Flag, when("bisque trial (any check)", fmr_bisque)),
    field("esthetics_checked", Flag, when("bisque trial (any check)", fmr_bisque)),
    field("phonetics_checked", Flag, when("bisque trial (any check)", fmr_bisque)),
    field("guide_scheme", Text, when("provisional or final", fmr_restorative)),
    field("selected_teeth", Teeth, when("provisional or final", fmr_restorative)),
];

const SURGICAL_GUIDE: &[FieldSpec] = &[
    field("implant_positions", ImplantSites, Required),
    field("guide_support", Choice(GUIDE_SUPPORTS), Required),
    field("sleeve_system", Text, Optional),
    field("cbct_provided", Flag, Required),
];

const ALL_ON_X: &[FieldSpec] = &[
    field("arch", Arch, Required),
    field("implant_count", Count, Required),
    field("prosthesis_type", Text, Required),
];

const BLEACHING_TRAY: &[FieldSpec] = &[
    field("arch", Arch, Required),
    field("reservoirs", Flag, Optional),
];

const SPORTS_GUARD: &[FieldSpec] = &[
    field("thickness", Text, Required),
    field("color", Text, Required),
];

const CLEAR_ALIGNER: &[FieldSpec] = &[
    field("arch", Arch, Required),
    field("treatment_goal", Text, Required),
    field("attachments_allowed", Flag, Optional),
    field("ipr_allowed", Flag, Optional),
];

const PROVISIONAL: &[FieldSpec] = &[
    field("selected_teeth", Teeth, Required),
    field("provisional_type", Text, Required),
];

/// Registry of case field tables
pub struct CaseSchemaRegistry {
    schemas: HashMap<CaseType, CaseSchema>,
}

impl CaseSchemaRegistry {
    pub fn new() -> Self {
        let schemas = CaseType::all()
            .iter()
            .map(|ct| {
                let schema = CaseSchema {
                    case_type: *ct,
                    fields: fields_for(*ct),
                };
                (*ct, schema)
            })
            .collect();
        Self { schemas }
    }

    pub fn get(&self, case_type: CaseType) -> Option<&CaseSchema> {
        self.schemas.get(&case_type)
    }

    /// All schemas in case type order
    pub fn iter(&self) -> impl Iterator<Item = &CaseSchema> {
        CaseType::all().iter().filter_map(|ct| self.schemas.get(ct))
    }
}

impl Default for CaseSchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn fields_for(case_type: CaseType) -> &'static [FieldSpec] {
    match case_type {
        CaseType::Crown => CROWN,
        CaseType::Bridge => BRIDGE,
        CaseType::Denture => DENTURE,
        CaseType::Implant => IMPLANT,
        CaseType::Veneer => VENEER,
        CaseType::InlayOnlay => INLAY_ONLAY,
        CaseType::NightGuard => NIGHT_GUARD,
        CaseType::Retainer => RETAINER,
        CaseType::Waxup => WAXUP,
        CaseType::FullMouthRehab => FULL_MOUTH_REHAB,
        CaseType::SurgicalGuide => SURGICAL_GUIDE,
        CaseType::AllOnX => ALL_ON_X,
        CaseType::BleachingTray => BLEACHING_TRAY,
        CaseType::SportsGuard => SPORTS_GUARD,
        CaseType::ClearAligner => CLEAR_ALIGNER,
        CaseType::Provisional => PROVISIONAL,
    }
}
