//! Core module - order draft state machine and its supporting types
//!
//! - [`tooth`]: FDI tooth codes
//! - [`case_type`]: the sixteen case types
//! - [`range`]: bridge span derivation
//! - [`sequencer`]: wizard steps and navigation order
//! - [`shade`]: whether the shade step applies
//! - [`validator`]: per-step completion checks and soft warnings
//! - [`summary`]: review summary projection
//! - [`store`]: the mutable draft store
//! - [`config`] and [`catalog`]: user configuration and reference data

pub mod case_type;
pub mod catalog;
pub mod config;
pub mod draft;
pub mod range;
pub mod sequencer;
pub mod shade;
pub mod store;
pub mod submission;
pub mod summary;
pub mod tooth;
pub mod validator;

pub use case_type::CaseType;
pub use catalog::{Catalog, CatalogError, Lab, Material};
pub use config::{Config, ConfigError, OutputFormat};
pub use draft::{Gender, Impression, OrderDraft, PatientInfo, Priority};
pub use range::{derive_range, derive_range_codes, BridgeRange};
pub use sequencer::{Step, StepSequencer};
pub use shade::{needs_shade, needs_shade_for};
pub use store::{DraftError, OrderDraftStore};
pub use submission::{OrderId, OrderSubmission};
pub use tooth::{join_teeth, parse_teeth, ToothCode, ToothParseError};
pub use validator::{
    can_proceed, field_warnings, first_incomplete_step, missing_fields, FieldWarning,
};
