//! Case schemas - field tables for every case type and the editor they drive

pub mod registry;
pub mod wizard;

pub use registry::{CaseSchema, CaseSchemaRegistry, FieldKind, FieldSpec, Requirement};
pub use wizard::CaseWizard;
