//! CLI command implementations

pub mod check;
pub mod completions;
pub mod new;
pub mod schema;
pub mod submit;
pub mod summary;
