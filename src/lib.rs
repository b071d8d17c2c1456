//! DLO: Dental lab order toolkit
//!
//! A step-by-step order draft for dental lab work: case-specific records,
//! completion rules per wizard step, shade policy and submission. The `dlo`
//! binary drives it interactively and checks saved drafts.

pub mod cases;
pub mod cli;
pub mod core;
pub mod logging;
pub mod schema;
pub mod yaml;
