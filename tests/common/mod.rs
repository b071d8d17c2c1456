//! Shared test helpers for integration tests
//!
//! Draft fixtures are written as YAML the way `dlo new` saves them.

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to get a dlo command isolated from the user's config
pub fn dlo() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("dlo"));
    cmd.env_remove("DLO_CONFIG").env_remove("DLO_LOG");
    cmd
}

/// Write a draft file into the temp directory and return its path
pub fn write_draft(tmp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

/// Two splinted zirconia crowns, complete and parked on the review step
pub const CROWN_DRAFT: &str = r#"
lab_id: lab-smile
step: review
case:
  case_type: crown
  selected_teeth: ['11', '21']
  margin_type: chamfer
  splinted: true
material: zirconia-mono
shade: A2
patient:
  name: R. Iyer
  age: 61
  phone: '9876543210'
priority: rush
instructions: Match adjacent incisal translucency
"#;

/// Night guard with a stray shade that must not reach the submission
pub const NIGHT_GUARD_DRAFT: &str = r#"
lab_id: lab-precision
step: review
case:
  case_type: night_guard
  arch: upper
  guard_type: hard
material: hard-acrylic
shade: A1
"#;

/// Bridge whose middle tooth is a pontic without a design
pub const BRIDGE_MISSING_DESIGN_DRAFT: &str = r#"
lab_id: lab-smile
step: review
case:
  case_type: bridge
  start_tooth: '35'
  end_tooth: '37'
  abutments: ['35', '37']
  pontics: ['36']
  units: 3
material: pfm
shade: A3
"#;

/// Full-metal crown: shade step skipped entirely
pub const METAL_CROWN_DRAFT: &str = r#"
lab_id: lab-ceramart
step: review
case:
  case_type: crown
  selected_teeth: ['46']
  margin_type: shoulder
material: full-metal
"#;

/// Inlay with one tooth still lacking a surface pattern
pub const INLAY_MISSING_SURFACE_DRAFT: &str = r#"
lab_id: lab-smile
step: review
case:
  case_type: inlay_onlay
  selected_teeth: ['16', '26']
  surface_involvement:
    '16': MOD
material: emax
shade: A2
"#;

/// Hand-written inlay draft with unquoted tooth codes
pub const UNQUOTED_INLAY_DRAFT: &str = r#"
lab_id: lab-smile
step: review
case:
  case_type: inlay_onlay
  selected_teeth: [16, 26]
  surface_involvement:
    16: MOD
    26: O
material: emax
shade: A2
"#;

/// Bridge carrying a unit count but no span
pub const BRIDGE_WITHOUT_SPAN_DRAFT: &str = r#"
lab_id: lab-smile
step: review
case:
  case_type: bridge
  units: 5
material: pfm
shade: A3
"#;
