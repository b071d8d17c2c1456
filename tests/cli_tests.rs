//! CLI surface tests - help, schema, completions, config

mod common;

use common::{dlo, write_draft, CROWN_DRAFT};
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn test_help_lists_commands() {
    dlo()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("submit"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn test_version() {
    dlo()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("dlo"));
}

#[test]
fn test_schema_lists_case_types() {
    dlo()
        .arg("schema")
        .assert()
        .success()
        .stdout(predicate::str::contains("inlay_onlay"))
        .stdout(predicate::str::contains("Full Mouth Rehab"))
        .stdout(predicate::str::contains("clear_aligner"));
}

#[test]
fn test_schema_for_denture_shows_conditions() {
    dlo()
        .args(["schema", "denture"])
        .assert()
        .success()
        .stdout(predicate::str::contains("framework_type"))
        .stdout(predicate::str::contains("when partial"))
        .stdout(predicate::str::contains("obturator"));
}

#[test]
fn test_schema_accepts_dashed_name() {
    dlo()
        .args(["schema", "all-on-x"])
        .assert()
        .success()
        .stdout(predicate::str::contains("implant_count"));
}

#[test]
fn test_schema_unknown_case_type() {
    dlo()
        .args(["schema", "braces"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("braces"));
}

#[test]
fn test_completions_bash() {
    dlo()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dlo"));
}

#[test]
fn test_config_sets_default_format() {
    let tmp = TempDir::new().unwrap();
    let config = write_draft(&tmp, "config.yaml", "format: json\n");
    let draft = write_draft(&tmp, "crown.yaml", CROWN_DRAFT);

    dlo()
        .env("DLO_CONFIG", config.to_str().unwrap())
        .args(["submit", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"));
}

#[test]
fn test_invalid_config_is_reported() {
    let tmp = TempDir::new().unwrap();
    let config = write_draft(&tmp, "config.yaml", "default_priority: whenever\n");
    let draft = write_draft(&tmp, "crown.yaml", CROWN_DRAFT);

    dlo()
        .args([
            "--config",
            config.to_str().unwrap(),
            "submit",
            draft.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "crown.yaml", CROWN_DRAFT);

    dlo()
        .args(["-v", "submit", "--format", "json", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("{"))
        .stderr(predicate::str::contains("order submitted"));
}
