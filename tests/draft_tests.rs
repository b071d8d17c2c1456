//! Draft file commands - check, summary and submit

mod common;

use common::{
    dlo, write_draft, BRIDGE_MISSING_DESIGN_DRAFT, BRIDGE_WITHOUT_SPAN_DRAFT, CROWN_DRAFT,
    INLAY_MISSING_SURFACE_DRAFT, METAL_CROWN_DRAFT, NIGHT_GUARD_DRAFT, UNQUOTED_INLAY_DRAFT,
};
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Summary
// ============================================================================

#[test]
fn test_summary_crown() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "crown.yaml", CROWN_DRAFT);

    dlo()
        .args(["summary", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout("2 splinted crowns (11, 21)\n");
}

#[test]
fn test_summary_all_hides_shade_for_night_guard() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "guard.yaml", NIGHT_GUARD_DRAFT);

    dlo()
        .args(["summary", "--all", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Upper hard night guard"))
        .stdout(predicate::str::contains("Shade").not());
}

#[test]
fn test_summary_empty_draft() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "empty.yaml", "{}\n");

    dlo()
        .args(["summary", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout("No case selected\n");
}

#[test]
fn test_summary_reports_bad_tooth_code() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(
        &tmp,
        "bad.yaml",
        "case:\n  case_type: crown\n  selected_teeth: ['19']\n",
    );

    dlo()
        .args(["summary", draft.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.yaml"));
}

#[test]
fn test_summary_missing_file() {
    dlo()
        .args(["summary", "does-not-exist.yaml"])
        .assert()
        .failure();
}

// ============================================================================
// Check
// ============================================================================

#[test]
fn test_check_complete_draft() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "crown.yaml", CROWN_DRAFT);

    dlo()
        .args(["check", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ready to submit"));
}

#[test]
fn test_check_incomplete_bridge_fails() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "bridge.yaml", BRIDGE_MISSING_DESIGN_DRAFT);

    dlo()
        .args(["check", draft.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("pontic_design"))
        .stderr(predicate::str::contains("Clinical Selection"));
}

#[test]
fn test_check_accepts_unquoted_tooth_codes() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "inlay.yaml", UNQUOTED_INLAY_DRAFT);

    dlo()
        .args(["check", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ready to submit"));
}

#[test]
fn test_check_inlay_requires_every_surface() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "inlay.yaml", INLAY_MISSING_SURFACE_DRAFT);

    dlo()
        .args(["check", "--quiet", draft.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("surface_involvement"));
}

#[test]
fn test_check_json_report_skips_shade_for_metal() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "metal.yaml", METAL_CROWN_DRAFT);

    let output = dlo()
        .args(["check", "--format", "json", draft.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["submittable"], true);
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 7);
    assert!(steps.iter().all(|s| s["step"] != "shade"));
}

#[test]
fn test_check_warns_on_short_phone() {
    let tmp = TempDir::new().unwrap();
    let content = CROWN_DRAFT.replace("'9876543210'", "'12345'");
    let draft = write_draft(&tmp, "crown.yaml", &content);

    dlo()
        .args(["check", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Phone number should be 10 digits"));
}

// ============================================================================
// Submit
// ============================================================================

#[test]
fn test_submit_emits_order() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "crown.yaml", CROWN_DRAFT);

    dlo()
        .args(["submit", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("id: ORD-"))
        .stdout(predicate::str::contains("summary: 2 splinted crowns (11, 21)"))
        .stdout(predicate::str::contains("priority: rush"));
}

#[test]
fn test_submit_drops_unneeded_shade() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "guard.yaml", NIGHT_GUARD_DRAFT);

    let output = dlo()
        .args(["submit", "--format", "json", draft.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let order: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(order.get("shade").is_none());
    assert_eq!(order["case"]["case_type"], "night_guard");
    assert_eq!(order["lab_id"], "lab-precision");
}

#[test]
fn test_submit_writes_output_file() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "crown.yaml", CROWN_DRAFT);
    let out = tmp.path().join("order.json");

    dlo()
        .args([
            "submit",
            draft.to_str().unwrap(),
            "-o",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Submitted ORD-"));

    let order: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(order["material"], "zirconia-mono");
    assert_eq!(order["shade"], "A2");
}

#[test]
fn test_submit_incomplete_fails() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "bridge.yaml", BRIDGE_MISSING_DESIGN_DRAFT);

    dlo()
        .args(["submit", draft.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("pontic_design"));
}

#[test]
fn test_submit_bridge_without_span_fails() {
    let tmp = TempDir::new().unwrap();
    let draft = write_draft(&tmp, "bridge.yaml", BRIDGE_WITHOUT_SPAN_DRAFT);

    dlo()
        .args(["submit", draft.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Clinical Selection"));
}

#[test]
fn test_submit_requires_review_step() {
    let tmp = TempDir::new().unwrap();
    let content = CROWN_DRAFT.replace("step: review", "step: material");
    let draft = write_draft(&tmp, "crown.yaml", &content);

    dlo()
        .args(["submit", draft.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("review step"));

    dlo()
        .args(["submit", "--from-any-step", draft.to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn test_submit_json_draft() {
    let tmp = TempDir::new().unwrap();
    let json = r#"{
        "lab_id": "lab-smile",
        "step": "review",
        "case": {"case_type": "bleaching_tray", "arch": "both", "reservoirs": true},
        "material": "eva"
    }"#;
    let draft = write_draft(&tmp, "tray.json", json);

    dlo()
        .args(["submit", draft.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("case_type: bleaching_tray"));
}
