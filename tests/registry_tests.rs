// Tests for registry management: patients, imports, notes and consultations

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use std::fs;

fn setup_test_env() -> (TempDir, std::sync::MutexGuard<'static, ()>) {
    let guard = test_env::lock_test_env();
    let temp_dir = TempDir::new().unwrap();
    (temp_dir, guard)
}

fn new_cmd(temp_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("dpanel").unwrap();
    cmd.env("HOME", temp_dir.path());
    cmd
}

#[test]
fn test_add_and_search() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["patients", "add", "11111111111", "Deniz", "Koc", "--stage", "F0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered patient 11111111111 (Deniz Koc)"));

    new_cmd(&temp_dir)
        .args(["search", "11111111111"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stage: F0"));
}

#[test]
fn test_add_duplicate_rejected() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir).args(["patients", "add", "1", "A"]).assert().success();
    new_cmd(&temp_dir)
        .args(["patients", "add", "1", "B"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already registered"));
}

#[test]
fn test_add_invalid_stage() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["patients", "add", "1", "A", "--stage", "F7"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid stage: 'F7'"));
}

#[test]
fn test_set_stage_and_remove() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir).args(["patients", "add", "1", "A", "--stage", "F1"]).assert().success();
    new_cmd(&temp_dir)
        .args(["patients", "set-stage", "1", "F3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patient 1 is now in stage F3"));

    new_cmd(&temp_dir)
        .args(["distribution"])
        .assert()
        .success()
        .stdout(predicate::str::contains("F3: 1 patient (100.0%)"));

    new_cmd(&temp_dir).args(["patients", "remove", "1"]).assert().success();
    new_cmd(&temp_dir)
        .args(["patients", "remove", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Patient '1' not found"));
}

#[test]
fn test_import_keeps_unknown_stages_out_of_distribution() {
    let (temp_dir, _guard) = setup_test_env();
    let file = temp_dir.path().join("patients.json");
    fs::write(
        &file,
        r#"[
            {"id": "1", "name": "A", "stage": "F2"},
            {"id": "2", "name": "B", "stage": "f2"},
            {"id": "3", "name": "C", "stage": "F9"},
            {"id": "4", "name": "D"},
            {"id": "5", "name": "E", "stage": "F0"}
        ]"#,
    )
    .unwrap();

    new_cmd(&temp_dir)
        .args(["patients", "import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 5 patients (5 new, 0 updated)"));

    new_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 registered patients"))
        .stdout(predicate::str::contains("F0: 1 patient (50.0%)"))
        .stdout(predicate::str::contains("F2: 1 patient (50.0%)"));
}

#[test]
fn test_import_rejects_duplicate_ids() {
    let (temp_dir, _guard) = setup_test_env();
    let file = temp_dir.path().join("patients.json");
    fs::write(
        &file,
        r#"[
            {"id": "1", "name": "A", "stage": "F1"},
            {"id": "2", "name": "B", "stage": "F2"},
            {"id": "1", "name": "A again", "stage": "F3"}
        ]"#,
    )
    .unwrap();

    new_cmd(&temp_dir)
        .args(["patients", "import", file.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Duplicate patient ID '1' in import file"));

    new_cmd(&temp_dir)
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No patients registered."));
}

#[test]
fn test_import_reports_updates() {
    let (temp_dir, _guard) = setup_test_env();
    new_cmd(&temp_dir).args(["patients", "add", "1", "A"]).assert().success();
    let file = temp_dir.path().join("patients.json");
    fs::write(
        &file,
        r#"[{"id": "1", "name": "A", "stage": "F1"}, {"id": "2", "name": "B"}]"#,
    )
    .unwrap();

    new_cmd(&temp_dir)
        .args(["patients", "import", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 patients (1 new, 1 updated)"));
}

#[test]
fn test_import_malformed_file() {
    let (temp_dir, _guard) = setup_test_env();
    let file = temp_dir.path().join("bad.json");
    fs::write(&file, "{not json").unwrap();

    new_cmd(&temp_dir)
        .args(["patients", "import", file.to_str().unwrap()])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid import file"));
}

#[test]
fn test_import_missing_file_is_internal_error() {
    let (temp_dir, _guard) = setup_test_env();
    let file = temp_dir.path().join("missing.json");

    new_cmd(&temp_dir)
        .args(["patients", "import", file.to_str().unwrap()])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read import file"));
}

#[test]
fn test_notes_card() {
    let (temp_dir, _guard) = setup_test_env();

    new_cmd(&temp_dir)
        .args(["notes", "add", "Team", "meeting:", "15:00"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added note 1"));

    new_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("=== Notes ==="))
        .stdout(predicate::str::contains("- Team meeting: 15:00"));

    new_cmd(&temp_dir).args(["notes", "remove", "1"]).assert().success();
    new_cmd(&temp_dir)
        .args(["notes", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No notes."));

    new_cmd(&temp_dir)
        .args(["notes", "remove", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid note ID"));

    new_cmd(&temp_dir)
        .args(["notes", "remove", "5"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Note 5 not found"));
}

#[test]
fn test_consultation_card() {
    let (temp_dir, _guard) = setup_test_env();
    new_cmd(&temp_dir).args(["patients", "seed"]).assert().success();

    new_cmd(&temp_dir)
        .args(["consult", "request", "12345678901"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Requested consultation 1"));
    new_cmd(&temp_dir).args(["consult", "request", "23456789012"]).assert().success();

    new_cmd(&temp_dir)
        .args(["consult", "complete", "1", "--at", "14:30"])
        .assert()
        .success();

    new_cmd(&temp_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("- Pending consultations: 1"))
        .stdout(predicate::str::contains("- Last consultation: 14:30"));

    new_cmd(&temp_dir)
        .args(["consult", "complete", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Consultation 1 is already completed"));

    new_cmd(&temp_dir)
        .args(["consult", "complete", "9"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error: Consultation 9 not found"));

    new_cmd(&temp_dir)
        .args(["consult", "request", "00000000000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_custom_data_location() {
    let (temp_dir, _guard) = setup_test_env();
    let config_dir = temp_dir.path().join(".dpanel");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("rc"), "data.location=records/registry.db\n").unwrap();

    new_cmd(&temp_dir).args(["patients", "add", "1", "A"]).assert().success();

    assert!(config_dir.join("records").join("registry.db").exists());
    assert!(!config_dir.join("panel.db").exists());
}

#[test]
fn test_invalid_config_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();
    let config_dir = temp_dir.path().join(".dpanel");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("rc"), "color=rainbow\n").unwrap();

    new_cmd(&temp_dir)
        .args(["list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid value 'rainbow' for 'color'"));
}

#[test]
fn test_oversized_chart_width_is_user_error() {
    let (temp_dir, _guard) = setup_test_env();
    let config_dir = temp_dir.path().join(".dpanel");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("rc"), "chart.width=18446744073709551615\n").unwrap();

    new_cmd(&temp_dir)
        .args(["distribution"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("for 'chart.width'"));
}
