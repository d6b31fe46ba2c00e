#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn frontdesk(data_dir: &Path) -> Command {
    let mut cmd = Command::new(cargo_bin("frontdesk"));
    cmd.env_remove("FRONTDESK_HOME")
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

#[test]
fn test_landing_shows_seeded_counts() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Front desk"))
        .stdout(predicate::str::contains("Patients"))
        .stdout(predicate::str::contains("Active doctors"));
}

#[test]
fn test_add_then_list_patient() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args([
            "patients",
            "add",
            "--first-name",
            "Ana",
            "--last-name",
            "Lopez",
            "--age",
            "34",
            "--gender",
            "female",
            "--phone",
            "5551234567",
            "--email",
            "ana@example.com",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patient added (#4): Ana Lopez"));

    assert!(temp.path().join("patient_management_data.json").exists());

    frontdesk(temp.path())
        .args(["patients", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("John Smith"))
        .stdout(predicate::str::contains("Ana Lopez"));
}

#[test]
fn test_nine_digit_phone_is_rejected() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args([
            "patients",
            "add",
            "--first-name",
            "Ana",
            "--last-name",
            "Lopez",
            "--age",
            "34",
            "--gender",
            "female",
            "--phone",
            "555123456",
            "--email",
            "ana@example.com",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Please correct the following:"))
        .stderr(predicate::str::contains("10"));

    assert!(!temp.path().join("patient_management_data.json").exists());
}

#[test]
fn test_delete_renumbers_patients() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["patients", "delete", "1", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Patient deleted (#1): John Smith"));

    frontdesk(temp.path())
        .args(["patients", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  1.  Sara Okafor"))
        .stdout(predicate::str::contains("John Smith").not());
}

#[test]
fn test_delete_without_terminal_requires_yes() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["patients", "delete", "1"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn test_missing_patient_exits_with_one() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["patients", "show", "42"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Patient not found: 42"));
}

#[test]
fn test_doctor_deactivate_and_stable_ids() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["doctors", "deactivate", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kwame Osei marked inactive"));

    frontdesk(temp.path())
        .args(["doctors", "delete", "1", "--yes"])
        .assert()
        .success();

    frontdesk(temp.path())
        .args(["doctors", "show", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kwame Osei"))
        .stdout(predicate::str::contains("inactive"));
}

#[test]
fn test_open_routes_to_details_and_forms() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["open", "/patient-details/2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sara Okafor"));

    frontdesk(temp.path())
        .args(["open", "/doctor-registration"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Doctor registration"));

    frontdesk(temp.path())
        .args(["open", "/nowhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Front desk"));
}

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["config", "rows-per-page", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rows-per-page set to 25"));

    let saved = fs::read_to_string(temp.path().join("config.json")).unwrap();
    assert!(saved.contains("25"));

    frontdesk(temp.path())
        .args(["config", "rows-per-page"])
        .assert()
        .success()
        .stdout(predicate::str::contains("25"));
}

#[test]
fn test_seed_on_empty_off_starts_empty() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["config", "seed-on-empty", "false"])
        .assert()
        .success();

    frontdesk(temp.path())
        .args(["patients", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No patients found."));
}

#[test]
fn test_config_rejects_unknown_key_and_bad_value() {
    let temp = TempDir::new().unwrap();

    frontdesk(temp.path())
        .args(["config", "colour"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Unknown config key: colour"));

    frontdesk(temp.path())
        .args(["config", "rows-per-page", "7"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("rows-per-page must be one of"));

    assert!(!temp.path().join("config.json").exists());
}
