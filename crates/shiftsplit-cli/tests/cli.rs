//! Black-box tests that exercise the compiled `shiftsplit` binary.

use std::path::PathBuf;
use std::process::Command;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn shiftsplit() -> Command {
    Command::new(env!("CARGO_BIN_EXE_shiftsplit"))
}

#[test]
fn solve_prints_shifts_and_efficiency() {
    let output = shiftsplit()
        .args(["solve", fixture("bike_shop_week.json").to_str().unwrap(), "--min", "4", "--max", "8"])
        .output()
        .expect("shiftsplit solve runs");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("efficiency:"));
    assert!(stdout.contains("day "));
}

#[test]
fn solve_json_format_is_valid_json() {
    let output = shiftsplit()
        .args([
            "solve",
            fixture("bike_shop_week.json").to_str().unwrap(),
            "--min",
            "4",
            "--max",
            "8",
            "--format",
            "json",
        ])
        .output()
        .expect("shiftsplit solve runs");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid json output");
    assert!(parsed["shifts"].is_array());
    assert!(parsed["efficiency"].is_number());
}

#[test]
fn validate_reports_pass() {
    let output = shiftsplit()
        .args(["validate", fixture("bike_shop_week.json").to_str().unwrap(), "--min", "4", "--max", "8"])
        .output()
        .expect("shiftsplit validate runs");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("valid: true"));
}

#[test]
fn missing_file_is_reported_as_an_error() {
    let output = shiftsplit()
        .args(["solve", "tests/fixtures/does_not_exist.json", "--min", "4", "--max", "8"])
        .output()
        .expect("shiftsplit solve runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("reading week demand file"));
}

#[test]
fn unequal_day_lengths_are_rejected() {
    let dir = std::env::temp_dir();
    let path = dir.join("shiftsplit_bad_week.json");
    std::fs::write(&path, r#"{"week_demand": [[1, 2], [1]]}"#).unwrap();

    let output = shiftsplit()
        .args(["solve", path.to_str().unwrap(), "--min", "1", "--max", "2"])
        .output()
        .expect("shiftsplit solve runs");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("validating week demand"));

    let _ = std::fs::remove_file(&path);
}
