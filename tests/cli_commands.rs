use std::path::PathBuf;
use std::process::{Command, Output};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("crates")
        .join("request-tracker")
        .join("tests")
        .join("fixtures")
}

fn request_tracker(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_request-tracker"))
        .args(args)
        .env_remove("REQUESTS_SCHEMA_PATH")
        .env_remove("SNAPSHOT_DIR")
        .env_remove("HOUSEHOLD_FIELD")
        .env("APP_LOG_LEVEL", "warn")
        .output()
        .expect("binary runs")
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).expect("utf8 stdout")
}

#[test]
fn fulfillments_write_csv_rows_newest_first() {
    let snapshots = fixtures().join("snapshots");
    let output = request_tracker(&[
        "fulfillments",
        "--snapshots",
        snapshots.to_str().expect("utf8 path"),
    ]);
    assert!(output.status.success(), "command failed: {output:?}");

    let csv = stdout(&output);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Request Type,Delivered Item,Date Delivered,Household");
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Bed Needs,") && lines[1].contains("2024-03-20"));
    assert!(lines[2].starts_with("Food Requests?,") && lines[2].contains("2024-03-01"));
}

#[test]
fn open_requests_flag_missed_appointments() {
    let snapshots = fixtures().join("snapshots");
    let output = request_tracker(&[
        "open-requests",
        "--snapshots",
        snapshots.to_str().expect("utf8 path"),
    ]);
    assert!(output.status.success(), "command failed: {output:?}");

    let csv = stdout(&output);
    let diapers = csv
        .lines()
        .find(|line| line.contains("Baby Diapers"))
        .expect("diapers row");
    assert!(diapers.contains(",Yes,"));
}

#[test]
fn schema_check_reports_shape() {
    let schema = fixtures().join("requests-schema.yaml");
    let output = request_tracker(&[
        "schema",
        "check",
        "--schema",
        schema.to_str().expect("utf8 path"),
    ]);
    assert!(output.status.success(), "command failed: {output:?}");

    let text = stdout(&output);
    assert!(text.contains("2 categories | 5 item rules | 2 nesting levels | 1 historical items"));
    assert!(text.contains("1 field aliases | 1 tag aliases"));
}

#[test]
fn missing_snapshot_directory_is_an_application_error() {
    let output = request_tracker(&["fulfillments"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("application error:"));
}
