//! Integration tests for the `slots` CLI binary.
//!
//! These use `assert_cmd` and `predicates` to exercise the propose, detect and
//! config subcommands through the actual binary, including stdin piping, file
//! I/O and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

const MONDAY_8AM: &str = "2026-03-16T08:00:00Z";

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn slots_cmd() -> Command {
    Command::cargo_bin("slots").unwrap()
}

/// Run `slots propose` with the given extra args and parse stdout as JSON.
fn propose_json(args: &[&str], stdin: Option<&str>) -> serde_json::Value {
    let mut cmd = slots_cmd();
    cmd.arg("propose").args(args);
    if let Some(input) = stdin {
        cmd.write_stdin(input.to_string());
    }
    let output = cmd.output().expect("slots should run");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn starts(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start"].as_str().unwrap().to_string())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Propose subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn propose_all_respects_calendar_fixture() {
    let value = propose_json(
        &["-i", &fixture("week.json"), "--now", MONDAY_8AM, "--all"],
        None,
    );
    let starts = starts(&value);

    // Standup blocks 09:00; planning blocks 13:00-15:00.
    assert_eq!(starts[0], "2026-03-16T09:30:00Z");
    assert!(!starts.contains(&"2026-03-16T13:00:00Z".to_string()));
    assert!(!starts.contains(&"2026-03-16T14:30:00Z".to_string()));
    assert!(starts.contains(&"2026-03-16T15:00:00Z".to_string()));
    // Focus time is transparent, so Tuesday is open.
    assert!(starts.contains(&"2026-03-17T09:00:00Z".to_string()));
    // The all-day offsite blocks Wednesday.
    assert!(starts.iter().all(|s| !s.starts_with("2026-03-18")));
}

#[test]
fn propose_defaults_to_three_slots() {
    let value = propose_json(&["-i", &fixture("week.json"), "--now", MONDAY_8AM], None);
    let slots = value.as_array().unwrap();

    assert_eq!(slots.len(), 3);
    assert_eq!(slots[0]["start"], "2026-03-16T09:30:00Z");
    assert_eq!(slots[0]["duration_minutes"], 30);
    assert_ne!(slots[1]["hour_of_day"], slots[0]["hour_of_day"]);
    assert_ne!(slots[1]["hour_of_day"], slots[2]["hour_of_day"]);
}

#[test]
fn propose_reads_events_from_stdin() {
    let value = propose_json(&["--now", MONDAY_8AM, "--count", "1"], Some("[]"));
    assert_eq!(starts(&value), vec!["2026-03-16T09:00:00Z"]);
}

#[test]
fn propose_earliest_strategy() {
    let value = propose_json(
        &["--now", MONDAY_8AM, "-n", "2", "--strategy", "earliest"],
        Some("[]"),
    );
    assert_eq!(
        starts(&value),
        vec!["2026-03-16T09:00:00Z", "2026-03-16T09:30:00Z"]
    );
}

#[test]
fn propose_uses_config_file() {
    let value = propose_json(
        &[
            "--config",
            &fixture("scheduler.toml"),
            "--now",
            "2026-03-16T09:00:00Z",
        ],
        Some("[]"),
    );
    let slots = value.as_array().unwrap();

    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0]["start"], "2026-03-16T10:00:00Z");
    assert_eq!(slots[1]["end"], "2026-03-16T12:00:00Z");
    assert_eq!(slots[1]["duration_minutes"], 60);
}

#[test]
fn propose_fully_blocked_prints_empty_array() {
    let value = propose_json(
        &[
            "-i",
            &fixture("blocked.json"),
            "--config",
            &fixture("scheduler.toml"),
            "--now",
            "2026-03-16T09:00:00Z",
        ],
        None,
    );
    assert_eq!(value, serde_json::json!([]));
}

#[test]
fn propose_writes_output_file() {
    let output_path = std::env::temp_dir().join("slots-test-propose-output.json");
    let _ = std::fs::remove_file(&output_path);

    slots_cmd()
        .args(["propose", "--now", MONDAY_8AM, "-o"])
        .arg(&output_path)
        .write_stdin("[]")
        .assert()
        .success();

    let content = std::fs::read_to_string(&output_path).expect("output file must exist");
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 3);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn propose_with_links_adds_confirm_link() {
    let value = propose_json(
        &[
            "--now",
            MONDAY_8AM,
            "--link-base",
            "https://example.com/confirm.html",
            "--email-id",
            "msg-42",
            "--sender",
            "ada@example.com",
        ],
        Some("[]"),
    );

    for slot in value.as_array().unwrap() {
        let link = slot["confirm_link"].as_str().unwrap();
        assert!(link.starts_with("https://example.com/confirm.html?token="));
        assert!(slot["start"].is_string());
    }
}

#[test]
fn propose_reply_prints_draft_text() {
    slots_cmd()
        .args([
            "propose",
            "--now",
            MONDAY_8AM,
            "--link-base",
            "https://example.com/confirm.html",
            "--email-id",
            "msg-42",
            "--sender",
            "ada@example.com",
            "--reply",
        ])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Happy to find a time to connect."))
        .stdout(predicate::str::contains("1. Mon, Mar 16, 9:00 AM UTC - Click here to confirm: "))
        .stdout(predicate::str::contains("3. "));
}

#[test]
fn link_base_requires_email_and_sender() {
    slots_cmd()
        .args(["propose", "--link-base", "https://example.com/c"])
        .write_stdin("[]")
        .assert()
        .failure();
}

#[test]
fn propose_invalid_json_fails() {
    slots_cmd()
        .args(["propose", "--now", MONDAY_8AM])
        .write_stdin("this is not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse calendar events JSON"));
}

#[test]
fn propose_invalid_now_fails() {
    slots_cmd()
        .args(["propose", "--now", "tomorrow"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFC 3339"));
}

#[test]
fn propose_missing_input_file_fails() {
    slots_cmd()
        .args(["propose", "-i", "/nonexistent/events.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Detect and config subcommands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn detect_meeting_request() {
    slots_cmd()
        .args(["detect", "--subject", "Quick sync"])
        .write_stdin("Do you have time this week?")
        .assert()
        .success()
        .stdout("meeting request: yes\n");
}

#[test]
fn detect_non_request() {
    slots_cmd()
        .args(["detect", "--subject", "Meeting notes"])
        .write_stdin("Notes attached.")
        .assert()
        .success()
        .stdout("meeting request: no\n");
}

#[test]
fn config_prints_effective_values() {
    slots_cmd()
        .args(["config", "--config", &fixture("scheduler.toml")])
        .assert()
        .success()
        .stdout(predicate::str::contains("slots_to_offer = 2"))
        .stdout(predicate::str::contains("start_hour = 10"))
        .stdout(predicate::str::contains("max_iterations = 2000"));
}

#[test]
fn config_defaults_without_file() {
    slots_cmd()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("end_hour = 17"))
        .stdout(predicate::str::contains("timezone = \"UTC\""));
}
