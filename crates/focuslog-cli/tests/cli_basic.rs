//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with an isolated config directory.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

fn cli(config_dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_focuslog"));
    cmd.env("FOCUSLOG_CONFIG_DIR", config_dir.path())
        .env_remove("FOCUSLOG_LOG");
    cmd
}

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(config_dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = cli(config_dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn parse_json(json: &str) -> serde_json::Value {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}

#[test]
fn test_types_json() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["types", "--json"]);
    assert_eq!(code, 0, "types failed");

    let types = parse_json(&stdout);
    let ids: Vec<&str> = types
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["quick_check", "got_distracted", "major_break"]);
    assert!(types[2]["max_duration_secs"].is_null());
}

#[test]
fn test_report_short_session() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        &dir,
        &["report", "--duration", "3", "--distraction", "quick@1", "--json"],
    );
    assert_eq!(code, 0, "report failed");

    let report = parse_json(&stdout);
    assert_eq!(report["duration_minutes"], 3);
    assert_eq!(report["heatmap"], serde_json::json!([1]));
    let suggestions = report["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 1);
    assert_eq!(suggestions[0]["title"], "Extend Your Focus Sessions");
    assert_eq!(suggestions[0]["priority"], "MEDIUM");
}

#[test]
fn test_report_text() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(
        &dir,
        &[
            "report",
            "--duration",
            "30",
            "--distraction",
            "d@2",
            "--distraction",
            "d@3",
            "--distraction",
            "d@23",
        ],
    );
    assert_eq!(code, 0, "report failed");
    assert!(stdout.contains("Focus score: 70/100"));
    assert!(stdout.contains("[HIGH] Try the Pomodoro Technique"));
    assert!(stdout.contains("Peak: 0-5 minutes"));
}

#[test]
fn test_report_uses_configured_interval() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(&dir, &["config", "set", "analytics.heatmap_interval_minutes", "10"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(&dir, &["report", "--duration", "30", "--json"]);
    assert_eq!(code, 0, "report failed");
    let report = parse_json(&stdout);
    assert_eq!(report["interval_minutes"], 10);
    assert_eq!(report["heatmap"], serde_json::json!([0, 0, 0]));
}

#[test]
fn test_report_rejects_bad_distraction() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["report", "--duration", "30", "--distraction", "nap@4"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
    assert!(stderr.contains("nap"));
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "ticker.tick_interval_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1000");

    let (_, _, code) = run_cli(&dir, &["config", "set", "ticker.tick_interval_ms", "250"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "ticker.tick_interval_ms"]);
    assert_eq!(stdout.trim(), "250");

    let (_, stderr, code) = run_cli(&dir, &["config", "set", "scoring.weight", "9"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));
}

#[test]
fn test_interactive_session_from_stdin() {
    let dir = TempDir::new().unwrap();
    let mut child = cli(&dir)
        .args(["session", "--json"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn session");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"q\nd\nstatus\nm\ne\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success(), "session failed");

    let report = parse_json(&String::from_utf8_lossy(&output.stdout));
    assert_eq!(report["distraction_count"], 3);
    assert_eq!(report["breakdown"]["major_break"], 1);
    assert_eq!(report["duration_minutes"], 0);
    assert_eq!(report["focus_score"], 100);
}
