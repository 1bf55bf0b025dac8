//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Each test
//! points `TAPPYSWIPEY_CONFIG` at its own temp file so the user's real
//! config is never touched.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "tappyswipey-cli", "--"])
        .args(args)
        .env("TAPPYSWIPEY_CONFIG", config)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("Failed to parse JSON line"))
        .collect()
}

#[test]
fn test_catalog_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&dir.path().join("config.toml"), &["catalog", "--json"]);
    assert_eq!(code, 0, "catalog failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let actions = parsed.as_array().unwrap();
    assert_eq!(actions.len(), 32);
    assert_eq!(actions[0]["title"], "Single Tap");
    assert_eq!(actions[0]["point_value"], 1000);
    assert_eq!(actions[16]["title"], "Swipe Up");
}

#[test]
fn test_catalog_swipes_text() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&dir.path().join("config.toml"), &["catalog", "--swipes"]);
    assert_eq!(code, 0, "catalog --swipes failed");
    assert_eq!(stdout.lines().count(), 16);
    assert!(stdout.contains("Four-Finger Swipe Right"));
    assert!(!stdout.contains("Tap"));
}

#[test]
fn test_conflicts_json() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(&dir.path().join("config.toml"), &["conflicts", "--json"]);
    assert_eq!(code, 0, "conflicts failed");

    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let pairs = parsed.as_array().unwrap();
    assert_eq!(pairs.len(), 24);
    assert_eq!(pairs[0]["action"], "Single Tap");
    assert_eq!(pairs[0]["must_fail"], "Double Tap");
}

#[test]
fn test_simulate_timed_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("game.txt");
    std::fs::write(&script, "start\ntap 1 1\ntap 1 1\ntap 1 1\n").unwrap();

    let (code, stdout, stderr) = run_cli(
        &dir.path().join("config.toml"),
        &["simulate", "--mode", "timed", "--script", script.to_str().unwrap()],
    );
    assert_eq!(code, 0, "simulate failed: {stderr}");

    let events = json_lines(&stdout);
    let snapshot = events.last().unwrap();
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["score"], 1833);
    assert_eq!(snapshot["state"], "running");
    assert_eq!(snapshot["combo_len"], 3);
}

#[test]
fn test_simulate_rejects_unknown_gesture() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("bad.txt");
    std::fs::write(&script, "start\ntap 9 9\n").unwrap();

    let (code, _, stderr) = run_cli(
        &dir.path().join("config.toml"),
        &["simulate", "--script", script.to_str().unwrap()],
    );
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let (code, _, _) = run_cli(&config, &["config", "set", "timing.timed_duration_ms", "30000"]);
    assert_eq!(code, 0, "config set failed");

    let (code, stdout, _) = run_cli(&config, &["config", "get", "timing.timed_duration_ms"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "30000");

    let (code, _, _) = run_cli(&config, &["config", "set", "timing.bogus", "1"]);
    assert_ne!(code, 0);
}

#[test]
fn test_simulate_uses_configured_duration() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    let (code, _, _) = run_cli(&config, &["config", "set", "timing.timed_duration_ms", "500"]);
    assert_eq!(code, 0, "config set failed");

    let script = dir.path().join("short.txt");
    std::fs::write(&script, "start\nadvance 1000\ntap 1 1\n").unwrap();
    let (code, stdout, _) = run_cli(
        &config,
        &["simulate", "--mode", "timed", "--script", script.to_str().unwrap()],
    );
    assert_eq!(code, 0, "simulate failed");

    let events = json_lines(&stdout);
    assert!(events
        .iter()
        .any(|e| e["type"] == "SessionEnded" && e["reason"] == "time_expired"));
    let snapshot = events.last().unwrap();
    assert_eq!(snapshot["state"], "ended");
    assert_eq!(snapshot["score"], 0);
}
