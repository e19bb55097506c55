//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs.

use std::io::Write;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "shakewatch-cli", "--"])
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_synth_emits_jsonl() {
    let (stdout, _, code) = run_cli(&["trace", "synth", "--shakes", "2", "--duration-secs", "5"]);
    assert_eq!(code, 0, "Synth failed");

    let lines: Vec<&str> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();
    assert!(!lines.is_empty(), "Synth produced no samples");
    for line in &lines {
        let parsed: serde_json::Value = serde_json::from_str(line).expect("bad JSONL line");
        assert!(parsed["timestamp_ms"].is_u64());
    }
}

#[test]
fn test_synth_then_replay_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    let trace_path = dir.path().join("trace.jsonl");
    let trace_arg = trace_path.to_str().unwrap();

    let (_, _, code) = run_cli(&[
        "trace", "synth", "--shakes", "3", "--duration-secs", "10", "--output", trace_arg,
    ]);
    assert_eq!(code, 0, "Synth to file failed");

    let (stdout, _, code) = run_cli(&["trace", "replay", "--input", trace_arg, "--json"]);
    assert_eq!(code, 0, "Replay failed");

    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("bad summary JSON");
    assert_eq!(summary["shakes"], 3);
    assert!(summary["samples"].as_u64().unwrap() > 0);
}

#[test]
fn test_replay_missing_file_fails() {
    let (_, stderr, code) = run_cli(&["trace", "replay", "--input", "/nonexistent/trace.jsonl"]);
    assert_ne!(code, 0, "Replay of a missing trace should fail");
    assert!(stderr.contains("error:"));
}

#[test]
fn test_replay_rejects_malformed_lines() {
    let dir = tempfile::tempdir().expect("tempdir");
    let trace_path = dir.path().join("bad.jsonl");
    let mut file = std::fs::File::create(&trace_path).expect("create trace");
    writeln!(file, "{{\"timestamp_ms\": 0, \"x\": 0.0, \"y\": 0.0, \"z\": 1.0}}").unwrap();
    writeln!(file, "not json").unwrap();
    drop(file);

    let (_, stderr, code) = run_cli(&["trace", "replay", "--input", trace_path.to_str().unwrap()]);
    assert_ne!(code, 0, "Malformed trace should fail");
    assert!(stderr.contains("line 2"));
}

#[test]
fn test_replay_counts_cooldown_limited_shakes() {
    let dir = tempfile::tempdir().expect("tempdir");
    let trace_path = dir.path().join("burst.jsonl");
    let mut file = std::fs::File::create(&trace_path).expect("create trace");
    // A burst of three spikes inside one second, then one past the cooldown.
    for timestamp_ms in [0u64, 200, 400, 1_500] {
        writeln!(
            file,
            "{{\"timestamp_ms\": {timestamp_ms}, \"x\": 3.0, \"y\": 0.0, \"z\": 0.0}}"
        )
        .unwrap();
    }
    drop(file);

    let (stdout, _, code) = run_cli(&[
        "trace", "replay", "--input", trace_path.to_str().unwrap(), "--json",
    ]);
    assert_eq!(code, 0, "Replay failed");
    let summary: serde_json::Value = serde_json::from_str(&stdout).expect("bad summary JSON");
    assert_eq!(summary["samples"], 4);
    assert_eq!(summary["shakes"], 2);
}
