//! End-to-end tests for the `wl` binary.
//!
//! Writes a JSON Lines log to a temp directory, runs the binary against it
//! and checks both the human-readable and JSON outputs.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn wl_binary() -> String {
    env!("CARGO_BIN_EXE_wl").to_string()
}

const SIEGE_LOG: &str = r#"{"timestamp":"20:00:00","type":"door_destroyed","keep":"Castle Sauvage","door_name":"Outer Door"}
{"timestamp":"20:01:00","type":"door_destroyed","keep":"Castle Sauvage","door_name":"Inner Door"}
{"timestamp":"20:01:30","type":"guard_kill","killer":"You","guard":"Lord Sauvage","keep":"Castle Sauvage","lord":true}
"#;

const NAMED_LOG: &str = r#"{"timestamp":"21:00:00","type":"damage","source":"Merlin","target":"Sven","amount":250}
{"timestamp":"21:00:05","type":"death","victim":"Sven","killer":"Merlin"}
"#;

fn write_log(temp: &Path, content: &str) -> PathBuf {
    let path = temp.join("combat.jsonl");
    std::fs::write(&path, content).unwrap();
    path
}

/// Runs `wl` with an isolated home so no user config is picked up.
fn run_wl(temp: &Path, args: &[&str]) -> Output {
    Command::new(wl_binary())
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run wl")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "wl should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_sessions_lists_sieges() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), SIEGE_LOG);

    let output = run_wl(
        temp.path(),
        &["sessions", log.to_str().unwrap(), "--domain", "sieges"],
    );
    let stdout = stdout_of(&output);

    assert!(stdout.starts_with("SIEGES (1)\n"), "{stdout}");
    assert!(stdout.contains("Castle Sauvage"));
    assert!(stdout.contains("lord_fight"));
    assert!(stdout.contains("attack_success"));
}

#[test]
fn test_report_json() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), SIEGE_LOG);

    let output = run_wl(temp.path(), &["report", log.to_str().unwrap(), "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();

    assert_eq!(value["events"], 3);
    assert_eq!(value["sieges"]["overall"]["sessions"], 1);
    assert_eq!(value["sieges"]["overall"]["lord_kills"], 1);
    assert_eq!(value["siege_outcomes"]["attack_success"], 1);
    assert_eq!(value["battlegrounds"]["overall"]["sessions"], 0);
}

#[test]
fn test_report_grouped_by_keep_type() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), SIEGE_LOG);

    let output = run_wl(
        temp.path(),
        &["report", log.to_str().unwrap(), "--group-by-keep-type"],
    );
    let stdout = stdout_of(&output);

    assert!(stdout.contains("SIEGES BY KEEP TYPE"));
    assert!(stdout.contains("  border "));
}

#[test]
fn test_malformed_line_fails_with_line_number() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        temp.path(),
        "{\"timestamp\":\"20:00:00\",\"type\":\"zone_entry\",\"zone\":\"Thidranki\"}\nnot json\n",
    );

    let output = run_wl(temp.path(), &["sessions", log.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("line 2"), "{stderr}");
}

#[test]
fn test_missing_file_fails() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("missing.jsonl");

    let output = run_wl(temp.path(), &["report", missing.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to read"), "{stderr}");
}

#[test]
fn test_owner_flag_credits_named_character() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), NAMED_LOG);
    let path = log.to_str().unwrap();

    let anonymous = run_wl(temp.path(), &["report", path, "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&anonymous)).unwrap();
    assert_eq!(value["combat_sessions"]["overall"]["kills"], 0);

    let named = run_wl(temp.path(), &["--owner", "Merlin", "report", path, "--json"]);
    let value: serde_json::Value = serde_json::from_str(&stdout_of(&named)).unwrap();
    assert_eq!(value["combat_sessions"]["overall"]["kills"], 1);
    assert_eq!(value["combat_sessions"]["overall"]["damage_dealt"], 250);
}

#[test]
fn test_config_file_changes_gap() {
    let temp = TempDir::new().unwrap();
    let log = write_log(
        temp.path(),
        r#"{"timestamp":"21:00:00","type":"damage","source":"You","target":"Sven","amount":10}
{"timestamp":"21:00:40","type":"damage","source":"You","target":"Sven","amount":10}
"#,
    );
    let config = temp.path().join("wl.toml");
    std::fs::write(&config, "[gaps]\ncombat_instance_ms = 60000\n").unwrap();

    let default_run = run_wl(
        temp.path(),
        &["sessions", log.to_str().unwrap(), "--domain", "instances"],
    );
    assert!(stdout_of(&default_run).starts_with("COMBAT INSTANCES (2)\n"));

    let configured = run_wl(
        temp.path(),
        &[
            "--config",
            config.to_str().unwrap(),
            "sessions",
            log.to_str().unwrap(),
            "--domain",
            "instances",
        ],
    );
    assert!(stdout_of(&configured).starts_with("COMBAT INSTANCES (1)\n"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    let log = write_log(temp.path(), SIEGE_LOG);
    let config = temp.path().join("wl.toml");
    std::fs::write(&config, "[gaps]\nsiege_ms = 0\n").unwrap();

    let output = run_wl(
        temp.path(),
        &["--config", config.to_str().unwrap(), "report", log.to_str().unwrap()],
    );

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("siege_ms"), "{stderr}");
}
