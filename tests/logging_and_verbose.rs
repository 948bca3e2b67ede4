//! Tests for logging
//! Verifies log file content, JSON output and that passwords never reach the logs

use assert_cmd::Command;
use pgpass_lookup::logging::{LogLevel, Logger};
use pgpass_lookup::types::{ConnectionParams, LogFormat};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::write_passfile;

/// Helper to get the binary command
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
fn get_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pgpass-lookup").unwrap();
    cmd.env_clear();
    cmd
}

#[test]
fn test_text_log_file_content() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("lookup.log");

    {
        let logger = Logger::new(
            Some(log_file.to_str().unwrap().to_string()),
            true,
            LogFormat::Text,
        );
        logger.log(LogLevel::Info, "hello");
        logger.log_entries_parsed(3);
    }

    let content = fs::read_to_string(&log_file).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("[INFO] hello"));
    assert!(lines[1].contains("Parsed 3 password file entries"));
}

#[test]
fn test_json_log_lines_are_valid_json() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("lookup.json");
    let params = ConnectionParams::new("db.example.com", 6432, "app", "admin");

    {
        let logger = Logger::new(
            Some(log_file.to_str().unwrap().to_string()),
            true,
            LogFormat::Json,
        );
        logger.log_match_found(&params, 7);
    }

    let content = fs::read_to_string(&log_file).unwrap();
    let event: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
    assert_eq!(event["level"], "SUCCESS");
    assert_eq!(event["host"], "db.example.com");
    assert_eq!(event["port"], 6432);
    assert_eq!(event["line_number"], 7);
    assert_eq!(event["status"], "matched");
    assert!(event.get("error").is_none());
}

#[test]
fn test_disabled_logger_creates_nothing() {
    let logger = Logger::disabled();
    logger.log(LogLevel::Error, "dropped");
}

#[test]
fn test_cli_log_file_never_contains_password() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("cli.log");
    let passfile = write_passfile("bouncer:6000:*:rubber:sup3rsecret\n");

    let mut cmd = get_cmd();
    cmd.env("PGPASSFILE", passfile.path())
        .args(["-H", "bouncer", "-p", "6000", "-U", "rubber"])
        .arg("--log-file")
        .arg(&log_file)
        .arg("--log-format")
        .arg("json")
        .assert()
        .success()
        .stdout("sup3rsecret\n");

    let content = fs::read_to_string(&log_file).unwrap();
    assert!(!content.is_empty());
    assert!(!content.contains("sup3rsecret"));
    for line in content.lines() {
        let _: serde_json::Value = serde_json::from_str(line).unwrap();
    }
}

#[test]
fn test_verbose_logs_to_stderr_only() {
    let passfile = write_passfile("bouncer:6000:*:rubber:buggy\n");

    let mut cmd = get_cmd();
    cmd.env("PGPASSFILE", passfile.path())
        .args(["-H", "bouncer", "-p", "6000", "-U", "rubber", "--verbose"])
        .assert()
        .success()
        .stdout("buggy\n")
        .stderr(predicate::str::contains("Looking up password for host=bouncer"))
        .stderr(predicate::str::contains("Matched"))
        .stderr(predicate::str::contains("buggy").not());
}

#[test]
fn test_quiet_by_default() {
    let passfile = write_passfile("bouncer:6000:*:rubber:buggy\n");

    let mut cmd = get_cmd();
    cmd.env("PGPASSFILE", passfile.path())
        .args(["-H", "bouncer", "-p", "6000", "-U", "rubber"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_failed_lookup_is_logged() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("failed.log");
    let passfile = write_passfile("bouncer:6000:*:rubber:buggy\n");

    let mut cmd = get_cmd();
    cmd.env("PGPASSFILE", passfile.path())
        .args(["-H", "fail", "-U", "bar"])
        .arg("--log-file")
        .arg(&log_file)
        .assert()
        .failure();

    let content = fs::read_to_string(&log_file).unwrap();
    assert!(content.contains("[ERROR] Lookup failed for host=fail"));
    assert!(content.contains("No match for connection entry"));
}
