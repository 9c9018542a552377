//! Run the built binary end to end in a temporary directory.

use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::path::Path;
use std::process::{Command, Output};

fn guardfs(dir: &Path, args: &[&str]) -> Output {
    let me = assert_cmd::cargo::cargo_bin!("guardfs");
    Command::new(me)
        .arg("--dir")
        .arg(dir)
        .args(args)
        // keep a developer's own config out of the run
        .env("GUARDFS_CONFIG", dir.join("no-such-config.xml"))
        .output()
        .expect("spawn binary")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

#[test]
fn binary_print_config_succeeds() {
    let me = assert_cmd::cargo::cargo_bin!("guardfs");
    let out = Command::new(me)
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
}

#[test]
fn create_then_refuse_then_read() {
    let temp = TempDir::new().unwrap();

    let out = guardfs(temp.path(), &["create", "test.txt", "--content", "hello"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("File created"));
    temp.child("test.txt").assert("hello\n");

    let out = guardfs(temp.path(), &["create", "test.txt", "--content", "other"]);
    assert!(out.status.success(), "a refusal is not a failure");
    assert!(stdout(&out).contains("Cannot write! File already exists"));
    temp.child("test.txt").assert("hello\n");

    let out = guardfs(temp.path(), &["read", "test.txt"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.starts_with("hello\n"), "stdout was: {text}");
    assert!(text.contains("Finished reading"));
}

#[test]
fn missing_source_is_reported_and_exit_zero() {
    let temp = TempDir::new().unwrap();
    let out = guardfs(temp.path(), &["copy", "absent.txt", "dst.txt"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Cannot copy! File does not exist"));
    temp.child("dst.txt").assert(predicate::path::missing());
}

#[test]
fn host_failure_exits_non_zero() {
    let temp = TempDir::new().unwrap();
    let out = guardfs(temp.path(), &["create", "missing_dir/file.txt"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Cannot write!"));
}

#[test]
fn dry_run_flag_does_not_touch_disk() {
    let temp = TempDir::new().unwrap();
    let out = guardfs(temp.path(), &["--dry-run", "mkdir", "sub"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("Dry-run: would create directory"));
    temp.child("sub").assert(predicate::path::missing());
}

#[test]
fn demo_with_cleanup_runs_clean() {
    let temp = TempDir::new().unwrap();
    let out = guardfs(temp.path(), &["demo", "--cleanup"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("This is a test file."));
    assert!(text.contains("File moved"));
    temp.child("test.txt").assert(predicate::path::missing());
}

#[test]
fn faults_subcommand_reports_all_three() {
    let temp = TempDir::new().unwrap();
    let out = guardfs(temp.path(), &["faults"]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("Index out of range"));
    assert!(text.contains("Overflow"));
    assert!(text.contains("That won't work"));
}

#[test]
fn json_logs_are_valid_json_on_stderr() {
    let temp = TempDir::new().unwrap();
    let out = guardfs(temp.path(), &["--json", "mkdir", "logs"]);
    assert!(out.status.success());

    let stderr = String::from_utf8_lossy(&out.stderr);
    let events: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).expect("each log line is JSON"))
        .collect();
    assert!(
        events
            .iter()
            .any(|e| e["fields"]["message"] == "Operation completed" && e["fields"]["op"] == "mkdir"),
        "events: {events:?}"
    );
}

#[test]
fn broken_config_is_logged_with_its_code() {
    let temp = TempDir::new().unwrap();
    let cfg = temp.child("config.xml");
    cfg.write_str("<config><colour>red</colour></config>").unwrap();

    let me = assert_cmd::cargo::cargo_bin!("guardfs");
    let out = Command::new(me)
        .arg("--dir")
        .arg(temp.path())
        .args(["--json", "mkdir", "logs"])
        .env("GUARDFS_CONFIG", cfg.path())
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    temp.child("logs").assert(predicate::path::missing());

    let stderr = String::from_utf8_lossy(&out.stderr);
    let event = stderr
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str::<serde_json::Value>(l).expect("JSON log line"))
        .find(|e| e["fields"]["kind"] == "config_invalid")
        .unwrap_or_else(|| panic!("no config_invalid event in: {stderr}"));
    assert_eq!(event["fields"]["code"], 11);
}

#[test]
fn empty_config_env_prints_default_location() {
    let temp = TempDir::new().unwrap();
    let me = assert_cmd::cargo::cargo_bin!("guardfs");
    let out = Command::new(me)
        .arg("--print-config")
        .env("GUARDFS_CONFIG", "")
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path().join("xdg"))
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(!text.contains("(explicit)"), "stdout: {text}");
    assert!(text.contains("Default guardfs config path"), "stdout: {text}");
}
