use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn logcleaner(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("logcleaner").unwrap();
    cmd.env("LOGCLEANER_CONFIG_DIR", config_dir)
        .env_remove("LOGCLEANER_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

fn backups_in(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.ends_with(".bak"))
        .collect()
}

#[test]
fn test_keeps_last_rows() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(&log, "a\nb\nc\nd\ne\n").unwrap();

    logcleaner(temp_dir.path())
        .arg(&log)
        .arg("2")
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains("purged").and(predicate::str::contains("Entries: 2.")));

    assert_eq!(fs::read_to_string(&log).unwrap(), "d\ne\n");

    let backups = backups_in(temp_dir.path());
    assert_eq!(backups.len(), 1);
    assert!(backups[0].starts_with("app.log."));
    assert_eq!(
        fs::read_to_string(temp_dir.path().join(&backups[0])).unwrap(),
        "a\nb\nc\nd\ne\n"
    );
}

#[test]
fn test_groups_and_filters_by_date() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(
        &log,
        "2024-01-01 10:00:00 old\n\
         2024-01-02 10:00:00 start\n\
         trace line\n\
         2024-01-03 10:00:00 healthcheck ok\n\
         2024-01-04 10:00:00 done\n",
    )
    .unwrap();

    logcleaner(temp_dir.path())
        .arg(&log)
        .arg("10")
        .args(["-f", "2006-01-02 15:04:05"])
        .args(["-s", "2024-01-02 00:00:00"])
        .args(["-e", "healthcheck"])
        .arg("--no-color")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "2024-01-02 10:00:00 start trace line\n2024-01-04 10:00:00 done\n"
    );
}

#[test]
fn test_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(&log, "one\ntwo\nthree\n").unwrap();

    let output = logcleaner(temp_dir.path())
        .arg(&log)
        .arg("1")
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["lines_read"], 3);
    assert_eq!(report["trimmed"], 2);
    assert_eq!(report["entries_written"], 1);
    assert_eq!(fs::read_to_string(&log).unwrap(), "three\n");
}

#[test]
fn test_zero_rows_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(&log, "a\n").unwrap();

    logcleaner(temp_dir.path())
        .arg(&log)
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a positive number"));

    assert_eq!(fs::read_to_string(&log).unwrap(), "a\n");
    assert!(backups_in(temp_dir.path()).is_empty());
}

#[test]
fn test_non_numeric_rows_is_rejected() {
    let temp_dir = TempDir::new().unwrap();

    logcleaner(temp_dir.path())
        .args(["app.log", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be a number"));
}

#[test]
fn test_missing_file_fails() {
    let temp_dir = TempDir::new().unwrap();

    logcleaner(temp_dir.path())
        .arg(temp_dir.path().join("missing.log"))
        .arg("3")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn test_missing_arguments_fail() {
    let temp_dir = TempDir::new().unwrap();

    logcleaner(temp_dir.path()).assert().failure();
}

#[test]
fn test_settings_supply_date_format() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join("config.json"),
        r#"{"date_format": "2006-01-02", "exclude": ["DEBUG"], "color": false}"#,
    )
    .unwrap();

    let log = temp_dir.path().join("app.log");
    fs::write(
        &log,
        "2024-05-01 first\ncontinued\n2024-05-02 DEBUG noise\n2024-05-03 last\n",
    )
    .unwrap();

    logcleaner(temp_dir.path())
        .arg(&log)
        .arg("5")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&log).unwrap(),
        "2024-05-01 first continued\n2024-05-03 last\n"
    );
}

#[test]
fn test_show_config() {
    let temp_dir = TempDir::new().unwrap();

    logcleaner(temp_dir.path())
        .arg("--show-config")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("logcleaner Configuration")
                .and(predicate::str::contains("using defaults")),
        );
}

#[test]
fn test_broken_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.json");
    fs::write(&config, "{ nope").unwrap();

    logcleaner(temp_dir.path())
        .arg("--config")
        .arg(&config)
        .arg("--show-config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse settings file"));
}

#[test]
fn test_explicit_config_file_without_config_dir() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.json");
    fs::write(&config, r#"{"exclude": ["noise"], "color": false}"#).unwrap();
    let log = temp_dir.path().join("app.log");
    fs::write(&log, "keep 1\nnoise\nkeep 2\n").unwrap();

    let mut cmd = Command::cargo_bin("logcleaner").unwrap();
    cmd.env_remove("LOGCLEANER_CONFIG_DIR")
        .env_remove("RUST_LOG")
        .env_remove("XDG_CONFIG_HOME")
        .arg("--config")
        .arg(&config)
        .arg(&log)
        .arg("5")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&log).unwrap(), "keep 1\nkeep 2\n");
}
