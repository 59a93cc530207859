//! Configuration integration tests.
//!
//! These tests verify config discovery, format parsing, and precedence
//! from an end-to-end perspective using the compiled binary. Tests use
//! `info --json` to assert actual config values, not just process success.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

const CONFIG_ENV: &[&str] = &[
    "FOGLINE_LOG_LEVEL",
    "FOGLINE_LOG_DIR",
    "FOGLINE_LOG_PATH",
    "FOGLINE_MAX_GRADE",
    "FOGLINE_MIN_FLESCH",
    "FOGLINE_MAX_INPUT_BYTES",
    "FOGLINE_DISABLE_INPUT_LIMIT",
    "FOGLINE_PRONUNCIATION_DICT",
    "RUST_LOG",
];

/// Returns a Command configured to run our binary without inherited settings.
#[allow(deprecated)]
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    for var in CONFIG_ENV {
        cmd.env_remove(var);
    }
    cmd
}

fn run_info(mut command: Command, dir: &std::path::Path) -> Value {
    let output = command
        .args(["-C", dir.to_str().unwrap(), "info", "--json"])
        .output()
        .expect("failed to run command");
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("invalid JSON output")
}

/// Run `info --json` from a directory and parse the JSON output.
fn info_json(dir: &std::path::Path) -> Value {
    run_info(cmd(), dir)
}

// =============================================================================
// Config File Discovery
// =============================================================================

#[test]
fn runs_without_config_file() {
    let tmp = TempDir::new().unwrap();
    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "info");
    assert!(json["config"]["config_file"].is_null());
    assert!(json["config"]["max_grade"].is_null());
    assert_eq!(json["config"]["max_input_bytes"], 5 * 1024 * 1024);
}

#[test]
fn discovers_dotfile_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.toml"), "max_grade = 8.0\n").unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["max_grade"], 8.0);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with(".fogline.toml"),
        "should report dotfile: {reported}"
    );
}

#[test]
fn discovers_regular_config_in_current_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("fogline.toml"), "min_flesch = 60.0\n").unwrap();

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["min_flesch"], 60.0);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("fogline.toml"),
        "should report regular config: {reported}"
    );
}

#[test]
fn discovers_config_in_parent_directory() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("chapters").join("draft");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join(".fogline.toml"), r#"log_level = "debug""#).unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["log_level"], "debug");
    assert!(json["config"]["config_file"].as_str().is_some());
}

#[test]
fn regular_name_overrides_dotfile() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.toml"), "max_grade = 6.0\n").unwrap();
    fs::write(tmp.path().join("fogline.toml"), "max_grade = 10.0\n").unwrap();

    let json = info_json(tmp.path());

    assert_eq!(
        json["config"]["max_grade"], 10.0,
        "regular file should override dotfile"
    );
}

// =============================================================================
// Config Format Parsing
// =============================================================================

#[test]
fn parses_yaml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".fogline.yaml"),
        "log_level: warn\nabbreviations:\n  - fig\n  - approx\n",
    )
    .unwrap();
    let baseline = info_json(TempDir::new().unwrap().path());

    let json = info_json(tmp.path());

    assert_eq!(json["config"]["log_level"], "warn");
    assert_eq!(
        json["config"]["abbreviations"].as_u64().unwrap(),
        baseline["config"]["abbreviations"].as_u64().unwrap() + 2
    );
}

#[test]
fn parses_yml_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.yml"), "max_input_bytes: 2048\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["max_input_bytes"], 2048);
}

#[test]
fn parses_json_config() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".fogline.json"),
        r#"{"log_level": "error", "disable_input_limit": true}"#,
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "error");
    assert!(
        json["config"]["max_input_bytes"].is_null(),
        "disabled limit should not be reported"
    );
}

// =============================================================================
// Config Precedence
// =============================================================================

#[test]
fn closer_config_takes_precedence() {
    let tmp = TempDir::new().unwrap();
    let sub_dir = tmp.path().join("book");
    fs::create_dir_all(&sub_dir).unwrap();
    fs::write(tmp.path().join(".fogline.toml"), "max_grade = 12.0\n").unwrap();
    fs::write(sub_dir.join(".fogline.toml"), "max_grade = 7.0\n").unwrap();

    let json = info_json(&sub_dir);

    assert_eq!(json["config"]["max_grade"], 7.0, "closer config should win");
}

#[test]
fn later_extension_overrides_earlier_in_same_directory() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.toml"), r#"log_level = "debug""#).unwrap();
    fs::write(tmp.path().join(".fogline.yaml"), "log_level: error\n").unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "error");
}

#[test]
fn explicit_config_overrides_discovered() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.toml"), "max_grade = 6.0\n").unwrap();
    let explicit = tmp.path().join("override.toml");
    fs::write(&explicit, "max_grade = 9.5\n").unwrap();

    let output = cmd()
        .args([
            "-C",
            tmp.path().to_str().unwrap(),
            "--config",
            explicit.to_str().unwrap(),
            "info",
            "--json",
        ])
        .output()
        .expect("failed to run command");
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["config"]["max_grade"], 9.5);
    let reported = json["config"]["config_file"].as_str().unwrap();
    assert!(
        reported.ends_with("override.toml"),
        "--config path should be reported: {reported}"
    );
}

#[test]
fn environment_overrides_files() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".fogline.toml"),
        "log_level = \"debug\"\nmax_grade = 6.0\n",
    )
    .unwrap();

    let mut command = cmd();
    command
        .env("FOGLINE_LOG_LEVEL", "warn")
        .env("FOGLINE_MAX_GRADE", "11.5");
    let json = run_info(command, tmp.path());

    assert_eq!(json["config"]["log_level"], "warn");
    assert_eq!(json["config"]["max_grade"], 11.5);
}

#[test]
fn pronunciation_dict_is_reported() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("dict.txt"), "FIRE  F AY1 ER0\n").unwrap();
    fs::write(
        tmp.path().join("fogline.toml"),
        "pronunciation_dict = \"dict.txt\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["pronunciation_dict"], "dict.txt");
}

// =============================================================================
// Error Cases
// =============================================================================

#[test]
fn invalid_toml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.toml"), "this is not valid toml [[[").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration"));
}

#[test]
fn invalid_yaml_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".fogline.yaml"),
        "invalid:\n  yaml\n content:\n[broken",
    )
    .unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn invalid_json_config_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.json"), "{not valid json}").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure();
}

#[test]
fn wrong_type_for_gate_shows_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join(".fogline.toml"), "max_grade = \"easy\"\n").unwrap();

    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_grade"));
}

#[test]
fn unknown_config_field_is_ignored() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join(".fogline.toml"),
        "log_level = \"warn\"\nunknown_field = \"should be ignored\"\n",
    )
    .unwrap();

    let json = info_json(tmp.path());
    assert_eq!(json["config"]["log_level"], "warn");
}

// =============================================================================
// Boundary Marker Tests
// =============================================================================

#[test]
fn git_boundary_stops_config_search() {
    let tmp = TempDir::new().unwrap();
    let parent = tmp.path().join("parent");
    let repo = parent.join("repo");
    let src = repo.join("docs");
    fs::create_dir_all(&src).unwrap();
    fs::write(parent.join(".fogline.toml"), "max_grade = 4.0\n").unwrap();
    fs::create_dir(repo.join(".git")).unwrap();

    let json = info_json(&src);

    assert!(
        json["config"]["max_grade"].is_null(),
        "boundary should stop the search"
    );
    assert!(json["config"]["config_file"].is_null());
}

#[test]
fn config_in_same_dir_as_git_is_found() {
    let tmp = TempDir::new().unwrap();
    let repo = tmp.path().join("repo");
    let src = repo.join("docs");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir(repo.join(".git")).unwrap();
    fs::write(repo.join(".fogline.toml"), "max_grade = 8.0\n").unwrap();

    let json = info_json(&src);

    assert_eq!(json["config"]["max_grade"], 8.0);
    assert!(json["config"]["config_file"].as_str().is_some());
}
