//! Exit codes, messages and suggestions for failing invocations.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stackforge(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("stackforge").unwrap();
    cmd.current_dir(home)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("NO_COLOR")
        .env_remove("RUST_LOG")
        .env_remove("STACKFORGE_DEFAULTS__LANGUAGE");
    cmd
}

#[test]
fn invalid_language_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    let req = temp.path().join("req.json");
    fs::write(&req, r#"{"language":"cobol","framework":"gin","architecture":"mvp"}"#).unwrap();

    stackforge(temp.path())
        .arg("generate")
        .arg(&req)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("language must be one of: go, node, python"))
        .stderr(predicate::str::contains("stackforge frameworks"));
}

#[test]
fn framework_mismatch_lists_valid_frameworks() {
    let temp = TempDir::new().unwrap();
    let req = temp.path().join("req.json");
    fs::write(&req, r#"{"language":"python","framework":"gin","architecture":"mvp"}"#).unwrap();

    stackforge(temp.path())
        .arg("generate")
        .arg(&req)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not valid for"))
        .stderr(predicate::str::contains("fastapi"));
}

#[test]
fn missing_request_file_is_not_found() {
    let temp = TempDir::new().unwrap();
    stackforge(temp.path())
        .args(["generate", "no-such-request.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no-such-request.json"));
}

#[test]
fn malformed_request_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    let req = temp.path().join("req.json");
    fs::write(&req, "{ not json").unwrap();

    stackforge(temp.path())
        .arg("analyze")
        .arg(&req)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("as JSON"));
}

#[test]
fn broken_config_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    let cfg = temp.path().join("bad.toml");
    fs::write(&cfg, "[output\nformat = ").unwrap();

    stackforge(temp.path())
        .arg("--config")
        .arg(&cfg)
        .arg("frameworks")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unknown_config_key_is_rejected() {
    let temp = TempDir::new().unwrap();
    stackforge(temp.path())
        .args(["config", "get", "defaults.colour"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown config key 'defaults.colour'"));
}

#[test]
fn bad_emit_value_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    stackforge(temp.path())
        .args(["generate", "req.json", "--emit", "zip"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'zip'"));
}

#[test]
fn json_errors_are_machine_readable() {
    let temp = TempDir::new().unwrap();
    let out = stackforge(temp.path())
        .args(["--quiet", "--output-format", "json", "generate", "missing.json"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));

    let value: serde_json::Value = serde_json::from_slice(&out.stderr).unwrap();
    assert_eq!(value["error"]["category"], "not_found");
    assert_eq!(value["error"]["exit_code"], 3);
}

#[test]
fn verbose_shows_cause_chain() {
    let temp = TempDir::new().unwrap();
    stackforge(temp.path())
        .args(["-v", "generate", "missing.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
