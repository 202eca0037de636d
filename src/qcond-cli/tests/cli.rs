use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const QUERY: &str = r#"{
  "type": "AndQuery",
  "children": [
    {"type": "NumericQuery", "column": "price", "operator": "greaterThan", "value": 99.99},
    {"type": "StringQuery", "column": "owner", "operator": "equals", "value": "[me]"}
  ]
}"#;

/// A command isolated from any user config file
fn qcond(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("qcond").unwrap();
    cmd.env("QCOND_CONFIG", "")
        .env("XDG_CONFIG_HOME", dir.path())
        .env("HOME", dir.path());
    cmd
}

#[test]
fn test_compile_from_stdin() {
    let dir = TempDir::new().unwrap();
    qcond(&dir)
        .args(["compile", "-", "--user", "u-9"])
        .write_stdin(QUERY)
        .assert()
        .success()
        .stdout("(\"price\" > 99.99) AND (\"owner\" = 'u-9')\n");
}

#[test]
fn test_compile_select_with_config_file() {
    let dir = TempDir::new().unwrap();
    let query = dir.path().join("query.json");
    fs::write(&query, QUERY).unwrap();
    let config = dir.path().join("qcond.toml");
    fs::write(
        &config,
        "[placeholders]\ndefault_user = \"batch\"\n\n[output]\ndialect = \"sqlserver\"\ntable = \"dbo.items\"\n",
    )
    .unwrap();

    qcond(&dir)
        .arg("compile")
        .arg(&query)
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout("SELECT * FROM [dbo].[items] WHERE ([price] > 99.99) AND ([owner] = 'batch')\n");
}

#[test]
fn test_config_from_environment() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("env.toml");
    fs::write(&config, "[output]\ntable = \"t\"\n").unwrap();

    qcond(&dir)
        .env("QCOND_CONFIG", &config)
        .args(["compile", "-", "--user", "x"])
        .write_stdin(QUERY)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("SELECT * FROM \"t\" WHERE"));
}

#[test]
fn test_unknown_operator_fails() {
    let dir = TempDir::new().unwrap();
    qcond(&dir)
        .arg("compile")
        .write_stdin(r#"{"type":"StringQuery","column":"x","operator":"betweenXYZ","value":"1"}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("betweenXYZ"));
}

#[test]
fn test_unknown_placeholder_policy() {
    let dir = TempDir::new().unwrap();
    let query = r#"{"type":"StringQuery","column":"tag","operator":"equals","value":"[tomorrow]"}"#;

    qcond(&dir)
        .arg("compile")
        .write_stdin(query)
        .assert()
        .failure()
        .stderr(predicate::str::contains("tomorrow"));

    qcond(&dir)
        .args(["compile", "--policy", "lenient"])
        .write_stdin(query)
        .assert()
        .success()
        .stdout("\"tag\" = '[tomorrow]'\n");
}

#[test]
fn test_override_today() {
    let dir = TempDir::new().unwrap();
    qcond(&dir)
        .args(["compile", "--today", "2025-08-21", "--set", "today=2000-01-01"])
        .write_stdin(r#"{"type":"DateQuery","column":"d","operator":"equals","value":"[today]"}"#)
        .assert()
        .success()
        .stdout("\"d\" = DATE '2000-01-01'\n");

    qcond(&dir)
        .args(["compile", "--today", "2025-08-21", "--set", "today=2000-01-01"])
        .write_stdin(r#"{"type":"DateQuery","column":"d","operator":"daysAfter","value":1}"#)
        .assert()
        .success()
        .stdout("CAST(\"d\" AS DATE) = DATE '1999-12-31'\n");

    qcond(&dir)
        .args(["compile", "--set", "today=soon"])
        .write_stdin(r#"{"type":"DateQuery","column":"d","operator":"daysAfter","value":1}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("today override"));
}

#[test]
fn test_validate() {
    let dir = TempDir::new().unwrap();
    qcond(&dir)
        .arg("validate")
        .write_stdin(QUERY)
        .assert()
        .success()
        .stdout(predicate::str::contains("Query is valid"));

    qcond(&dir)
        .arg("validate")
        .write_stdin(r#"{"type":"OrQuery","children":[]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("OrQuery requires at least one child"));
}

#[test]
fn test_operators_listing() {
    let dir = TempDir::new().unwrap();
    qcond(&dir)
        .args(["operators", "--field-type", "DATE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dayOfWeek"))
        .stdout(predicate::str::contains("startsWith").not());
}

#[test]
fn test_config_init_show_check() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("c.toml");

    qcond(&dir)
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    qcond(&dir)
        .args(["config", "check"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));

    qcond(&dir)
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("loaded from"));
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[debug]\nverbosity = 7\n").unwrap();

    qcond(&dir)
        .args(["operators", "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("debug.verbosity"));
}

#[test]
fn test_missing_query_file() {
    let dir = TempDir::new().unwrap();
    qcond(&dir)
        .args(["compile", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read query file"));
}
