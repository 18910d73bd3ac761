use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

const SCHEMA: &str = "\
├───────────────┼────────────────────────┼──────────────────┤
| Week starting | Release artistry (3)   | Focused work (2) |
├───────────────┼────────────────────────┼──────────────────┤
| Feb 9, 2026   | Fabio, Michael, Luis   | Daniele, Joep    |
├───────────────┼────────────────────────┼──────────────────┤
| Feb 16, 2026  | Daniele, Joep, Fabio   | Michael, Luis    |
├───────────────┼────────────────────────┼──────────────────┤
";

const MAPPING: &str =
    r#"{"Fabio":"U1","Michael":"U2","Luis":"U3","Daniele":"U4","Joep":"U5"}"#;

/// `rota` with an isolated home and none of the host's Slack settings.
fn rota_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("rota"));
    cmd.env("HOME", home)
        .env("USERPROFILE", home)
        .env_remove("SCHEMA")
        .env_remove("SLACK_TOKEN")
        .env_remove("SLACK_CHANNEL")
        .env_remove("SLACK_USERGROUP_ID")
        .env_remove("SLACK_USER_MAPPING")
        .env_remove("RUST_LOG");
    cmd
}

fn schedule_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("schema.txt");
    fs::write(&path, SCHEMA).expect("write schema");
    path
}

#[test]
fn show_prints_week_as_json() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    let output = rota_cmd(home.path())
        .args(["show", "--date", "2026-02-18", "--schedule-file"])
        .arg(&path)
        .output()
        .expect("run rota show");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        doc["schedule"]["release_artistry"],
        serde_json::json!(["Daniele", "Joep", "Fabio"])
    );
    assert_eq!(
        doc["schedule"]["focused_work"],
        serde_json::json!(["Michael", "Luis"])
    );
}

#[test]
fn show_reads_inline_schema_from_env() {
    let home = TempDir::new().expect("home");

    rota_cmd(home.path())
        .env("SCHEMA", SCHEMA)
        .args(["show", "--date", "Feb 9, 2026"])
        .assert()
        .success()
        .stdout(contains(r#""release_artistry":["Fabio","Michael","Luis"]"#));
}

#[test]
fn missing_schedule_is_an_error() {
    let home = TempDir::new().expect("home");

    rota_cmd(home.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(contains("no schedule configured"));
}

#[test]
fn cycle_json_reports_bounds() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    let output = rota_cmd(home.path())
        .args(["cycle", "--json", "--date", "2026-02-16", "--schedule-file"])
        .arg(&path)
        .output()
        .expect("run rota cycle");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(doc["cycle_length"], 2);
    assert_eq!(doc["start_date"], "Feb 09, 2026");
    assert_eq!(doc["end_date"], "Feb 16, 2026");
    assert_eq!(doc["current_week"], 2);
    assert_eq!(doc["weeks"].as_array().map(Vec::len), Some(2));
}

#[test]
fn dry_run_without_token_simulates_everything() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    rota_cmd(home.path())
        .env("SLACK_CHANNEL", "#art-release")
        .env("SLACK_USERGROUP_ID", "S_RELEASE")
        .env("SLACK_USER_MAPPING", MAPPING)
        .args(["notify", "--dry-run", "--date", "2026-02-09", "--schedule-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains(r#""schedule":"#))
        .stdout(contains("[DRY RUN] Would send Slack notification to #art-release"))
        .stdout(contains(
            "[dry-run] simulated (approximate): current members of S_RELEASE unknown; would ensure present: U1, U2, U3",
        ))
        .stderr(contains("<@U1>, <@U2>, <@U3>"));
}

#[test]
fn skip_group_only_announces() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    rota_cmd(home.path())
        .env("SLACK_CHANNEL", "#art-release")
        .env("SLACK_USERGROUP_ID", "S_RELEASE")
        .args(["notify", "--dry-run", "--skip-group", "--schedule-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("[DRY RUN] Would send"))
        .stdout(contains("simulated").not());
}

#[test]
fn reconcile_without_group_is_disabled() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    rota_cmd(home.path())
        .args(["reconcile", "--schedule-file"])
        .arg(&path)
        .assert()
        .success()
        .stdout(contains("disabled: no user group configured"));
}

#[test]
fn live_reconcile_without_token_exits_with_configuration_error() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    rota_cmd(home.path())
        .env("SLACK_USERGROUP_ID", "S_RELEASE")
        .env("SLACK_USER_MAPPING", MAPPING)
        .args(["reconcile", "--schedule-file"])
        .arg(&path)
        .assert()
        .code(2)
        .stdout(contains("configuration-error"));
}

#[test]
fn malformed_mapping_disables_reconciliation_only() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    rota_cmd(home.path())
        .env("SLACK_CHANNEL", "#art-release")
        .env("SLACK_USERGROUP_ID", "S_RELEASE")
        .env("SLACK_USER_MAPPING", "{not json")
        .args(["notify", "--dry-run", "--schedule-file"])
        .arg(&path)
        .assert()
        .code(2)
        .stdout(contains("[DRY RUN] Would send Slack notification"))
        .stdout(contains("[dry-run] configuration-error"));
}

#[test]
fn config_file_supplies_settings() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);
    let config = home.path().join("rota.yaml");
    fs::write(
        &config,
        format!(
            "schedule: {}\nslack:\n  channel: '#from-file'\n",
            path.display()
        ),
    )
    .expect("write config");

    rota_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .args(["notify", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Would send Slack notification to #from-file"));
}

#[test]
fn unparseable_config_is_fatal() {
    let home = TempDir::new().expect("home");
    let config = home.path().join("bad.yaml");
    fs::write(&config, "slack: [unclosed").expect("write config");

    rota_cmd(home.path())
        .arg("--config")
        .arg(&config)
        .arg("show")
        .assert()
        .failure()
        .stderr(contains("failed to load configuration"));
}

#[test]
fn notify_json_is_a_single_document() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    let output = rota_cmd(home.path())
        .env("SLACK_CHANNEL", "#art-release")
        .env("SLACK_USERGROUP_ID", "S_RELEASE")
        .env("SLACK_USER_MAPPING", MAPPING)
        .args(["notify", "--dry-run", "--json", "--date", "2026-02-09", "--schedule-file"])
        .arg(&path)
        .output()
        .expect("run rota notify --json");
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(
        doc["schedule"]["release_artistry"],
        serde_json::json!(["Fabio", "Michael", "Luis"])
    );
    assert_eq!(doc["announcement"]["state"], "dry-run");
    assert_eq!(doc["reconciliation"]["outcome"]["state"], "approximate");
    assert_eq!(
        doc["reconciliation"]["outcome"]["ensure_present"],
        serde_json::json!(["U1", "U2", "U3"])
    );
}

#[test]
fn reconcile_json_keeps_exit_code() {
    let home = TempDir::new().expect("home");
    let path = schedule_file(&home);

    let output = rota_cmd(home.path())
        .env("SLACK_USERGROUP_ID", "S_RELEASE")
        .env("SLACK_USER_MAPPING", MAPPING)
        .args(["reconcile", "--json", "--schedule-file"])
        .arg(&path)
        .output()
        .expect("run rota reconcile --json");
    assert_eq!(output.status.code(), Some(2));

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert!(doc["announcement"].is_null());
    assert_eq!(doc["reconciliation"]["outcome"]["state"], "configuration-error");
}
