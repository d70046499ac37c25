//! Integration tests for CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const SERVICE: &str = "\
service: demo
provider:
  name: aws
  environment:
    ENV: local
functions:
  myFunc:
    handler: handler.main
    environment:
      FOO: not-bar
  other:
    handler: handler.other
custom:
  serverless-offline-env:
    include:
      - ENV
      - FOO
    functions:
      myFunc:
        path: .env.func
        replace:
          FOO: FUNC_FOO
";

fn workspace() -> TempDir {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("serverless.yml"), SERVICE).expect("write service");
    fs::write(tmp.path().join(".env"), "ENV=default\nFOO=bar\nAWS_KEY=test-123\n").expect("write env");
    fs::write(tmp.path().join(".env.func"), "FOO=\"from-func\"\n").expect("write func env");
    tmp
}

fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("offline-env"));
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("offline-env"));
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains("offline-env"));
}

#[test]
fn test_applies_discovered_service() {
    let tmp = workspace();
    let out = cmd(&tmp).args(["--format", "json"]).assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");
    let tree: serde_json::Value = serde_json::from_str(&stdout).expect("json output");

    assert_eq!(
        tree["provider"]["environment"],
        serde_json::json!({"ENV": "default", "FOO": "bar"})
    );
    assert_eq!(
        tree["functions"]["myFunc"]["environment"],
        serde_json::json!({"FOO": "not-bar", "FUNC_FOO": "from-func"})
    );
    assert!(tree["functions"]["other"].get("environment").is_none());
}

#[test]
fn test_logs_each_assignment() {
    let tmp = workspace();
    cmd(&tmp)
        .assert()
        .success()
        .stderr(predicate::str::contains(r#"Env: Global: setting "ENV":"default""#))
        .stderr(predicate::str::contains(
            r#"Env: Function myFunc: using FOO as FUNC_FOO, setting "FUNC_FOO":"from-func""#,
        ))
        .stdout(predicate::str::contains("FUNC_FOO: from-func"));
}

#[test]
fn test_env_path_option_overrides_nothing_declared() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("serverless.yml"), "service: bare\n").expect("write");
    fs::write(tmp.path().join("local.env"), "A=1\n").expect("write");

    cmd(&tmp)
        .args(["--env-path", "local.env", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""A": "1""#));
}

#[test]
fn test_missing_env_file_is_only_a_warning() {
    let tmp = TempDir::new().expect("tmp");
    fs::write(tmp.path().join("serverless.yml"), "service: bare\n").expect("write");

    cmd(&tmp)
        .args(["-o", "env-path=missing.env"])
        .assert()
        .success()
        .stderr(predicate::str::contains("env file was not found"));
}

#[test]
fn test_requires_service_file() {
    let tmp = TempDir::new().expect("tmp");
    cmd(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no serverless.yml"));
}

#[test]
fn test_summary_report_goes_to_stderr() {
    let tmp = workspace();
    cmd(&tmp)
        .args(["--report", "summary"])
        .assert()
        .success()
        .stderr(predicate::str::contains("offline-env report (summary)"))
        .stderr(predicate::str::contains("function myFunc"));
}

#[test]
fn test_output_keeps_service_order() {
    let tmp = workspace();
    let out = cmd(&tmp).assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).expect("utf8");

    let service = stdout.find("service: demo").expect("service key");
    let provider = stdout.find("provider:").expect("provider key");
    let custom = stdout.find("custom:").expect("custom key");
    assert!(service < provider && provider < custom);
}
