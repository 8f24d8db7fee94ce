//! End-to-end CLI integration tests
//!
//! These tests use assert_cmd to run the ns-conditions binary against pass
//! documents written to a temporary directory.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::write;
use tempfile::TempDir;

fn ns_conditions(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ns-conditions").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_reconcile_prints_failing_conditions() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path().join("pass.json"),
        r#"{
            "namespace": "team-a",
            "groupVersionError": "invalid group version",
            "contentErrors": ["secrets remain", "pods remain"]
        }"#,
    )
    .unwrap();

    ns_conditions(&dir)
        .args(["reconcile", "--input", "pass.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\": true"))
        .stdout(predicate::str::contains("NamespaceDeletionGroupVersionParsingFailure"))
        .stdout(predicate::str::contains(
            "Failed to delete all resource types, 2 remaining: pods remain, secrets remain",
        ));
}

#[test]
fn test_reconcile_writes_output_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path().join("pass.json"),
        r#"{"discoveryError": {"failedGroups": {"metrics.k8s.io/v1beta1": "503"}}}"#,
    )
    .unwrap();

    ns_conditions(&dir)
        .args(["reconcile", "-i", "pass.json", "-o", "outcome.json"])
        .assert()
        .success();

    let outcome: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("outcome.json")).unwrap())
            .unwrap();
    assert_eq!(outcome["changed"], true);
    assert_eq!(
        outcome["status"]["conditions"][0]["message"],
        "Discovery failed for some groups, 1 failing: unable to retrieve the complete list of server APIs: metrics.k8s.io/v1beta1: 503"
    );
}

#[test]
fn test_reconcile_unchanged_status() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path().join("pass.json"),
        r#"{
            "status": {"conditions": [{
                "type": "NamespaceDeletionContentFailure",
                "status": "False",
                "lastProbeTime": "2024-06-01T08:30:00Z",
                "lastTransitionTime": "2024-06-01T08:31:00Z",
                "reason": "ContentDeleted",
                "message": "All content successfully deleted"
            }]}
        }"#,
    )
    .unwrap();

    ns_conditions(&dir)
        .args(["reconcile", "--input", "pass.json"])
        .env("NS_CONDITIONS_OUTPUT__PRETTY", "false")
        .assert()
        .success()
        .stdout(predicate::str::contains("{\"changed\":false"))
        .stdout(predicate::str::contains("2024-06-01T08:31:00Z"));
}

#[test]
fn test_reconcile_rejects_invalid_pass() {
    let dir = TempDir::new().unwrap();
    write(dir.path().join("pass.json"), "not json").unwrap();

    ns_conditions(&dir)
        .args(["reconcile", "--input", "pass.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pass file"));
}

#[test]
fn test_config_reads_local_file() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path().join("ns-conditions.toml"),
        "[observability]\nlog_level = \"warn\"\n",
    )
    .unwrap();

    ns_conditions(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level = \"warn\""))
        .stdout(predicate::str::contains("pretty = true"));
}
