//! Integration tests for the command line

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo_bin;
use mcpdevops_testkit::{TEST_TOKEN, mock_user, temp_dir_in_workspace, zip_archive};
use predicates::prelude::*;
use std::fs;
use std::process::Command;

/// A command with no ambient GitHub configuration
fn isolated_cmd() -> Command {
    let mut cmd = Command::new(cargo_bin!(env!("CARGO_PKG_NAME")));
    cmd.env_remove("GITHUB_PERSONAL_ACCESS_TOKEN")
        .env_remove("MCPDEVOPS_API_URL")
        .env_remove("MCPDEVOPS_DOWNLOADS_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_version_flag() {
    isolated_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mcpdevops"));
}

#[test]
fn test_cli_help_flag() {
    isolated_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"));
}

#[test]
fn test_logs_read_prints_file_map() {
    let temp = temp_dir_in_workspace();
    let dir = temp.path().join("log_1");
    fs::create_dir_all(dir.join("build")).unwrap();
    fs::write(dir.join("build").join("1_Run tests.txt"), "error: test failed").unwrap();

    let output = isolated_cmd()
        .args(["logs", "read", "log_1", "--downloads-dir"])
        .arg(temp.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let logs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let map = logs.as_object().unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map.values().next().unwrap(), "error: test failed");
}

#[test]
fn test_logs_read_missing_directory_fails() {
    let temp = temp_dir_in_workspace();

    isolated_cmd()
        .args(["logs", "read", "log_404", "--downloads-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: "));
}

#[test]
fn test_logs_download_requires_token() {
    let temp = temp_dir_in_workspace();

    isolated_cmd()
        .args(["logs", "download", "test-repo", "42", "--downloads-dir"])
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: GITHUB_PERSONAL_ACCESS_TOKEN environment variable is not configured",
        ));
}

#[tokio::test]
async fn test_logs_download_extracts_archive() {
    let mut server = mockito::Server::new_async().await;
    mock_user(&mut server).await;
    server
        .mock("GET", "/repos/sergio/test-repo/actions/runs/42/logs")
        .with_status(200)
        .with_body(zip_archive(&[("job.txt", b"done")]))
        .create_async()
        .await;
    let temp = temp_dir_in_workspace();

    let mut cmd = isolated_cmd();
    cmd.env("GITHUB_PERSONAL_ACCESS_TOKEN", TEST_TOKEN)
        .args(["logs", "download", "test-repo", "42", "--api-url"])
        .arg(server.url())
        .arg("--downloads-dir")
        .arg(temp.path());
    let output = tokio::task::spawn_blocking(move || cmd.output()).await.unwrap().unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let result: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(result["success"], true);
    assert_eq!(
        fs::read_to_string(temp.path().join("log_42").join("job.txt")).unwrap(),
        "done"
    );
}
