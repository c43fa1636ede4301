use assert_cmd::Command;
use predicates::prelude::predicate;
use std::fs;
use temp_dir::TempDir;

fn ticket_harvest(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ticket-harvest").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn missing_repo_is_reported() {
    let dir = TempDir::new().unwrap();
    ticket_harvest(&dir)
        .args(["--owner", "octo", "--targetBranch", "release"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--repo"));
}

#[test]
fn empty_values_are_reported_as_missing() {
    let dir = TempDir::new().unwrap();
    ticket_harvest(&dir)
        .args(["--owner=", "--repo=", "--targetBranch", "release"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Missing --owner, --repo"));
}

#[test]
fn unknown_response_type_lists_choices() {
    let dir = TempDir::new().unwrap();
    ticket_harvest(&dir)
        .args([
            "--owner=octo",
            "--repo=app",
            "--targetBranch=release",
            "--responseType=tracker",
        ])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("tracker"))
        .stderr(predicate::str::contains("jira"))
        .stderr(predicate::str::contains("list"));
}

#[test]
fn invalid_configuration_fails() {
    let dir = TempDir::new().unwrap();
    let config = dir.child("config.yaml");
    fs::write(&config, "extraction:\n  strategy: pattern\n  pattern: '([A-Z'\n").unwrap();
    ticket_harvest(&dir)
        .args(["--owner=octo", "--repo=app", "--targetBranch=release", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("invalid ticket pattern"));
}

#[test]
fn unreachable_remote_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let config = dir.child("config.yaml");
    // nothing listens on port 1
    fs::write(
        &config,
        "github:\n  api_base_url: http://127.0.0.1:1\n  request_timeout_secs: 5\n  retries: 0\n",
    )
    .unwrap();
    ticket_harvest(&dir)
        .args([
            "--owner=octo",
            "--repo=app",
            "--targetBranch=release",
            "--responseType=list",
            "--config",
        ])
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "failed to fetch commits from /repos/octo/app/compare/develop...release",
        ));
}

#[test]
fn errors_are_shown_with_logging_disabled() {
    let dir = TempDir::new().unwrap();
    ticket_harvest(&dir)
        .env("RUST_LOG", "off")
        .args(["--owner=", "--repo=app", "--targetBranch=release"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--owner"));

    let config = dir.child("config.yaml");
    fs::write(&config, "github:\n  request_timeout_secs: 0\n").unwrap();
    ticket_harvest(&dir)
        .env("RUST_LOG", "off")
        .args(["--owner=octo", "--repo=app", "--targetBranch=release", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("request_timeout_secs must be greater than 0"));
}
