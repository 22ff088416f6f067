//! Smoke tests to verify command wiring

use std::net::TcpListener;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Front-end origin allowed by CORS"))
        .stdout(predicate::str::contains("--memory"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--no-seed"));
}

#[test]
fn test_serve_requires_database_url() {
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.env_remove("DATABASE_URL")
        .current_dir(std::env::temp_dir())
        .arg("serve")
        .arg("--bind")
        .arg("127.0.0.1:0");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_memory_conflicts_with_migrate() {
    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.arg("serve").arg("--memory").arg("--migrate");

    cmd.assert().failure();
}

#[test]
fn test_memory_accepts_database_url_from_env() {
    // Occupy a port so the server exits with a bind error once arguments parse
    let taken = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = taken.local_addr().unwrap().to_string();

    let mut cmd = Command::cargo_bin("trivia").unwrap();
    cmd.env("DATABASE_URL", "postgres://localhost/trivia")
        .timeout(Duration::from_secs(30))
        .args(["serve", "--memory", "--bind", &addr]);

    cmd.assert()
        .code(1)
        .stderr(predicate::str::contains("Server error"))
        .stderr(predicate::str::contains("cannot be used with").not());
}
