//! Integration tests for `envrelay exec`.
#![cfg(unix)]

mod common;

use common::{dir_with_env, envrelay_cmd};
use predicates::prelude::*;

#[test]
fn test_exec_exposes_loaded_variables() {
    let dir = dir_with_env("GREETING=hello\nCOUNT=3\n");
    envrelay_cmd(dir.path())
        .args(["exec", "--", "sh", "-c", "printf '%s %s' \"$GREETING\" \"$COUNT\""])
        .assert()
        .success()
        .stdout("hello 3");
}

#[test]
fn test_exec_keeps_inherited_environment() {
    let dir = dir_with_env("LOADED=yes\n");
    envrelay_cmd(dir.path())
        .env("ENVRELAY_TEST_INHERITED", "kept")
        .args(["exec", "--", "sh", "-c", "printf %s \"$ENVRELAY_TEST_INHERITED\""])
        .assert()
        .success()
        .stdout("kept");
}

#[test]
fn test_exec_collision_returns_exit_code_3() {
    let dir = dir_with_env("ENVRELAY_TEST_TAKEN=file\n");
    envrelay_cmd(dir.path())
        .env("ENVRELAY_TEST_TAKEN", "process")
        .args(["exec", "--", "true"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains(
            "Key \"ENVRELAY_TEST_TAKEN\" has already been defined in toEnv",
        ));
}

#[test]
fn test_exec_overwrite_replaces_existing() {
    let dir = dir_with_env("ENVRELAY_TEST_TAKEN=file\n");
    envrelay_cmd(dir.path())
        .env("ENVRELAY_TEST_TAKEN", "process")
        .args(["exec", "--overwrite", "--", "sh", "-c", "printf %s \"$ENVRELAY_TEST_TAKEN\""])
        .assert()
        .success()
        .stdout("file");
}

#[test]
fn test_exec_skip_existing_keeps_current_value() {
    let dir = dir_with_env("ENVRELAY_TEST_TAKEN=file\nOTHER=new\n");
    envrelay_cmd(dir.path())
        .env("ENVRELAY_TEST_TAKEN", "process")
        .args([
            "exec",
            "--skip-existing",
            "--",
            "sh",
            "-c",
            "printf '%s %s' \"$ENVRELAY_TEST_TAKEN\" \"$OTHER\"",
        ])
        .assert()
        .success()
        .stdout("process new");
}

#[test]
fn test_exec_passes_child_exit_code_through() {
    let dir = dir_with_env("A=1\n");
    envrelay_cmd(dir.path())
        .args(["exec", "--", "sh", "-c", "exit 42"])
        .assert()
        .code(42);
}

#[test]
fn test_exec_applies_prefix() {
    let dir = dir_with_env("HOST=db\n");
    envrelay_cmd(dir.path())
        .args(["--prefix", "APP_", "exec", "--", "sh", "-c", "printf %s \"$APP_HOST\""])
        .assert()
        .success()
        .stdout("db");
}

#[test]
fn test_exec_missing_program_is_general_error() {
    let dir = dir_with_env("A=1\n");
    envrelay_cmd(dir.path())
        .args(["exec", "--", "envrelay-test-no-such-program"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to run"));
}
