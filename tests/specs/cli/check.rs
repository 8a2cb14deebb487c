// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `ghissue check`.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn check_valid_config() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("build.status == Build.Status.FAILURE", "https://api.github.com"),
    );

    ghissue()
        .arg("check")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: spec-notifier"))
        .stdout(predicate::str::contains("repository: somename/somerepo"))
        .stdout(predicate::str::contains(
            "filter: build.status == Build.Status.FAILURE",
        ))
        .stdout(predicate::str::contains("delivery: create"));
}

#[test]
fn check_reports_invalid_filter() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("blah-#B A D#-", "https://api.github.com"),
    );

    ghissue()
        .args(["check", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid filter"));
}

#[test]
fn check_reports_missing_repo() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.json",
        r#"{"spec": {"notification": {"filter": "true", "delivery": {}}}}"#,
    );

    ghissue()
        .args(["check", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing delivery repo"))
        .stderr(predicate::str::contains("hint:"));
}

#[test]
fn check_reports_unset_secret() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("true", "https://api.github.com"),
    );

    ghissue()
        .env_remove(TOKEN_VAR)
        .args(["check", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("GHISSUE_SPEC_TOKEN is not set"));
}

#[test]
fn check_missing_config_file() {
    ghissue()
        .args(["check", "-c", "does-not-exist.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.yaml"));
}
