// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `ghissue notify`.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn notify_skips_without_contacting_github() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("build.status == Build.Status.SUCCESS", "http://127.0.0.1:9"),
    );
    let build = write(&temp, "build.json", FAILED_BUILD);

    ghissue()
        .args(["notify", "-c"])
        .arg(&config)
        .arg("-b")
        .arg(&build)
        .assert()
        .success()
        .stdout("skipped\n");
}

#[test]
fn notify_surfaces_delivery_failure() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("build.status == Build.Status.FAILURE", "http://127.0.0.1:9"),
    );
    let build = write(&temp, "build.json", FAILED_BUILD);

    ghissue()
        .args(["notify", "-c"])
        .arg(&config)
        .arg("-b")
        .arg(&build)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error: delivery failed"));
}
