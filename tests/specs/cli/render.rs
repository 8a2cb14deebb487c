// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Specs for `ghissue render`.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;
use predicates::prelude::*;
use tempfile::TempDir;

// Nothing listens here; render must never contact GitHub.
const UNREACHABLE_API: &str = "http://127.0.0.1:9";

#[test]
fn render_matching_build() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("build.status == Build.Status.FAILURE", UNREACHABLE_API),
    );
    let build = write(&temp, "build.json", FAILED_BUILD);

    ghissue()
        .arg("render")
        .arg("--config")
        .arg(&config)
        .arg("--build")
        .arg(&build)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Cloud Build [my-project-id]: FAILURE\n\n",
        ))
        .stdout(predicate::str::contains(
            "[View Logs](https://console.cloud.google.com/cloud-build/builds/build-123)",
        ))
        .stdout(predicate::str::contains("Triggered by").not());
}

#[test]
fn render_reads_build_from_stdin_as_json() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("build.status == Build.Status.FAILURE", UNREACHABLE_API),
    );

    let output = ghissue()
        .args(["render", "--json", "-b", "-", "-c"])
        .arg(&config)
        .write_stdin(FAILED_BUILD)
        .output()
        .unwrap();
    assert!(output.status.success());
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["title"], "Cloud Build [my-project-id]: FAILURE");
}

#[test]
fn render_skips_non_matching_build() {
    let temp = TempDir::new().unwrap();
    let config = write(
        &temp,
        "notifier.yaml",
        &config_yaml("build.status == Build.Status.SUCCESS", UNREACHABLE_API),
    );
    let build = write(&temp, "build.json", FAILED_BUILD);

    ghissue()
        .args(["render", "-c"])
        .arg(&config)
        .arg("-b")
        .arg(&build)
        .assert()
        .success()
        .stdout("skipped\n");
}

#[test]
fn render_uses_template_file_next_to_config() {
    let temp = TempDir::new().unwrap();
    let mut yaml = config_yaml("true", UNREACHABLE_API);
    yaml = yaml.replace(
        "    delivery:",
        "    template:\n      type: handlebars\n      uri: issue.yaml\n    delivery:",
    );
    let config = write(&temp, "notifier.yaml", &yaml);
    write(
        &temp,
        "issue.yaml",
        "title: \"{{Params.buildStatus}} in {{Build.Substitutions.BRANCH_NAME}}\"\nbody: \"build {{Build.Id}}\"\n",
    );
    let build = write(&temp, "build.json", FAILED_BUILD);

    ghissue()
        .args(["render", "-c"])
        .arg(&config)
        .arg("-b")
        .arg(&build)
        .assert()
        .success()
        .stdout("FAILURE in main\n\nbuild build-123\n");
}

#[test]
fn render_rejects_malformed_build() {
    let temp = TempDir::new().unwrap();
    let config = write(&temp, "notifier.yaml", &config_yaml("true", UNREACHABLE_API));
    let build = write(&temp, "build.json", "{\"id\": ");

    ghissue()
        .args(["render", "-c"])
        .arg(&config)
        .arg("-b")
        .arg(&build)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid build event"));
}
