// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Test helpers are shared across spec files; not every file uses every helper.
#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub const TOKEN_VAR: &str = "GHISSUE_SPEC_TOKEN";

pub fn ghissue() -> Command {
    let mut cmd = cargo_bin_cmd!("ghissue");
    cmd.env(TOKEN_VAR, "ghtABC=").env_remove("RUST_LOG");
    cmd
}

/// A notifier config delivering to `somename/somerepo` through `api_url`.
pub fn config_yaml(filter: &str, api_url: &str) -> String {
    format!(
        r#"apiVersion: cloud-build-notifiers/v1
kind: GitHubIssuesNotifier
metadata:
  name: spec-notifier
spec:
  notification:
    filter: {filter}
    params:
      buildStatus: $(build.status)
    delivery:
      githubRepo: somename/somerepo
      githubToken:
        secretRef: token
      apiUrl: {api_url}
      timeoutSeconds: 2
  secrets:
    - name: token
      value: projects/p/secrets/ghissue-spec-token/versions/latest
"#
    )
}

pub const FAILED_BUILD: &str = r#"{
  "id": "build-123",
  "projectId": "my-project-id",
  "status": "FAILURE",
  "logUrl": "https://console.cloud.google.com/cloud-build/builds/build-123",
  "substitutions": {"REF_NAME": "main", "BRANCH_NAME": "main", "REPO_FULL_NAME": "somename/somerepo"}
}"#;

/// Write `content` to `name` inside `dir` and return the path.
pub fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}
