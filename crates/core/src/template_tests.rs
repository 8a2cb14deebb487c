// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::build::{Build, BuildStatus};
use std::fs;
use tempfile::TempDir;

fn make_view() -> BuildEventView {
    BuildEventView::new(Build {
        id: "some-build-id".to_string(),
        project_id: "my-project-id".to_string(),
        status: BuildStatus::Success,
        log_url: "https://some.example.com/log/url?foo=bar".to_string(),
        build_trigger_id: Some("trigger-7".to_string()),
        substitutions: [("BRANCH_NAME".to_string(), "main".to_string())]
            .into_iter()
            .collect(),
    })
}

fn params(pairs: &[(&str, &str)]) -> TemplateParams {
    let raw = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    TemplateParams::compile(&raw).unwrap()
}

#[test]
fn builtin_template_renders_status() {
    let template = IssueTemplate::builtin().unwrap();
    let payload = template
        .render(&make_view(), &params(&[("buildStatus", "SUCCESS")]))
        .unwrap();

    assert_eq!(payload.title, "Cloud Build [my-project-id]: SUCCESS");
    assert!(payload.body.contains("SUCCESS"));
    assert!(payload.body.contains("trigger-7"));
    assert!(payload
        .body
        .contains("[View Logs](https://some.example.com/log/url?foo=bar)"));
}

#[test]
fn builtin_template_tolerates_missing_committer() {
    let template = IssueTemplate::builtin().unwrap();
    let payload = template
        .render(&make_view(), &TemplateParams::default())
        .unwrap();
    assert!(!payload.body.contains("Triggered by"));
}

#[test]
fn builtin_template_mentions_resolved_committer() {
    let template = IssueTemplate::builtin().unwrap();
    let mut view = make_view();
    view.set_substitution(COMMITTER_LOGIN_KEY, "human-committer");
    let payload = template.render(&view, &TemplateParams::default()).unwrap();
    assert!(payload.body.ends_with("Triggered by: human-committer"));
}

#[test]
fn rendering_is_deterministic() {
    let template = IssueTemplate::builtin().unwrap();
    let view = make_view();
    let p = params(&[("a", "1"), ("b", "$(build.status)")]);
    let first = template.render(&view, &p).unwrap();
    let second = template.render(&view, &p).unwrap();
    assert_eq!(first, second);
}

#[test]
fn unresolved_field_is_a_template_error() {
    let template = IssueTemplate::compile("{{Build.Nope}}", "body").unwrap();
    let err = template
        .render(&make_view(), &TemplateParams::default())
        .unwrap_err();
    assert!(matches!(err, Error::Template(_)), "got {err:?}");
}

#[test]
fn missing_substitution_reference_is_a_template_error() {
    let template =
        IssueTemplate::compile("t", "{{Build.Substitutions.TAG_NAME}}").unwrap();
    let err = template
        .render(&make_view(), &TemplateParams::default())
        .unwrap_err();
    assert!(err.to_string().contains("body"));
}

#[test]
fn blank_title_is_rejected() {
    let template = IssueTemplate::compile("  ", "body").unwrap();
    let err = template
        .render(&make_view(), &TemplateParams::default())
        .unwrap_err();
    assert!(matches!(err, Error::Template(_)));
}

#[test]
fn output_is_not_html_escaped() {
    let template = IssueTemplate::compile("{{Params.q}}", "b").unwrap();
    let payload = template
        .render(&make_view(), &params(&[("q", "a < b & \"c\"")]))
        .unwrap();
    assert_eq!(payload.title, "a < b & \"c\"");
}

#[test]
fn syntax_error_is_invalid_template() {
    let err = IssueTemplate::compile("{{Build.Id", "b").unwrap_err();
    assert!(matches!(err, Error::InvalidTemplate(_)));
}

#[test]
fn params_bindings_resolve_build_data() {
    let template =
        IssueTemplate::compile("{{Params.status}} on {{Params.branch}}", "{{Params.tag}}|{{Params.team}}")
            .unwrap();
    let p = params(&[
        ("status", "$(build.status)"),
        ("branch", "$(build.substitutions['BRANCH_NAME'])"),
        ("tag", "$(build.substitutions['TAG_NAME'])"),
        ("team", "platform"),
    ]);
    let payload = template.render(&make_view(), &p).unwrap();
    assert_eq!(payload.title, "SUCCESS on main");
    assert_eq!(payload.body, "|platform");
}

#[test]
fn params_reject_bad_binding() {
    let raw = [("x".to_string(), "$(build.nope)".to_string())]
        .into_iter()
        .collect();
    let err = TemplateParams::compile(&raw).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));
}

#[test]
fn document_yaml_and_json() {
    let yaml = "title: \"Build {{Build.Id}}\"\nbody: \"{{Build.Status}}\"\n";
    let payload = IssueTemplate::from_document(yaml)
        .unwrap()
        .render(&make_view(), &TemplateParams::default())
        .unwrap();
    assert_eq!(payload.title, "Build some-build-id");

    let json = r#"{"title": "Cloud Build [{{Build.ProjectId}}]: {{Build.Status}}", "body": "status: **{{Build.Status}}**"}"#;
    let payload = IssueTemplate::from_document(json)
        .unwrap()
        .render(&make_view(), &TemplateParams::default())
        .unwrap();
    assert_eq!(payload.body, "status: **SUCCESS**");
}

#[test]
fn document_requires_title_and_body() {
    let err = IssueTemplate::from_document("title: only").unwrap_err();
    assert!(matches!(err, Error::InvalidTemplate(_)));
}

#[test]
fn from_config_reads_relative_uri() {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("issue.yaml"),
        "title: \"From file {{Build.Id}}\"\nbody: b\n",
    )
    .unwrap();
    let config = TemplateConfig {
        r#type: Some("handlebars".to_string()),
        uri: Some("file://issue.yaml".to_string()),
        content: None,
    };
    let payload = IssueTemplate::from_config(Some(&config), tmp.path())
        .unwrap()
        .render(&make_view(), &TemplateParams::default())
        .unwrap();
    assert_eq!(payload.title, "From file some-build-id");
}

#[test]
fn from_config_rejects_remote_uri() {
    let config = TemplateConfig {
        r#type: None,
        uri: Some("gs://bucket/issue.yaml".to_string()),
        content: None,
    };
    let err = IssueTemplate::from_config(Some(&config), Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("gs://bucket/issue.yaml"));
}

#[test]
fn from_config_rejects_other_template_types() {
    let config = TemplateConfig {
        r#type: Some("golang".to_string()),
        uri: None,
        content: Some("title: t\nbody: b\n".to_string()),
    };
    let err = IssueTemplate::from_config(Some(&config), Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("golang"));
}

#[test]
fn from_config_without_template_uses_builtin() {
    let payload = IssueTemplate::from_config(None, Path::new("."))
        .unwrap()
        .render(&make_view(), &TemplateParams::default())
        .unwrap();
    assert_eq!(payload.title, "Cloud Build [my-project-id]: SUCCESS");
}
