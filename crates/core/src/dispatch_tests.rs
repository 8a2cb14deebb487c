// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> GithubClient {
    GithubClient::new(&server.uri(), "ghtABC=", Duration::from_secs(5)).unwrap()
}

fn payload() -> IssuePayload {
    IssuePayload {
        title: "Cloud Build [p]: FAILURE".to_string(),
        body: "status: **FAILURE**".to_string(),
    }
}

async fn mount_create(server: &MockServer, expected: u64) {
    Mock::given(method("POST"))
        .and(path("/repos/o/r/issues"))
        .and(body_json(json!({
            "title": "Cloud Build [p]: FAILURE",
            "body": "status: **FAILURE**"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 12,
            "html_url": "https://github.com/o/r/issues/12",
            "title": "Cloud Build [p]: FAILURE"
        })))
        .expect(expected)
        .mount(server)
        .await;
}

#[tokio::test]
async fn create_mode_posts_issue() {
    let server = MockServer::start().await;
    mount_create(&server, 1).await;

    let outcome = send(&client(&server), "o/r", &payload(), DispatchMode::Create)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::Created {
            number: 12,
            url: "https://github.com/o/r/issues/12".to_string(),
        }
    );
    assert_eq!(outcome.number(), 12);
}

#[tokio::test]
async fn reuse_mode_updates_matching_issue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 3, "title": "Cloud Build [p]: FAILURE", "html_url": "pr", "pull_request": {}},
            {"number": 5, "title": "Cloud Build [p]: FAILURE", "html_url": "https://github.com/o/r/issues/5"},
            {"number": 9, "title": "other", "html_url": "x"}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/repos/o/r/issues/5"))
        .and(body_json(json!({"body": "status: **FAILURE**"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 5,
            "title": "Cloud Build [p]: FAILURE",
            "html_url": "https://github.com/o/r/issues/5"
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_create(&server, 0).await;

    let outcome = send(&client(&server), "o/r", &payload(), DispatchMode::ReuseOpenIssue)
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::Updated {
            number: 5,
            url: "https://github.com/o/r/issues/5".to_string(),
        }
    );
}

#[tokio::test]
async fn reuse_mode_creates_without_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"number": 9, "title": "Cloud Build [p]: SUCCESS", "html_url": "x"}
        ])))
        .mount(&server)
        .await;
    mount_create(&server, 1).await;

    let outcome = send(&client(&server), "o/r", &payload(), DispatchMode::ReuseOpenIssue)
        .await
        .unwrap();
    assert!(matches!(outcome, DispatchOutcome::Created { number: 12, .. }));
}

#[tokio::test]
async fn non_success_is_a_delivery_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
        .expect(1)
        .mount(&server)
        .await;

    let err = send(&client(&server), "o/r", &payload(), DispatchMode::Create)
        .await
        .unwrap_err();
    match err {
        Error::Delivery { status, reason } => {
            assert_eq!(status, Some(401));
            assert!(reason.contains("Bad credentials"));
        }
        other => unreachable!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn listing_failure_is_a_delivery_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_create(&server, 0).await;

    let err = send(&client(&server), "o/r", &payload(), DispatchMode::ReuseOpenIssue)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Delivery { status: Some(500), .. }));
}

#[tokio::test]
async fn transport_failure_has_no_status() {
    let client = GithubClient::new("http://127.0.0.1:9", "t", Duration::from_secs(2)).unwrap();
    let err = send(&client, "o/r", &payload(), DispatchMode::Create)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Delivery { status: None, .. }));
}
