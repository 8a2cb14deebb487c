// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal GitHub REST client.
//!
//! Only the calls the notifier makes are implemented: commit and release
//! lookups for committer attribution, and issue create/list/update for
//! delivery. Every request carries the token and the GitHub media type.

use reqwest::{header, Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::template::IssuePayload;

const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("ghissue/", env!("CARGO_PKG_VERSION"));
/// Page size for the open-issue listing.
pub const ISSUES_PER_PAGE: u32 = 100;

/// A failed GitHub API call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("GitHub returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status for non-2xx responses.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// A GitHub account as embedded in commit and release responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub login: String,
    #[serde(default, rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitActor {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommitDetail {
    #[serde(default)]
    pub author: Option<GitActor>,
}

/// `GET /repos/{repo}/commits/{ref}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commit {
    #[serde(default)]
    pub commit: CommitDetail,
    /// Linked GitHub account, absent when the author email is unknown to GitHub.
    #[serde(default)]
    pub author: Option<Account>,
}

/// `GET /repos/{repo}/releases/tags/{tag}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub author: Option<Account>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub title: String,
    /// Present on pull requests, which the issues API also lists.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
struct IssueUpdate<'a> {
    body: &'a str,
}

/// Authenticated client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl GithubClient {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Transport(format!("invalid API url '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Transport(format!(
                "invalid API url '{base_url}'"
            )));
        }
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Ok(GithubClient {
            http,
            base_url,
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub async fn get_commit(&self, repo: &str, git_ref: &str) -> ApiResult<Commit> {
        let url = self.repo_url(repo, &["commits", git_ref])?;
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn get_release_by_tag(&self, repo: &str, tag: &str) -> ApiResult<Release> {
        let url = self.repo_url(repo, &["releases", "tags", tag])?;
        self.send(self.request(Method::GET, url)).await
    }

    pub async fn create_issue(&self, repo: &str, payload: &IssuePayload) -> ApiResult<Issue> {
        let url = self.repo_url(repo, &["issues"])?;
        self.send(self.request(Method::POST, url).json(payload)).await
    }

    /// First page of open issues, newest first.
    pub async fn list_open_issues(&self, repo: &str) -> ApiResult<Vec<Issue>> {
        let url = self.repo_url(repo, &["issues"])?;
        let per_page = ISSUES_PER_PAGE.to_string();
        let request = self
            .request(Method::GET, url)
            .query(&[("state", "open"), ("per_page", per_page.as_str())]);
        self.send(request).await
    }

    pub async fn update_issue(&self, repo: &str, number: u64, body: &str) -> ApiResult<Issue> {
        let number = number.to_string();
        let url = self.repo_url(repo, &["issues", &number])?;
        self.send(self.request(Method::PATCH, url).json(&IssueUpdate { body }))
            .await
    }

    /// `{base}/repos/{owner}/{name}/{segments...}`, each segment percent-encoded.
    fn repo_url(&self, repo: &str, segments: &[&str]) -> ApiResult<Url> {
        let (owner, name) = repo
            .split_once('/')
            .filter(|(o, n)| !o.is_empty() && !n.is_empty() && !n.contains('/'))
            .ok_or_else(|| ApiError::Transport(format!("invalid repository '{repo}'")))?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::Transport(format!("invalid API url '{}'", self.base_url)))?
            .pop_if_empty()
            .extend(["repos", owner, name])
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("github {} {}", method, url);
        self.http
            .request(method, url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, ACCEPT)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
#[path = "github_tests.rs"]
mod tests;
