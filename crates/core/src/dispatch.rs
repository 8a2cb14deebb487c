// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue delivery.

use crate::error::{Error, Result};
use crate::github::{ApiError, GithubClient, Issue};
use crate::template::IssuePayload;

/// How a rendered payload reaches the repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Always file a new issue.
    #[default]
    Create,
    /// Update the body of an open issue with the same title, or file a new one.
    ReuseOpenIssue,
}

/// What the dispatcher did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Created { number: u64, url: String },
    Updated { number: u64, url: String },
}

impl DispatchOutcome {
    pub fn number(&self) -> u64 {
        match self {
            DispatchOutcome::Created { number, .. } | DispatchOutcome::Updated { number, .. } => {
                *number
            }
        }
    }

    pub fn url(&self) -> &str {
        match self {
            DispatchOutcome::Created { url, .. } | DispatchOutcome::Updated { url, .. } => url,
        }
    }
}

/// Send a rendered issue to `repo`.
///
/// # Errors
///
/// Returns [`Error::Delivery`] on transport failures and non-2xx responses.
/// Nothing is retried.
pub async fn send(
    client: &GithubClient,
    repo: &str,
    payload: &IssuePayload,
    mode: DispatchMode,
) -> Result<DispatchOutcome> {
    if mode == DispatchMode::ReuseOpenIssue {
        let open = client.list_open_issues(repo).await.map_err(delivery_error)?;
        if let Some(existing) = find_by_title(&open, &payload.title) {
            let issue = client
                .update_issue(repo, existing.number, &payload.body)
                .await
                .map_err(delivery_error)?;
            tracing::info!("updated issue #{} in {}", issue.number, repo);
            return Ok(DispatchOutcome::Updated {
                number: issue.number,
                url: issue.html_url,
            });
        }
        tracing::debug!("no open issue titled {:?} in {}", payload.title, repo);
    }

    let issue = client
        .create_issue(repo, payload)
        .await
        .map_err(delivery_error)?;
    tracing::info!("created issue #{} in {}", issue.number, repo);
    Ok(DispatchOutcome::Created {
        number: issue.number,
        url: issue.html_url,
    })
}

fn find_by_title<'a>(issues: &'a [Issue], title: &str) -> Option<&'a Issue> {
    issues
        .iter()
        .find(|i| i.pull_request.is_none() && i.title == title)
}

fn delivery_error(e: ApiError) -> Error {
    Error::Delivery {
        status: e.status(),
        reason: e.to_string(),
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
