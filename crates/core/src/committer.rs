// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Committer and tagger attribution for build events.
//!
//! Resolution order:
//! 1. Classify the ref from `REF_NAME`, `TAG_NAME` and `BRANCH_NAME`
//! 2. Branch builds: the commit author of `COMMIT_SHA` (or the branch head)
//! 3. Tag builds: the author of the release for that tag
//!
//! A failed lookup never stops the notification; it only leaves the issue
//! without attribution.

#[cfg(test)]
#[path = "committer_tests.rs"]
mod tests;

use crate::build::{Build, BuildEventView};
use crate::error::{Error, Result};
use crate::github::{Account, GithubClient};

/// Substitution written with the resolved login.
pub const COMMITTER_LOGIN_KEY: &str = "GH_COMMITTER_LOGIN";
/// Substitution written with the resolved account kind.
pub const COMMITTER_KIND_KEY: &str = "GH_COMMITTER_TYPE";
/// Substitution written with the tagger login on tag builds.
pub const TAGGER_LOGIN_KEY: &str = "GH_TAGGER_LOGIN";

const REF_NAME: &str = "REF_NAME";
const TAG_NAME: &str = "TAG_NAME";
const BRANCH_NAME: &str = "BRANCH_NAME";
const COMMIT_SHA: &str = "COMMIT_SHA";
const REPO_FULL_NAME: &str = "REPO_FULL_NAME";

/// What kind of ref triggered the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefKind {
    Branch(String),
    Tag(String),
    Unknown,
}

impl RefKind {
    /// Classify the ref a build ran against.
    ///
    /// An exact `REF_NAME` match wins, tag first. Without one, a lone
    /// `TAG_NAME` or `BRANCH_NAME` decides. Both present and neither matching
    /// is ambiguous and yields `Unknown`.
    pub fn from_view(view: &BuildEventView) -> Self {
        let ref_name = view.substitution(REF_NAME);
        let tag = view.substitution(TAG_NAME);
        let branch = view.substitution(BRANCH_NAME);

        match (tag, branch) {
            (Some(t), _) if Some(t) == ref_name => RefKind::Tag(t.to_string()),
            (_, Some(b)) if Some(b) == ref_name => RefKind::Branch(b.to_string()),
            (Some(t), None) => RefKind::Tag(t.to_string()),
            (None, Some(b)) => RefKind::Branch(b.to_string()),
            _ => RefKind::Unknown,
        }
    }
}

/// GitHub account type of the resolved identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    User,
    Bot,
    Unknown,
}

impl AccountKind {
    fn from_api(kind: &str) -> Self {
        match kind {
            "User" => AccountKind::User,
            "Bot" => AccountKind::Bot,
            _ => AccountKind::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::User => "User",
            AccountKind::Bot => "Bot",
            AccountKind::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    pub login: String,
    pub kind: AccountKind,
}

/// Repository named by the build's `REPO_FULL_NAME`, or empty.
pub fn github_repo(build: &Build) -> String {
    build
        .substitutions
        .get(REPO_FULL_NAME)
        .cloned()
        .unwrap_or_default()
}

/// Resolve who is responsible for a build and record it in the view.
///
/// On success the view gains `GH_COMMITTER_LOGIN` and `GH_COMMITTER_TYPE`
/// (plus `GH_TAGGER_LOGIN` for tags). On failure the failure is logged.
/// Either way every attribution key is present afterwards, empty when
/// unresolved (see [`fill_attribution_defaults`]).
pub async fn resolve(
    client: &GithubClient,
    view: &mut BuildEventView,
    fallback_repo: &str,
) -> Option<ResolvedIdentity> {
    let identity = resolve_identity(client, view, fallback_repo).await;
    fill_attribution_defaults(view);
    identity
}

/// Insert an empty value for every attribution key the view lacks.
///
/// Strict templates may reference `Build.Substitutions.GH_COMMITTER_LOGIN`
/// and friends whether or not a lookup ran. Existing values are kept.
pub fn fill_attribution_defaults(view: &mut BuildEventView) {
    for key in [COMMITTER_LOGIN_KEY, COMMITTER_KIND_KEY, TAGGER_LOGIN_KEY] {
        if !view.substitutions().contains_key(key) {
            view.set_substitution(key, "");
        }
    }
}

async fn resolve_identity(
    client: &GithubClient,
    view: &mut BuildEventView,
    fallback_repo: &str,
) -> Option<ResolvedIdentity> {
    let ref_kind = RefKind::from_view(view);
    if ref_kind == RefKind::Unknown {
        tracing::debug!(
            "build {}: ref kind unknown, skipping committer lookup",
            view.build().id
        );
        return None;
    }

    let repo = match github_repo(view.build()) {
        repo if repo.is_empty() => fallback_repo.to_string(),
        repo => repo,
    };

    match lookup(client, &repo, &ref_kind, view).await {
        Ok(identity) => {
            tracing::debug!(
                "build {}: attributed to {} ({})",
                view.build().id,
                identity.login,
                identity.kind.as_str()
            );
            view.set_substitution(COMMITTER_LOGIN_KEY, &identity.login);
            view.set_substitution(COMMITTER_KIND_KEY, identity.kind.as_str());
            if let RefKind::Tag(_) = ref_kind {
                view.set_substitution(TAGGER_LOGIN_KEY, &identity.login);
            }
            Some(identity)
        }
        Err(e) => {
            tracing::warn!("build {}: {}", view.build().id, e);
            None
        }
    }
}

async fn lookup(
    client: &GithubClient,
    repo: &str,
    ref_kind: &RefKind,
    view: &BuildEventView,
) -> Result<ResolvedIdentity> {
    let identity = match ref_kind {
        RefKind::Branch(branch) => {
            let git_ref = view.substitution(COMMIT_SHA).unwrap_or(branch);
            let commit = client
                .get_commit(repo, git_ref)
                .await
                .map_err(|e| lookup_failed(&format!("commit {git_ref}"), repo, e))?;
            ResolvedIdentity {
                login: commit.commit.author.map(|a| a.name).unwrap_or_default(),
                kind: account_kind(commit.author.as_ref()),
            }
        }
        RefKind::Tag(tag) => {
            let release = client
                .get_release_by_tag(repo, tag)
                .await
                .map_err(|e| lookup_failed(&format!("release {tag}"), repo, e))?;
            let author = release.author.unwrap_or_default();
            ResolvedIdentity {
                kind: AccountKind::from_api(&author.kind),
                login: author.login,
            }
        }
        RefKind::Unknown => {
            return Err(Error::CommitterResolution("ref kind unknown".to_string()))
        }
    };

    if identity.login.trim().is_empty() {
        return Err(Error::CommitterResolution(format!(
            "no author login for {ref_kind:?} in {repo}"
        )));
    }
    Ok(identity)
}

fn lookup_failed(what: &str, repo: &str, e: impl std::fmt::Display) -> Error {
    Error::CommitterResolution(format!("{what} in {repo}: {e}"))
}

fn account_kind(account: Option<&Account>) -> AccountKind {
    account
        .map(|a| AccountKind::from_api(&a.kind))
        .unwrap_or(AccountKind::Unknown)
}
