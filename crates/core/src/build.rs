// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Build event types.
//!
//! [`Build`] mirrors the JSON a CI pipeline publishes when a build changes
//! state. [`BuildEventView`] wraps one build for a single notification cycle
//! and carries the substitutions derived while processing it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Outcome (or progress) of a build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatus {
    Pending,
    Queued,
    Working,
    Success,
    Failure,
    InternalError,
    Timeout,
    Cancelled,
    Expired,
    /// Also covers any status name this crate does not know.
    #[default]
    #[serde(other)]
    StatusUnknown,
}

impl BuildStatus {
    const ALL: [BuildStatus; 10] = [
        BuildStatus::StatusUnknown,
        BuildStatus::Pending,
        BuildStatus::Queued,
        BuildStatus::Working,
        BuildStatus::Success,
        BuildStatus::Failure,
        BuildStatus::InternalError,
        BuildStatus::Timeout,
        BuildStatus::Cancelled,
        BuildStatus::Expired,
    ];

    /// Returns the wire name, e.g. `SUCCESS`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::StatusUnknown => "STATUS_UNKNOWN",
            BuildStatus::Pending => "PENDING",
            BuildStatus::Queued => "QUEUED",
            BuildStatus::Working => "WORKING",
            BuildStatus::Success => "SUCCESS",
            BuildStatus::Failure => "FAILURE",
            BuildStatus::InternalError => "INTERNAL_ERROR",
            BuildStatus::Timeout => "TIMEOUT",
            BuildStatus::Cancelled => "CANCELLED",
            BuildStatus::Expired => "EXPIRED",
        }
    }

    /// Looks up a status by its exact wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }

    /// Returns valid status names for error messages.
    pub fn valid_names() -> String {
        Self::ALL.map(|s| s.as_str()).join(", ")
    }
}

impl fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A build as published by the CI pipeline.
///
/// Unknown fields in the inbound JSON are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Build {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub status: BuildStatus,
    #[serde(default)]
    pub log_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_trigger_id: Option<String>,
    /// Ref metadata such as `REF_NAME`, `BRANCH_NAME`, `TAG_NAME`.
    #[serde(default)]
    pub substitutions: BTreeMap<String, String>,
}

impl Build {
    /// Parse a build from its JSON representation.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A build paired with the substitutions derived for one notification.
///
/// The wrapped build is never modified. Derived values (such as the resolved
/// committer login) are layered on top of the build's own substitutions.
#[derive(Debug, Clone)]
pub struct BuildEventView {
    build: Build,
    substitutions: BTreeMap<String, String>,
}

impl BuildEventView {
    pub fn new(build: Build) -> Self {
        let substitutions = build.substitutions.clone();
        BuildEventView {
            build,
            substitutions,
        }
    }

    pub fn build(&self) -> &Build {
        &self.build
    }

    /// Build substitutions merged with derived values.
    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }

    /// Returns a non-empty substitution value.
    pub fn substitution(&self, key: &str) -> Option<&str> {
        self.substitutions
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn set_substitution(&mut self, key: &str, value: impl Into<String>) {
        self.substitutions.insert(key.to_string(), value.into());
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
