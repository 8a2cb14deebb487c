// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for ghi-core operations.

use thiserror::Error;

/// All possible errors that can occur while setting up or running the notifier.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing filter\n  hint: set spec.notification.filter")]
    MissingFilter,

    #[error("invalid filter: {reason} at '{fragment}'")]
    InvalidFilter { reason: String, fragment: String },

    #[error("missing delivery repo\n  hint: set spec.notification.delivery.githubRepo to 'owner/repo'")]
    MissingDeliveryRepo,

    #[error("missing secret: {0}\n  hint: delivery.githubToken.secretRef must name an entry in spec.secrets")]
    MissingSecret(String),

    #[error("invalid template: {0}")]
    InvalidTemplate(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("failed to resolve secret '{name}': {reason}")]
    Secret { name: String, reason: String },

    #[error("filter evaluation failed: {0}")]
    FilterEvaluation(String),

    #[error("committer resolution failed: {0}")]
    CommitterResolution(String),

    #[error("template error: {0}")]
    Template(String),

    #[error("delivery failed{}: {reason}", status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Delivery { status: Option<u16>, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// A specialized Result type for ghi-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
