// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors surfaced by the `ghissue` commands.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Notifier(#[from] ghi_core::Error),

    #[error("failed to read build event from {path}: {source}")]
    ReadBuild {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid build event in {path}: {source}\n  hint: expected the Cloud Build JSON shape with id, projectId and status")]
    InvalidBuild {
        path: String,
        source: serde_json::Error,
    },

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
