// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ghi-core: build-completion to GitHub issue notifier
//!
//! This crate provides configuration validation, event filtering, issue
//! rendering, committer attribution and issue delivery used by the
//! `ghissue` CLI.

pub mod build;
pub mod committer;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod filter;
pub mod github;
pub mod notifier;
pub mod secrets;
pub mod template;

pub use build::{Build, BuildEventView, BuildStatus};
pub use committer::{AccountKind, RefKind, ResolvedIdentity};
pub use config::{load_config, Delivery, NotifierConfig};
pub use dispatch::{DispatchMode, DispatchOutcome};
pub use error::{Error, Result};
pub use filter::EventFilter;
pub use github::GithubClient;
pub use notifier::{set_up, NotificationOutcome, Notifier};
pub use secrets::{EnvSecretGetter, SecretGetter};
pub use template::{IssuePayload, IssueTemplate, TemplateParams};
