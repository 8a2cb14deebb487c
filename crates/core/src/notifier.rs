// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The build-to-issue notifier.
//!
//! [`set_up`] validates a configuration once and produces an immutable
//! [`Notifier`]. Each call to [`Notifier::send_notification`] then runs one
//! build event through filter, committer lookup, rendering and delivery.

use std::fmt;
use std::path::Path;

use crate::build::{Build, BuildEventView};
use crate::committer;
use crate::config::{Delivery, NotifierConfig};
use crate::dispatch::{self, DispatchMode, DispatchOutcome};
use crate::error::{Error, Result};
use crate::filter::EventFilter;
use crate::github::GithubClient;
use crate::secrets::SecretGetter;
use crate::template::{IssuePayload, IssueTemplate, TemplateParams};

/// Result of handling one build event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    /// The filter did not match; nothing was sent.
    Skipped,
    Created { number: u64, url: String },
    Updated { number: u64, url: String },
}

impl From<DispatchOutcome> for NotificationOutcome {
    fn from(outcome: DispatchOutcome) -> Self {
        match outcome {
            DispatchOutcome::Created { number, url } => NotificationOutcome::Created { number, url },
            DispatchOutcome::Updated { number, url } => NotificationOutcome::Updated { number, url },
        }
    }
}

impl fmt::Display for NotificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationOutcome::Skipped => write!(f, "skipped"),
            NotificationOutcome::Created { number, url } => write!(f, "created #{number} {url}"),
            NotificationOutcome::Updated { number, url } => write!(f, "updated #{number} {url}"),
        }
    }
}

/// A validated notifier. Read-only after [`set_up`].
#[derive(Debug)]
pub struct Notifier {
    name: String,
    filter: EventFilter,
    template: IssueTemplate,
    params: TemplateParams,
    repo: String,
    mode: DispatchMode,
    client: GithubClient,
}

/// Validate a configuration and build a notifier.
///
/// Checks run in order and the first failure is returned:
/// 1. the filter is present and compiles
/// 2. the delivery names a repository
/// 3. the delivery names a declared token secret, which then resolves
/// 4. the template and params compile
///
/// Relative template paths resolve against `base_dir`.
pub async fn set_up(
    config: &NotifierConfig,
    base_dir: &Path,
    secrets: &dyn SecretGetter,
) -> Result<Notifier> {
    let notification = &config.spec.notification;

    if notification.filter.trim().is_empty() {
        return Err(Error::MissingFilter);
    }
    let filter = EventFilter::compile(&notification.filter)?;

    let delivery = Delivery::from_mapping(&notification.delivery)?;

    let secret = config.find_secret(&delivery.token_secret).ok_or_else(|| {
        Error::MissingSecret(format!(
            "no secret named '{}' in spec.secrets",
            delivery.token_secret
        ))
    })?;
    let token = secrets.get_secret(&secret.resource_name).await?;

    let template = IssueTemplate::from_config(notification.template.as_ref(), base_dir)?;
    let params = TemplateParams::compile(&notification.params)?;

    let client = GithubClient::new(&delivery.api_url, &token, delivery.timeout)
        .map_err(|e| Error::InvalidConfig(format!("delivery.apiUrl: {e}")))?;

    let mode = if delivery.reuse_open_issue {
        DispatchMode::ReuseOpenIssue
    } else {
        DispatchMode::Create
    };

    tracing::debug!(
        "notifier {} ready: repo={} filter={:?}",
        config.name(),
        delivery.repo,
        filter.source()
    );

    Ok(Notifier {
        name: config.name().to_string(),
        filter,
        template,
        params,
        repo: delivery.repo,
        mode,
        client,
    })
}

impl Notifier {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Delivery repository, `owner/name`.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn filter(&self) -> &EventFilter {
        &self.filter
    }

    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Run one build event through the full pipeline.
    ///
    /// # Errors
    ///
    /// Template and delivery failures are returned. Filter evaluation and
    /// committer lookup failures are logged and do not fail the event.
    pub async fn send_notification(&self, build: Build) -> Result<NotificationOutcome> {
        let mut view = BuildEventView::new(build);
        if !self.filter.matches(&view) {
            tracing::debug!("build {}: filter did not match", view.build().id);
            return Ok(NotificationOutcome::Skipped);
        }

        committer::resolve(&self.client, &mut view, &self.repo).await;

        let payload = self.template.render(&view, &self.params)?;
        let outcome = dispatch::send(&self.client, &self.repo, &payload, self.mode).await?;
        Ok(outcome.into())
    }

    /// Filter and render a build without calling GitHub.
    ///
    /// Returns `None` when the filter does not match. Committer fields render
    /// empty.
    pub fn preview(&self, build: Build) -> Result<Option<IssuePayload>> {
        let mut view = BuildEventView::new(build);
        if !self.filter.matches(&view) {
            return Ok(None);
        }
        committer::fill_attribution_defaults(&mut view);
        self.template.render(&view, &self.params).map(Some)
    }
}

#[cfg(test)]
#[path = "notifier_tests.rs"]
mod tests;
