// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Notifier configuration loading and delivery validation.
//!
//! The configuration follows the Cloud Build notifier layout:
//!
//! ```yaml
//! apiVersion: cloud-build-notifiers/v1
//! kind: GitHubIssuesNotifier
//! metadata:
//!   name: failed-builds
//! spec:
//!   notification:
//!     filter: build.status == Build.Status.FAILURE
//!     params:
//!       buildStatus: $(build.status)
//!     delivery:
//!       githubRepo: owner/repo
//!       githubToken:
//!         secretRef: github-token
//!     template:
//!       type: handlebars
//!       uri: issue.yaml
//!   secrets:
//!     - name: github-token
//!       value: projects/my-project/secrets/github-token/versions/latest
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default per-request timeout for GitHub API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Root notifier configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default)]
    pub spec: Spec,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spec {
    #[serde(default)]
    pub notification: Notification,
    /// Secrets available to the notifier, in declaration order.
    #[serde(default)]
    pub secrets: Vec<SecretRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Notification {
    /// Boolean filter expression (see [`crate::filter`]).
    #[serde(default)]
    pub filter: String,
    /// Free-form template parameters.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Notifier-specific delivery settings; validated by [`Delivery::from_mapping`].
    #[serde(default)]
    pub delivery: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<TemplateConfig>,
}

/// A named reference to a secret held by the secret backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRef {
    /// Name used by `secretRef` fields in the delivery mapping.
    #[serde(alias = "name")]
    pub local_name: String,
    /// Backend resource name, e.g. `projects/p/secrets/s/versions/latest`.
    #[serde(alias = "value")]
    pub resource_name: String,
}

/// Where the issue template comes from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Template language; only `handlebars` is supported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
    /// Local path (optionally `file://`) of a template document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Inline template document; takes precedence over `uri`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl NotifierConfig {
    /// Look up a declared secret by its local name.
    pub fn find_secret(&self, local_name: &str) -> Option<&SecretRef> {
        self.spec
            .secrets
            .iter()
            .find(|s| s.local_name == local_name)
    }

    /// Display name for log lines.
    pub fn name(&self) -> &str {
        self.metadata
            .as_ref()
            .map(|m| m.name.as_str())
            .filter(|n| !n.is_empty())
            .unwrap_or("githubissues")
    }
}

/// Validated delivery settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Target repository, `owner/name`.
    pub repo: String,
    /// Local name of the secret holding the API token.
    pub token_secret: String,
    pub api_url: String,
    pub timeout: Duration,
    /// Update an open issue with the same title instead of filing a new one.
    pub reuse_open_issue: bool,
}

impl Delivery {
    /// Validate a delivery mapping.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingDeliveryRepo`] when `githubRepo` is absent or blank
    /// - [`Error::MissingSecret`] when `githubToken.secretRef` is absent
    /// - [`Error::InvalidConfig`] when an optional key has the wrong type
    pub fn from_mapping(delivery: &BTreeMap<String, Value>) -> Result<Self> {
        let repo = delivery
            .get("githubRepo")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .ok_or(Error::MissingDeliveryRepo)?
            .to_string();

        let token_secret = delivery
            .get("githubToken")
            .and_then(|t| t.get("secretRef"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::MissingSecret("delivery.githubToken.secretRef is not set".to_string()))?
            .to_string();

        let api_url = match delivery.get("apiUrl") {
            None => DEFAULT_API_URL.to_string(),
            Some(Value::String(url)) if !url.trim().is_empty() => {
                url.trim().trim_end_matches('/').to_string()
            }
            Some(other) => {
                return Err(Error::InvalidConfig(format!(
                    "delivery.apiUrl must be a non-empty string, got {other}"
                )))
            }
        };

        let timeout = match delivery.get("timeoutSeconds") {
            None => DEFAULT_TIMEOUT,
            Some(value) => match value.as_u64() {
                Some(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(Error::InvalidConfig(format!(
                        "delivery.timeoutSeconds must be a positive integer, got {value}"
                    )))
                }
            },
        };

        let reuse_open_issue = match delivery.get("reuseOpenIssue") {
            None => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(Error::InvalidConfig(format!(
                    "delivery.reuseOpenIssue must be true or false, got {other}"
                )))
            }
        };

        Ok(Delivery {
            repo,
            token_secret,
            api_url,
            timeout,
            reuse_open_issue,
        })
    }
}

/// Load a notifier configuration file.
///
/// The format follows the extension: `.yaml`/`.yml`, `.json`, or `.toml`.
/// Anything else is read as YAML.
pub fn load_config(path: &Path) -> Result<NotifierConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("json") => serde_json::from_str(&content)?,
        Some("toml") => toml::from_str(&content)?,
        _ => serde_yaml::from_str(&content)?,
    };
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
