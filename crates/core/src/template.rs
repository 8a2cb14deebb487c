// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue title/body rendering.
//!
//! Templates are Handlebars, rendered in strict mode so a reference to a
//! field the view does not have is an error instead of silently empty text.
//! The view exposes:
//!
//! ```text
//! {{Build.Id}} {{Build.ProjectId}} {{Build.Status}} {{Build.LogUrl}}
//! {{Build.BuildTriggerId}} {{Build.Substitutions.BRANCH_NAME}}
//! {{Params.<name>}}
//! {{Committer.Login}} {{Committer.Kind}}
//! ```
//!
//! `Committer` is always present; its fields are empty when the committer
//! could not be resolved, so `{{#if Committer.Login}}` is the way to make
//! attribution optional.

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::build::BuildEventView;
use crate::committer::{COMMITTER_KIND_KEY, COMMITTER_LOGIN_KEY};
use crate::config::TemplateConfig;
use crate::error::{Error, Result};
use crate::filter::{parse_operand, Operand};

const TITLE: &str = "title";
const BODY: &str = "body";

/// Default issue title.
pub const DEFAULT_TITLE: &str = "Cloud Build [{{Build.ProjectId}}]: {{Build.Status}}";

/// Default issue body.
pub const DEFAULT_BODY: &str = "Cloud Build {{Build.ProjectId}} {{Build.BuildTriggerId}} status: **{{Build.Status}}**\n\n[View Logs]({{Build.LogUrl}}){{#if Committer.Login}}\n\nTriggered by: {{Committer.Login}}{{/if}}";

/// The rendered issue, sent as the request body when creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuePayload {
    pub title: String,
    pub body: String,
}

/// On-disk shape of an issue template document (YAML or JSON).
#[derive(Debug, Deserialize)]
struct TemplateDocument {
    title: String,
    body: String,
}

/// Compiled title and body templates.
#[derive(Debug)]
pub struct IssueTemplate {
    registry: Handlebars<'static>,
}

impl IssueTemplate {
    /// Compile a title and a body template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTemplate`] on template syntax errors.
    pub fn compile(title: &str, body: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(TITLE, title)
            .map_err(|e| Error::InvalidTemplate(format!("title: {e}")))?;
        registry
            .register_template_string(BODY, body)
            .map_err(|e| Error::InvalidTemplate(format!("body: {e}")))?;
        Ok(IssueTemplate { registry })
    }

    /// The built-in issue template.
    pub fn builtin() -> Result<Self> {
        Self::compile(DEFAULT_TITLE, DEFAULT_BODY)
    }

    /// Compile a template document: a YAML or JSON mapping with `title` and `body`.
    pub fn from_document(document: &str) -> Result<Self> {
        let doc: TemplateDocument = serde_yaml::from_str(document)
            .map_err(|e| Error::InvalidTemplate(format!("expected a mapping with 'title' and 'body': {e}")))?;
        Self::compile(&doc.title, &doc.body)
    }

    /// Compile the template a notifier config points at, or the built-in one.
    ///
    /// Relative `uri` paths resolve against `base_dir`.
    pub fn from_config(config: Option<&TemplateConfig>, base_dir: &Path) -> Result<Self> {
        let Some(config) = config else {
            return Self::builtin();
        };
        if let Some(kind) = config.r#type.as_deref() {
            if kind != "handlebars" {
                return Err(Error::InvalidTemplate(format!(
                    "unsupported template type '{kind}'\n  hint: only 'handlebars' templates are supported"
                )));
            }
        }
        match (&config.content, &config.uri) {
            (Some(content), _) => Self::from_document(content),
            (None, Some(uri)) => Self::from_document(&read_template_uri(uri, base_dir)?),
            (None, None) => Self::builtin(),
        }
    }

    /// Render the issue for a build event.
    ///
    /// Rendering is deterministic: the same view and params always produce the
    /// same payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Template`] when the template references a field the view
    /// does not have, or when the rendered title is blank.
    pub fn render(&self, view: &BuildEventView, params: &TemplateParams) -> Result<IssuePayload> {
        let params = params.resolve(view);
        let data = TemplateView::new(view, &params);

        let title = self
            .registry
            .render(TITLE, &data)
            .map_err(|e| Error::Template(format!("title: {e}")))?;
        let body = self
            .registry
            .render(BODY, &data)
            .map_err(|e| Error::Template(format!("body: {e}")))?;

        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(Error::Template("rendered title is empty".to_string()));
        }
        Ok(IssuePayload { title, body })
    }
}

fn read_template_uri(uri: &str, base_dir: &Path) -> Result<String> {
    let path = match uri.strip_prefix("file://") {
        Some(path) => path,
        None if uri.contains("://") => {
            return Err(Error::InvalidTemplate(format!(
                "unsupported template uri '{uri}'\n  hint: use a local path or file:// uri"
            )))
        }
        None => uri,
    };
    let path = base_dir.join(path);
    fs::read_to_string(&path)
        .map_err(|e| Error::InvalidTemplate(format!("failed to read {}: {e}", path.display())))
}

/// Template data, serialized with the field names templates reference.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct TemplateView<'a> {
    build: BuildData<'a>,
    params: &'a BTreeMap<String, String>,
    committer: CommitterData<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct BuildData<'a> {
    id: &'a str,
    project_id: &'a str,
    status: &'static str,
    log_url: &'a str,
    build_trigger_id: &'a str,
    substitutions: &'a BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct CommitterData<'a> {
    login: &'a str,
    kind: &'a str,
}

impl<'a> TemplateView<'a> {
    fn new(view: &'a BuildEventView, params: &'a BTreeMap<String, String>) -> Self {
        let build = view.build();
        TemplateView {
            build: BuildData {
                id: &build.id,
                project_id: &build.project_id,
                status: build.status.as_str(),
                log_url: &build.log_url,
                build_trigger_id: build.build_trigger_id.as_deref().unwrap_or(""),
                substitutions: view.substitutions(),
            },
            params,
            committer: CommitterData {
                login: view.substitution(COMMITTER_LOGIN_KEY).unwrap_or(""),
                kind: view.substitution(COMMITTER_KIND_KEY).unwrap_or(""),
            },
        }
    }
}

#[derive(Debug, Clone)]
enum ParamValue {
    Literal(String),
    Binding(Operand),
}

/// Free-form template parameters.
///
/// A value written as `$(build.status)` is bound to build data and resolved per
/// event; anything else is passed through verbatim.
#[derive(Debug, Clone, Default)]
pub struct TemplateParams {
    entries: BTreeMap<String, ParamValue>,
}

impl TemplateParams {
    /// Compile raw parameter values, parsing any `$(...)` bindings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] when a binding does not name build data.
    pub fn compile(raw: &BTreeMap<String, String>) -> Result<Self> {
        let mut entries = BTreeMap::new();
        for (name, value) in raw {
            let param = match value
                .trim()
                .strip_prefix("$(")
                .and_then(|v| v.strip_suffix(')'))
            {
                Some(path) => ParamValue::Binding(parse_operand(path).map_err(|e| {
                    Error::InvalidConfig(format!("param '{name}' has an invalid binding: {e}"))
                })?),
                None => ParamValue::Literal(value.clone()),
            };
            entries.insert(name.clone(), param);
        }
        Ok(TemplateParams { entries })
    }

    /// Resolve every parameter for one build event.
    ///
    /// Bindings that cannot be resolved (e.g. a missing substitution) render
    /// as an empty string.
    pub fn resolve(&self, view: &BuildEventView) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(name, param)| {
                let value = match param {
                    ParamValue::Literal(text) => text.clone(),
                    ParamValue::Binding(operand) => match operand.value(view) {
                        Ok(value) => value.to_text(),
                        Err(e) => {
                            tracing::debug!("param '{}' left empty: {}", name, e);
                            String::new()
                        }
                    },
                };
                (name.clone(), value)
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
