// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Secret resolution.

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Resolves a secret resource name to its value.
#[async_trait]
pub trait SecretGetter: Send + Sync {
    async fn get_secret(&self, resource_name: &str) -> Result<String>;
}

/// Reads secrets from environment variables.
///
/// A resource name of the form `projects/*/secrets/NAME/versions/*` maps to
/// the variable `NAME` upper-cased, with every non-alphanumeric character
/// replaced by `_`. Any other resource name is used as the variable name.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretGetter;

impl EnvSecretGetter {
    /// Returns the environment variable consulted for `resource_name`.
    pub fn variable_name(resource_name: &str) -> String {
        let parts: Vec<&str> = resource_name.split('/').collect();
        match parts.as_slice() {
            ["projects", _, "secrets", name, "versions", _] if !name.is_empty() => name
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() {
                        c.to_ascii_uppercase()
                    } else {
                        '_'
                    }
                })
                .collect(),
            _ => resource_name.to_string(),
        }
    }
}

#[async_trait]
impl SecretGetter for EnvSecretGetter {
    async fn get_secret(&self, resource_name: &str) -> Result<String> {
        let var = Self::variable_name(resource_name);
        match std::env::var(&var) {
            Ok(value) if !value.is_empty() => Ok(value),
            Ok(_) => Err(Error::Secret {
                name: resource_name.to_string(),
                reason: format!("environment variable {var} is empty"),
            }),
            Err(_) => Err(Error::Secret {
                name: resource_name.to_string(),
                reason: format!("environment variable {var} is not set"),
            }),
        }
    }
}

#[cfg(test)]
#[path = "secrets_tests.rs"]
mod tests;
