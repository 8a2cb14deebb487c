// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod check;
pub mod notify;
pub mod render;

use std::fs;
use std::io;
use std::path::Path;

use ghi_core::{load_config, set_up, Build, EnvSecretGetter, Notifier};

use crate::error::{Error, Result};

/// Load a configuration file and set up a notifier from it.
///
/// Template paths in the configuration are relative to the file itself.
pub(crate) async fn load_notifier(config_path: &Path) -> Result<Notifier> {
    let config = load_config(config_path)?;
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    Ok(set_up(&config, base_dir, &EnvSecretGetter).await?)
}

/// Read a build event from a file, or from stdin when `path` is `-`.
pub(crate) fn read_build(path: &Path) -> Result<Build> {
    let label = path.display().to_string();
    let content = if path == Path::new("-") {
        io::read_to_string(io::stdin())
    } else {
        fs::read_to_string(path)
    }
    .map_err(|source| Error::ReadBuild {
        path: label.clone(),
        source,
    })?;
    parse_build(&content, &label)
}

fn parse_build(content: &str, label: &str) -> Result<Build> {
    serde_json::from_str(content).map_err(|source| Error::InvalidBuild {
        path: label.to_string(),
        source,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
