// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use ghi_core::IssuePayload;

use super::{load_notifier, read_build};
use crate::error::Result;

pub async fn run(config: &Path, build: &Path, json: bool) -> Result<()> {
    let notifier = load_notifier(config).await?;
    let build = read_build(build)?;

    match notifier.preview(build)? {
        None => println!("skipped"),
        Some(payload) => println!("{}", format_payload(&payload, json)?),
    }
    Ok(())
}

pub(crate) fn format_payload(payload: &IssuePayload, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(payload)?)
    } else {
        Ok(format!("{}\n\n{}", payload.title, payload.body))
    }
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
