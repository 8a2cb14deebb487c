// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use ghi_core::NotificationOutcome;

use super::{load_notifier, read_build};
use crate::error::Result;

pub async fn run(config: &Path, build: &Path) -> Result<()> {
    let notifier = load_notifier(config).await?;
    let build = read_build(build)?;
    let build_id = build.id.clone();

    let outcome = notifier.send_notification(build).await?;
    match &outcome {
        NotificationOutcome::Skipped => {
            tracing::info!("build {}: filter did not match, nothing sent", build_id)
        }
        NotificationOutcome::Created { number, .. } | NotificationOutcome::Updated { number, .. } => {
            tracing::info!("build {}: delivered to {}#{}", build_id, notifier.repo(), number)
        }
    }
    println!("{outcome}");
    Ok(())
}
