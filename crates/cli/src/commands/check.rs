// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use ghi_core::{DispatchMode, Notifier};

use super::load_notifier;
use crate::error::Result;

pub async fn run(config: &Path) -> Result<()> {
    let notifier = load_notifier(config).await?;
    print!("{}", summary(&notifier));
    Ok(())
}

pub(crate) fn summary(notifier: &Notifier) -> String {
    let mode = match notifier.mode() {
        DispatchMode::Create => "create",
        DispatchMode::ReuseOpenIssue => "reuse-open-issue",
    };
    format!(
        "ok: {}\nrepository: {}\nfilter: {}\ndelivery: {}\n",
        notifier.name(),
        notifier.repo(),
        notifier.filter().source(),
        mode
    )
}
