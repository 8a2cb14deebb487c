// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! ghissue - file GitHub issues for finished CI builds.
//!
//! The notifier itself lives in `ghi-core`; this crate wires it to a
//! command line:
//!
//! - `check` validates a configuration
//! - `render` previews the issue a build would produce
//! - `notify` runs the full pipeline, including the GitHub calls

mod cli;
mod commands;
pub mod error;
pub mod logging;

pub use cli::{Cli, Command, LogFormat};
pub use error::{Error, Result};

/// Run one command to completion.
pub async fn run(command: Command) -> Result<()> {
    match command {
        Command::Check { config } => commands::check::run(&config).await,
        Command::Render {
            config,
            build,
            json,
        } => commands::render::run(&config, &build, json).await,
        Command::Notify { config, build } => commands::notify::run(&config, &build).await,
    }
}
