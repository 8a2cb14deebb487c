// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Log output format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "ghissue")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "File GitHub issues for finished CI builds")]
#[command(
    long_about = "File GitHub issues for finished CI builds.\n\n\
    Reads a notifier configuration and a build event, and files an issue in the \
    configured repository when the build matches the filter."
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a notifier configuration
    Check {
        /// Notifier configuration file (yaml, json or toml)
        #[arg(short, long, value_name = "path")]
        config: PathBuf,
    },

    /// Render the issue for a build without contacting GitHub
    Render {
        /// Notifier configuration file (yaml, json or toml)
        #[arg(short, long, value_name = "path")]
        config: PathBuf,

        /// Build event JSON, or '-' for stdin
        #[arg(short, long, value_name = "path")]
        build: PathBuf,

        /// Print the payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the full pipeline for one build event
    Notify {
        /// Notifier configuration file (yaml, json or toml)
        #[arg(short, long, value_name = "path")]
        config: PathBuf,

        /// Build event JSON, or '-' for stdin
        #[arg(short, long, value_name = "path")]
        build: PathBuf,
    },
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
