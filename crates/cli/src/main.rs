// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use clap::Parser;
use ghissue::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = ghissue::logging::init(cli.verbose, cli.log_format) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = ghissue::run(cli.command).await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
