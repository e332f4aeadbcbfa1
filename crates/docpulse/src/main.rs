// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! docpulse: Markdown change history for a git repository
//!
//! Lists recent commits that touched documentation files and the doc
//! activity of each local branch relative to a base branch.

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use docpulse::commands;
use docpulse::config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = Config::parse();

    // Logs go to stderr so command output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&config).await {
        eprintln!("docpulse: {err:#}");
        std::process::exit(1);
    }
}

async fn run(config: &Config) -> anyhow::Result<()> {
    debug!(?config, "Starting docpulse");

    let output = commands::run(config).await?;
    commands::write_output(std::io::stdout().lock(), &output)
        .context("Failed to write output")?;
    Ok(())
}
