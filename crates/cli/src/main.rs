// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

mod cli;
mod color;
mod commands;
mod error;
mod output;
mod prompt;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Apply { node, workers, interactive, force } => {
            commands::apply::run(&cli.repo, &node, workers, interactive, force).await
        }
        Command::Verify { node } => commands::verify::run(&cli.repo, &node).await,
        Command::Graph { node } => commands::graph::run(&cli.repo, &node),
    };

    if let Err(error) = outcome {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
}
