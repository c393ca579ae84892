// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Top-level argument parsing (spec.md §4.8, "added").

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cvg", about = "Push-based configuration management")]
pub struct Cli {
    /// Root directory containing the repo's `*.hcl` files.
    #[arg(long, global = true, default_value = ".")]
    pub repo: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Resolve a node and converge it toward its desired state.
    Apply {
        node: String,
        #[arg(long, default_value_t = 4)]
        workers: usize,
        /// Prompt before each repair; forces a single worker.
        #[arg(long)]
        interactive: bool,
        /// Override a stale or contended node lock.
        #[arg(long)]
        force: bool,
    },
    /// Probe a node's items without repairing anything.
    Verify { node: String },
    /// Dump the prepared dependency graph as Graphviz `dot`.
    Graph { node: String },
}
