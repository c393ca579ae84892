// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cvg verify` (spec.md §4.8, "added"): a probe-only pass, mirroring
//! `blockwart.Node.verify` — call `get_status` and report drift without
//! repairing it.
//!
//! Actions have no persisted state to probe (spec.md §4.1, "Actions
//! override" — they run a command and judge its result, they do not
//! converge toward a desired state), so they report `up to date`
//! unconditionally here rather than running their command or `unless`
//! check as a side effect of a read-only command.

use super::shared::{load_node, transport_for};
use crate::color::{bold, green, red, yellow};
use crate::error::ConvergeError;
use std::path::Path;

pub async fn run(repo_root: &Path, node_name: &str) -> Result<(), ConvergeError> {
    let (repo, node) = load_node(repo_root, node_name)?;
    let items = cvg_resolver::prepare(node.items)?;
    let transport = transport_for(&repo, node_name);

    println!("{}", bold(&format!("verify: {node_name}")));

    let mut drifted = 0usize;
    let mut failed = 0usize;

    for item in &items {
        if item.kind.is_dummy() {
            continue;
        }
        match item.behavior.get_status(transport.as_ref()).await {
            Ok(status) if status.correct => {
                println!("  {} {}", green("\u{2713}"), item.id.as_str());
            }
            Ok(_) => {
                drifted += 1;
                println!("  {} {} out of date", yellow("\u{bb}"), bold(item.id.as_str()));
            }
            Err(error) => {
                failed += 1;
                println!("  {} {} probe failed: {error}", red("\u{2718}"), bold(item.id.as_str()));
            }
        }
    }

    println!(
        "{}",
        bold(&format!("{node_name}: {drifted} out of date, {failed} probe failure(s)"))
    );

    if failed > 0 {
        return Err(ConvergeError::RunFailed(failed));
    }
    Ok(())
}
