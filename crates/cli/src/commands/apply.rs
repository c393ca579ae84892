// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cvg apply` (spec.md §4.8, "added"): resolve a node and drive it
//! through the apply engine, printing one result line per item the way
//! `blockwart.Node.apply` does.

use super::shared::{hostname_for, load_node, transport_for};
use crate::color::bold;
use crate::error::ConvergeError;
use crate::output::format_item_result;
use crate::prompt::TerminalPrompter;
use cvg_core::SystemClock;
use std::path::Path;
use std::sync::Arc;

#[allow(clippy::too_many_arguments)]
pub async fn run(
    repo_root: &Path,
    node_name: &str,
    workers: usize,
    interactive: bool,
    force: bool,
) -> Result<(), ConvergeError> {
    let (repo, node) = load_node(repo_root, node_name)?;
    let items = cvg_resolver::prepare(node.items)?;

    let transport = transport_for(&repo, node_name);
    let hostname = hostname_for(&repo, node_name);
    let user = std::env::var("USER").unwrap_or_else(|_| "unknown".to_string());
    let clock = SystemClock;

    println!("{}", bold(&format!("apply: {node_name}")));

    let lock = cvg_engine::NodeLock::acquire(
        transport.as_ref(),
        &clock,
        cvg_engine::DEFAULT_LOCK_PATH,
        &user,
        &hostname,
        interactive,
        force,
        &TerminalPrompter,
    )
    .await?;

    let outcome = cvg_engine::apply_node(
        node_name,
        items,
        transport.clone(),
        &clock,
        workers,
        interactive,
        Arc::new(TerminalPrompter),
    )
    .await;

    lock.release().await;
    let result = outcome?;

    for (id, status) in result.outcomes() {
        let line = format_item_result(*status, id);
        if !line.is_empty() {
            println!("{line}");
        }
    }

    println!(
        "{}",
        bold(&format!(
            "{node_name}: {} correct, {} fixed, {} skipped, {} failed",
            result.correct(),
            result.fixed(),
            result.skipped(),
            result.failed(),
        ))
    );

    if result.failed() > 0 {
        return Err(ConvergeError::RunFailed(result.failed()));
    }
    Ok(())
}
