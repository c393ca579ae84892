// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The apply engine, node lock, and result aggregator (spec.md §4.4–§4.6):
//! drives a prepared item list through a worker pool to a final
//! [`cvg_core::ApplyResult`], guarded by an advisory lock on the target
//! host.

mod engine;
mod hooks;
mod lock;

pub use engine::{apply_node, StuckFrontier};
pub use hooks::{Hooks, TracingHooks};
pub use lock::{LockError, NodeLock, DEFAULT_LOCK_PATH};

use cvg_core::node::ItemRecord;
use cvg_core::{ApplyResult, Clock, Prompter, Transport};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Lock(#[from] LockError),
    #[error(transparent)]
    StuckFrontier(#[from] StuckFrontier),
}

/// The full per-node run: acquire the lock, drive the engine, release
/// the lock on every exit path, call the observability hooks around it
/// (spec.md §4.5, `Node.apply`'s wrapping of `apply_items` in `NodeLock`).
///
/// Lock contention without `force` is not an [`EngineError`] — it
/// matches spec.md §7's "the *run* for that node aborts cleanly with an
/// empty result list": an empty, non-`good` result is returned instead.
#[allow(clippy::too_many_arguments)]
pub async fn apply(
    node_id: &str,
    items: Vec<ItemRecord>,
    transport: Arc<dyn Transport>,
    clock: &dyn Clock,
    workers: usize,
    interactive: bool,
    force: bool,
    prompter: Arc<dyn Prompter>,
    user: &str,
    host: &str,
    hooks: &dyn Hooks,
) -> Result<ApplyResult, EngineError> {
    hooks.node_apply_start(node_id);
    let start = clock.epoch_ms();

    let lock = match lock::NodeLock::acquire(
        transport.as_ref(),
        clock,
        DEFAULT_LOCK_PATH,
        user,
        host,
        interactive,
        force,
        prompter.as_ref(),
    )
    .await
    {
        Ok(lock) => lock,
        Err(LockError::AlreadyLocked(already)) => {
            tracing::error!(node = node_id, %already, "node already locked");
            let mut result = ApplyResult::new(node_id, start);
            result.finish(clock.epoch_ms());
            hooks.node_apply_end(node_id, result.duration_ms(), &result);
            return Ok(result);
        }
        Err(other) => return Err(other.into()),
    };

    let outcome = engine::apply_node(
        node_id,
        items,
        transport.clone(),
        clock,
        workers,
        interactive,
        prompter,
    )
    .await;

    lock.release().await;

    let result = outcome?;
    hooks.node_apply_end(node_id, result.duration_ms(), &result);
    Ok(result)
}
