// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The apply engine (spec.md §4.4): drains a prepared item list through
//! a worker pool, honoring triggers and cascading skips.

use cvg_core::node::ItemRecord;
use cvg_core::{ApplyContext, ApplyResult, Clock, ItemId, Prompter, StatusCode, Transport};
use cvg_pool::{PoolEvent, WorkerPool};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("dependency cycle survived preparation: {}", format_ids(.0))]
pub struct StuckFrontier(pub Vec<ItemId>);

fn format_ids(ids: &[ItemId]) -> String {
    ids.iter().map(ItemId::as_str).collect::<Vec<_>>().join(", ")
}

/// Run one apply pass over `items` (already output of
/// [`cvg_resolver::prepare`]). `workers` is clamped to 1 when
/// `interactive` is set (spec.md §4.4, "Interactive mode").
pub async fn apply_node(
    node_id: &str,
    items: Vec<ItemRecord>,
    transport: Arc<dyn Transport>,
    clock: &dyn Clock,
    workers: usize,
    interactive: bool,
    prompter: Arc<dyn Prompter>,
) -> Result<ApplyResult, StuckFrontier> {
    let worker_count = if interactive { 1 } else { workers.max(1) };
    let mut result = ApplyResult::new(node_id, clock.epoch_ms());

    let (mut blocked, mut ready) = cvg_resolver::split_ready(items);
    let mut pool = WorkerPool::new(worker_count);
    let mut in_flight: HashMap<ItemId, ItemRecord> = HashMap::new();

    while pool.keep_running() {
        let Some(event) = pool.next_event().await else {
            break;
        };
        match event {
            PoolEvent::RequestWork { worker_id } => {
                if let Some(item) = ready.pop() {
                    let behavior = item.behavior.clone();
                    let ctx = ApplyContextOwned {
                        interactive,
                        triggered: item.triggered,
                        has_been_triggered: item.has_been_triggered,
                    };
                    let task_transport = transport.clone();
                    let task_prompter = prompter.clone();
                    let task_id = item.id.clone();
                    let task: cvg_pool::Task = Box::pin(async move {
                        behavior
                            .apply(
                                task_transport.as_ref(),
                                ApplyContext {
                                    interactive: ctx.interactive,
                                    triggered: ctx.triggered,
                                    has_been_triggered: ctx.has_been_triggered,
                                    prompter: task_prompter.as_ref(),
                                },
                            )
                            .await
                    });
                    in_flight.insert(item.id.clone(), item);
                    pool.start_task(&worker_id, task_id, task);
                } else if pool.jobs_open() > 0 {
                    pool.mark_idle(&worker_id);
                } else {
                    pool.quit(&worker_id);
                }
            }
            PoolEvent::FinishedWork {
                task_id, status, ..
            } => {
                let Some(item) = in_flight.remove(&task_id) else {
                    continue;
                };

                if status.is_failure_or_skip() && item.cascade_skip {
                    for removed in cascade_remove(&mut blocked, &task_id) {
                        if !removed.kind.is_dummy() {
                            result.record(removed.id, StatusCode::Skipped);
                        }
                    }
                } else {
                    cvg_resolver::remove_dep(&mut blocked, &task_id);
                    cvg_resolver::remove_dep(&mut ready, &task_id);
                }

                let arms = status.arms_triggers()
                    || (status.is_failure_or_skip() && !item.cascade_skip);
                if arms {
                    for triggered_id in &item.triggers {
                        for candidate in blocked.iter_mut().chain(ready.iter_mut()) {
                            if &candidate.id == triggered_id {
                                candidate.has_been_triggered = true;
                            }
                        }
                    }
                }

                if !item.kind.is_dummy() {
                    result.record(item.id, status);
                }

                let merged: Vec<ItemRecord> =
                    blocked.drain(..).chain(ready.drain(..)).collect();
                let (new_blocked, new_ready) = cvg_resolver::split_ready(merged);
                blocked = new_blocked;
                ready = new_ready;

                pool.activate_idle_workers();
            }
        }
    }

    if !blocked.is_empty() {
        return Err(StuckFrontier(blocked.into_iter().map(|i| i.id).collect()));
    }

    result.finish(clock.epoch_ms());
    Ok(result)
}

struct ApplyContextOwned {
    interactive: bool,
    triggered: bool,
    has_been_triggered: bool,
}

/// Transitively remove every item in `blocked` that (directly or
/// indirectly) depends on `failed_id`, returning the removed records in
/// no particular order (spec.md §4.4, "transitively remove every item
/// that depended on this one").
fn cascade_remove(blocked: &mut Vec<ItemRecord>, failed_id: &ItemId) -> Vec<ItemRecord> {
    let mut removed = Vec::new();
    let mut frontier = vec![failed_id.clone()];
    while let Some(id) = frontier.pop() {
        let mut i = 0;
        while i < blocked.len() {
            if blocked[i].all_deps().any(|dep| dep == &id) {
                let item = blocked.remove(i);
                frontier.push(item.id.clone());
                removed.push(item);
            } else {
                i += 1;
            }
        }
    }
    removed
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
