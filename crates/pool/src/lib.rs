// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The worker pool (spec.md §4.3): an event broker between the apply
//! engine and a bounded set of cooperative workers.

use cvg_core::{ItemId, StatusCode, WorkerId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// An item's dispatched work function, already bound to its transport
/// and context — the pool only ever sees "a future that resolves to a
/// status code".
pub type Task = Pin<Box<dyn Future<Output = StatusCode> + Send>>;

/// One of the two event kinds the pool emits to the engine (spec.md
/// §4.3).
#[derive(Debug, Clone)]
pub enum PoolEvent {
    RequestWork { worker_id: WorkerId },
    FinishedWork {
        worker_id: WorkerId,
        task_id: ItemId,
        status: StatusCode,
    },
}

enum WorkerCommand {
    Run { task_id: ItemId, task: Task },
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Requesting,
    Running,
    Idle,
    Retired,
}

struct WorkerHandle {
    command_tx: mpsc::UnboundedSender<WorkerCommand>,
    state: WorkerState,
    join: JoinHandle<()>,
}

/// `W` cooperative workers plus the event channel the engine drains
/// (spec.md §4.3). Each worker runs as its own `tokio` task; the pool
/// itself holds no thread of its own.
pub struct WorkerPool {
    event_tx: mpsc::UnboundedSender<PoolEvent>,
    event_rx: mpsc::UnboundedReceiver<PoolEvent>,
    workers: HashMap<WorkerId, WorkerHandle>,
    jobs_open: usize,
}

impl WorkerPool {
    /// Spawn `count` workers (`count >= 1`), each immediately emitting a
    /// `RequestWork` event.
    pub fn new(count: usize) -> Self {
        assert!(count >= 1, "worker pool requires at least one worker");
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut workers = HashMap::with_capacity(count);
        for idx in 0..count {
            let id = WorkerId(format!("w{idx}"));
            let (command_tx, command_rx) = mpsc::unbounded_channel();
            let join = tokio::spawn(worker_loop(id.clone(), command_rx, event_tx.clone()));
            workers.insert(
                id,
                WorkerHandle {
                    command_tx,
                    state: WorkerState::Requesting,
                    join,
                },
            );
        }
        Self {
            event_tx,
            event_rx,
            workers,
            jobs_open: 0,
        }
    }

    pub fn alive_workers(&self) -> usize {
        self.workers
            .values()
            .filter(|w| w.state != WorkerState::Retired)
            .count()
    }

    pub fn jobs_open(&self) -> usize {
        self.jobs_open
    }

    /// Spec.md §4.3's `keep_running()`: true iff at least one worker is
    /// still alive.
    pub fn keep_running(&self) -> bool {
        self.alive_workers() > 0
    }

    /// Block until the next pool event. Returns `None` only once every
    /// worker has retired and the channel has drained.
    pub async fn next_event(&mut self) -> Option<PoolEvent> {
        let event = self.event_rx.recv().await?;
        if let PoolEvent::FinishedWork { .. } = &event {
            self.jobs_open = self.jobs_open.saturating_sub(1);
        }
        Some(event)
    }

    /// Dispatch `task` to `worker_id` (spec.md §4.3's `start_task`).
    pub fn start_task(&mut self, worker_id: &WorkerId, task_id: ItemId, task: Task) {
        if let Some(worker) = self.workers.get_mut(worker_id) {
            worker.state = WorkerState::Running;
            self.jobs_open += 1;
            let _ = worker.command_tx.send(WorkerCommand::Run { task_id, task });
        }
    }

    /// Park `worker_id`; it stops being reconsidered until
    /// [`Self::activate_idle_workers`] (spec.md §4.3's `mark_idle`).
    pub fn mark_idle(&mut self, worker_id: &WorkerId) {
        if let Some(worker) = self.workers.get_mut(worker_id) {
            worker.state = WorkerState::Idle;
        }
    }

    /// Re-emit a `RequestWork` for every parked worker (spec.md §4.3's
    /// `activate_idle_workers`).
    pub fn activate_idle_workers(&mut self) {
        for (id, worker) in self.workers.iter_mut() {
            if worker.state == WorkerState::Idle {
                worker.state = WorkerState::Requesting;
                let _ = self.event_tx.send(PoolEvent::RequestWork {
                    worker_id: id.clone(),
                });
            }
        }
    }

    /// Retire `worker_id` permanently (spec.md §4.3's `quit`).
    pub fn quit(&mut self, worker_id: &WorkerId) {
        if let Some(worker) = self.workers.get_mut(worker_id) {
            if worker.state != WorkerState::Retired {
                worker.state = WorkerState::Retired;
                let _ = worker.command_tx.send(WorkerCommand::Quit);
            }
        }
    }

    /// Retire every worker and wait for their tasks to exit. Used by the
    /// engine when aborting a run early (e.g. a lock error before any
    /// task was dispatched).
    pub async fn shutdown(&mut self) {
        let ids: Vec<WorkerId> = self.workers.keys().cloned().collect();
        for id in &ids {
            self.quit(id);
        }
        for worker in self.workers.values_mut() {
            let _ = (&mut worker.join).await;
        }
    }
}

async fn worker_loop(
    id: WorkerId,
    mut command_rx: mpsc::UnboundedReceiver<WorkerCommand>,
    event_tx: mpsc::UnboundedSender<PoolEvent>,
) {
    loop {
        if event_tx
            .send(PoolEvent::RequestWork {
                worker_id: id.clone(),
            })
            .is_err()
        {
            return;
        }
        match command_rx.recv().await {
            Some(WorkerCommand::Run { task_id, task }) => {
                let status = task.await;
                tracing::debug!(worker = %id, item = %task_id, %status, "task finished");
                if event_tx
                    .send(PoolEvent::FinishedWork {
                        worker_id: id.clone(),
                        task_id,
                        status,
                    })
                    .is_err()
                {
                    return;
                }
            }
            Some(WorkerCommand::Quit) | None => return,
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
