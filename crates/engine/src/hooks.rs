// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Observability hooks the engine calls around a run (spec.md §6,
//! "Hooks (emitted)"). Deliberately trivial — `tracing` is the default
//! implementation, but callers that need `node_apply_start`/
//! `node_apply_end` for something else (metrics, notifications) can
//! supply their own.

use cvg_core::ApplyResult;

pub trait Hooks: Send + Sync {
    fn node_apply_start(&self, node_id: &str) {
        let _ = node_id;
    }

    fn node_apply_end(&self, node_id: &str, duration_ms: u64, result: &ApplyResult) {
        let _ = (node_id, duration_ms, result);
    }
}

/// Logs both hook points through `tracing` and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingHooks;

impl Hooks for TracingHooks {
    fn node_apply_start(&self, node_id: &str) {
        tracing::info!(node = node_id, "apply started");
    }

    fn node_apply_end(&self, node_id: &str, duration_ms: u64, result: &ApplyResult) {
        tracing::info!(
            node = node_id,
            duration_ms,
            correct = result.correct(),
            fixed = result.fixed(),
            skipped = result.skipped(),
            failed = result.failed(),
            "apply finished"
        );
    }
}
