// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The item status lifecycle (spec.md §3, "Status lifecycle").

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One of the seven terminal codes an item or action can report.
///
/// There are no intermediate states visible to the engine: a dispatched
/// item's work function runs to completion and returns exactly one of
/// these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    /// Stateful item was already correct.
    Ok,
    /// Stateful item was wrong and has been repaired.
    Fixed,
    /// Stateful item's repair failed.
    Failed,
    /// Stateful item was not attempted (interactive decline or cascade skip).
    Skipped,
    /// Action ran and matched its expectations.
    ActionOk,
    /// Action ran but did not match its expectations, or its command failed.
    ActionFailed,
    /// Action was not attempted (gate, `unless`, interactive decline, or
    /// cascade skip).
    ActionSkipped,
}

impl StatusCode {
    /// True for `Failed` / `Skipped` / `ActionFailed` / `ActionSkipped` —
    /// the codes that, combined with `cascade_skip`, remove dependents
    /// from the frontier (spec.md §4.4).
    pub fn is_failure_or_skip(self) -> bool {
        matches!(
            self,
            StatusCode::Failed
                | StatusCode::Skipped
                | StatusCode::ActionFailed
                | StatusCode::ActionSkipped
        )
    }

    /// True for the codes that count as "this item changed something",
    /// i.e. the ones that arm an item's triggers (spec.md §4.4).
    pub fn arms_triggers(self) -> bool {
        matches!(self, StatusCode::Fixed | StatusCode::ActionOk)
    }

    /// True for a successful no-op result (`Ok`), used by the aggregator.
    pub fn is_correct(self) -> bool {
        matches!(self, StatusCode::Ok | StatusCode::ActionOk)
    }
}

crate::simple_display! {
    StatusCode {
        Ok => "OK",
        Fixed => "FIXED",
        Failed => "FAILED",
        Skipped => "SKIPPED",
        ActionOk => "ACTION_OK",
        ActionFailed => "ACTION_FAILED",
        ActionSkipped => "ACTION_SKIPPED",
    }
}

/// Result of probing an item's current state (`Item::get_status`).
///
/// `info` is a type-specific payload describing precisely which
/// sub-attributes need fixing; it is opaque to the engine and only
/// interpreted by the item's own `fix`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStatus {
    pub correct: bool,
    #[serde(default)]
    pub info: Value,
}

impl ItemStatus {
    pub fn correct() -> Self {
        Self {
            correct: true,
            info: Value::Null,
        }
    }

    pub fn needs_fixing(info: Value) -> Self {
        Self {
            correct: false,
            info,
        }
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
