// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-item result lines, a direct port of `node.py`'s
//! `format_item_result` onto [`cvg_core::StatusCode`].

use crate::color::{bold, green, red, yellow};
use cvg_core::{ItemId, StatusCode};

pub fn format_item_result(status: StatusCode, item_id: &ItemId) -> String {
    match status {
        StatusCode::Failed | StatusCode::ActionFailed => {
            format!("  {} {} failed", red("\u{2718}"), bold(item_id.as_str()))
        }
        StatusCode::ActionOk => {
            format!("  {} {} succeeded", green("\u{2713}"), bold(item_id.as_str()))
        }
        StatusCode::Skipped | StatusCode::ActionSkipped => {
            format!("  {} {} skipped", yellow("\u{bb}"), bold(item_id.as_str()))
        }
        StatusCode::Fixed => {
            format!("  {} fixed {}", green("\u{2713}"), bold(item_id.as_str()))
        }
        StatusCode::Ok => String::new(),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
