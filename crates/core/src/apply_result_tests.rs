// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn counts_partition_every_outcome_exactly_once() {
    let mut result = ApplyResult::new("node1", 0);
    result.record(ItemId::new("file:a"), StatusCode::Ok);
    result.record(ItemId::new("file:b"), StatusCode::Fixed);
    result.record(ItemId::new("action:c"), StatusCode::ActionFailed);
    result.record(ItemId::new("symlink:d"), StatusCode::Skipped);
    result.finish(500);

    assert_eq!(result.total(), 4);
    assert_eq!(
        result.correct() + result.fixed() + result.failed() + result.skipped(),
        result.total()
    );
    assert_eq!(result.duration_ms(), 500);
}

#[test]
fn good_is_false_whenever_anything_failed() {
    let mut result = ApplyResult::new("node1", 0);
    result.record(ItemId::new("file:a"), StatusCode::Fixed);
    result.record(ItemId::new("action:b"), StatusCode::ActionFailed);
    assert!(!result.good());
}

#[test]
fn good_is_true_when_only_skips_and_successes_occur() {
    let mut result = ApplyResult::new("node1", 0);
    result.record(ItemId::new("file:a"), StatusCode::Ok);
    result.record(ItemId::new("action:b"), StatusCode::ActionSkipped);
    assert!(result.good());
}
