// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn ok_produces_no_line() {
    assert_eq!(format_item_result(StatusCode::Ok, &ItemId::new("file:a")), "");
}

#[test]
fn fixed_mentions_fixed() {
    let line = format_item_result(StatusCode::Fixed, &ItemId::new("file:a"));
    assert!(line.contains("fixed"));
    assert!(line.contains("file:a"));
}

#[test]
fn failed_mentions_failed() {
    let line = format_item_result(StatusCode::Failed, &ItemId::new("file:a"));
    assert!(line.contains("failed"));
}

#[test]
fn action_ok_mentions_succeeded() {
    let line = format_item_result(StatusCode::ActionOk, &ItemId::new("action:a"));
    assert!(line.contains("succeeded"));
}

#[test]
fn skipped_mentions_skipped() {
    let line = format_item_result(StatusCode::Skipped, &ItemId::new("file:a"));
    assert!(line.contains("skipped"));
}
