// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cvg_core::{ApplyContext, CommandResult, NonInteractive, StatusCode};
use cvg_transport::test_support::FakeTransport;

fn ctx<'a>(prompter: &'a dyn cvg_core::Prompter) -> ApplyContext<'a> {
    ApplyContext {
        interactive: false,
        triggered: false,
        has_been_triggered: false,
        prompter,
    }
}

#[tokio::test]
async fn creates_missing_group() {
    let group = Group::new("deploy").unwrap();
    let transport = FakeTransport::new();
    transport.on(
        "getent group 'deploy'",
        CommandResult { return_code: 2, ..Default::default() },
    );
    let status = group.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, StatusCode::Fixed);
}

#[tokio::test]
async fn existing_group_is_ok() {
    let group = Group::new("deploy").unwrap();
    let transport = FakeTransport::new();
    transport.on("getent group 'deploy'", CommandResult::ok("deploy:x:1000:\n"));
    let status = group.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, StatusCode::Ok);
}
