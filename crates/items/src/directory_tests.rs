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
async fn creates_missing_directory() {
    let dir = Directory::new("/srv/app", "755", "root", "root").unwrap();
    let transport = FakeTransport::new();
    transport.on("test -d '/srv/app'", CommandResult { return_code: 1, ..Default::default() });

    let status = dir.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, StatusCode::Fixed);
    assert!(transport
        .calls()
        .iter()
        .any(|c| matches!(c, cvg_transport::test_support::Recorded::Run(cmd) if cmd.starts_with("mkdir"))));
}

#[tokio::test]
async fn already_correct_directory_is_ok() {
    let dir = Directory::new("/srv/app", "755", "root", "root").unwrap();
    let transport = FakeTransport::new();
    transport.on("test -d '/srv/app'", CommandResult::ok(""));
    transport.on("stat -c '%a %U %G' '/srv/app'", CommandResult::ok("755 root root\n"));

    let status = dir.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, StatusCode::Ok);
}

#[test]
fn rejects_relative_paths() {
    let err = Directory::new("srv/app", "755", "root", "root").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAttributes { .. }));
}
