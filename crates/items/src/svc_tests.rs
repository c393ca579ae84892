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
async fn starts_a_stopped_service() {
    let svc = SvcSystemd::new("nginx", true, true);
    let transport = FakeTransport::new();
    transport.on("systemctl is-active 'nginx'", CommandResult::ok("inactive\n"));
    transport.on("systemctl is-enabled 'nginx'", CommandResult::ok("enabled\n"));

    let status = svc.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, StatusCode::Fixed);
    assert!(transport
        .calls()
        .iter()
        .any(|c| matches!(c, cvg_transport::test_support::Recorded::Run(cmd) if cmd.contains("systemctl start"))));
}

#[tokio::test]
async fn already_running_and_enabled_is_ok() {
    let svc = SvcSystemd::new("nginx", true, true);
    let transport = FakeTransport::new();
    transport.on("systemctl is-active 'nginx'", CommandResult::ok("active\n"));
    transport.on("systemctl is-enabled 'nginx'", CommandResult::ok("enabled\n"));

    let status = svc.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, StatusCode::Ok);
}
