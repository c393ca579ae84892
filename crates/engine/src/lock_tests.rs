// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cvg_core::{CommandResult, FakeClock, NonInteractive};
use cvg_transport::test_support::FakeTransport;

#[tokio::test]
async fn acquires_a_free_lock_and_writes_info() {
    let transport = FakeTransport::new();
    let clock = FakeClock::new();

    let lock = NodeLock::acquire(
        &transport,
        &clock,
        DEFAULT_LOCK_PATH,
        "alice",
        "build01",
        false,
        false,
        &NonInteractive,
    )
    .await
    .expect("lock should be free");

    lock.release().await;

    assert!(transport
        .calls()
        .iter()
        .any(|c| matches!(c, cvg_transport::test_support::Recorded::Run(cmd) if cmd.starts_with("rm -R"))));
}

#[tokio::test]
async fn contended_lock_without_force_fails() {
    let transport = FakeTransport::new();
    transport.on(
        &format!("mkdir '{}'", DEFAULT_LOCK_PATH),
        CommandResult { return_code: 1, ..Default::default() },
    );
    transport.on(
        &format!("cat '{}/info'", DEFAULT_LOCK_PATH),
        CommandResult::ok(r#"{"user":"bob","date":1.0,"host":"other-host"}"#),
    );
    let clock = FakeClock::new();

    let err = NodeLock::acquire(
        &transport,
        &clock,
        DEFAULT_LOCK_PATH,
        "alice",
        "build01",
        false,
        false,
        &NonInteractive,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, LockError::AlreadyLocked(_)));
}

#[tokio::test]
async fn contended_lock_with_force_overrides() {
    let transport = FakeTransport::new();
    transport.on(
        &format!("mkdir '{}'", DEFAULT_LOCK_PATH),
        CommandResult { return_code: 1, ..Default::default() },
    );
    transport.on(
        &format!("cat '{}/info'", DEFAULT_LOCK_PATH),
        CommandResult::ok(r#"{"user":"bob","date":1.0,"host":"other-host"}"#),
    );
    let clock = FakeClock::new();

    let lock = NodeLock::acquire(
        &transport,
        &clock,
        DEFAULT_LOCK_PATH,
        "alice",
        "build01",
        false,
        true,
        &NonInteractive,
    )
    .await
    .expect("force should override a stale lock");

    lock.release().await;
}
