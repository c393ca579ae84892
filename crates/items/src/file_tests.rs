// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cvg_core::NonInteractive;
use cvg_transport::test_support::FakeTransport;

fn ctx(prompter: &dyn cvg_core::Prompter) -> cvg_core::ApplyContext<'_> {
    cvg_core::ApplyContext {
        interactive: false,
        triggered: false,
        has_been_triggered: false,
        prompter,
    }
}

#[tokio::test]
async fn rejects_relative_paths() {
    let err = File::new("etc/hosts", "/dev/null", "644", "root", "root").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAttributes { .. }));
}

#[tokio::test]
async fn rejects_non_octal_mode() {
    let err = File::new("/etc/hosts", "/dev/null", "rwx", "root", "root").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidAttributes { .. }));
}

#[tokio::test]
async fn reports_ok_when_remote_already_matches() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("hosts");
    tokio::fs::write(&source, b"127.0.0.1 localhost\n").await.unwrap();

    let item = File::new("/etc/hosts", &source, "644", "root", "root").unwrap();
    let transport = FakeTransport::new();
    transport.on(
        "cat '/etc/hosts'",
        cvg_core::CommandResult::ok("127.0.0.1 localhost\n"),
    );
    transport.on(
        "stat -c '%a %U %G' '/etc/hosts'",
        cvg_core::CommandResult::ok("644 root root\n"),
    );

    let status = item.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, cvg_core::StatusCode::Ok);
}

#[tokio::test]
async fn uploads_when_content_is_wrong() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("hosts");
    tokio::fs::write(&source, b"new content").await.unwrap();

    let item = File::new("/etc/hosts", &source, "644", "root", "root").unwrap();
    let transport = FakeTransport::new();
    transport.on(
        "cat '/etc/hosts'",
        cvg_core::CommandResult::ok("old content"),
    );
    transport.on(
        "stat -c '%a %U %G' '/etc/hosts'",
        cvg_core::CommandResult::ok("644 root root\n"),
    );

    let status = item.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, cvg_core::StatusCode::Fixed);
    assert!(transport
        .calls()
        .iter()
        .any(|call| matches!(call, cvg_transport::test_support::Recorded::Upload { .. })));
}
