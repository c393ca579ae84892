// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use cvg_core::{ApplyContext, CommandResult, ItemId, NonInteractive, StatusCode};
use cvg_transport::test_support::FakeTransport;

fn ctx<'a>(prompter: &'a dyn cvg_core::Prompter) -> ApplyContext<'a> {
    ApplyContext {
        interactive: false,
        triggered: false,
        has_been_triggered: false,
        prompter,
    }
}

#[test]
fn depends_on_containing_directory() {
    let link = Symlink::new("/srv/current", "/srv/releases/v1", "root", "root").unwrap();
    let dir_id = ItemId::new("directory:/srv");
    let dir_kind = ItemKind::Directory;
    let peers = vec![ItemDescriptor {
        id: &dir_id,
        kind: &dir_kind,
        name: "/srv",
    }];
    let deps = link.auto_deps(&peers).unwrap();
    assert_eq!(deps, vec![ItemId::new("directory:/srv")]);
}

#[test]
fn unrelated_directory_is_not_a_dependency() {
    let link = Symlink::new("/srv/current", "/srv/releases/v1", "root", "root").unwrap();
    let dir_id = ItemId::new("directory:/opt");
    let dir_kind = ItemKind::Directory;
    let peers = vec![ItemDescriptor {
        id: &dir_id,
        kind: &dir_kind,
        name: "/opt",
    }];
    assert!(link.auto_deps(&peers).unwrap().is_empty());
}

#[test]
fn conflicting_file_at_same_path_is_an_error() {
    let link = Symlink::new("/etc/hosts", "/etc/hosts.real", "root", "root").unwrap();
    let file_id = ItemId::new("file:/etc/hosts");
    let file_kind = ItemKind::File;
    let peers = vec![ItemDescriptor {
        id: &file_id,
        kind: &file_kind,
        name: "/etc/hosts",
    }];
    assert!(link.auto_deps(&peers).is_err());
}

#[tokio::test]
async fn fixes_wrong_target() {
    let link = Symlink::new("/srv/current", "/srv/releases/v2", "root", "root").unwrap();
    let transport = FakeTransport::new();
    transport.on(
        "readlink '/srv/current'",
        CommandResult::ok("/srv/releases/v1"),
    );
    transport.on(
        "stat -c '%U %G' '/srv/current'",
        CommandResult::ok("root root\n"),
    );

    let status = link.apply(&transport, ctx(&NonInteractive)).await;
    assert_eq!(status, StatusCode::Fixed);
}
