// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::item::Item;

struct Dummy;
impl Item for Dummy {}

#[yare::parameterized(
    plain = { "hosts", true },
    path_like = { "etc/hosts", true },
    dotted = { "nginx.conf", true },
    empty = { "", false },
    spaced = { "my file", false },
    colon = { "file:name", false },
)]
fn validate_name_matches_bundlewrap_naming_convention(name: &str, expected: bool) {
    assert_eq!(validate_name(name), expected);
}

#[test]
fn item_record_derives_name_from_id_suffix() {
    let record = ItemRecord::new("file:/etc/hosts", ItemKind::File, Arc::new(Dummy));
    assert_eq!(record.name, "/etc/hosts");
    assert!(record.cascade_skip);
    assert!(!record.triggered);
}

#[test]
fn node_looks_up_items_by_id() {
    let mut node = Node::new("web1");
    node.items
        .push(ItemRecord::new("dummy:marker", ItemKind::Dummy, Arc::new(Dummy)));
    assert!(node.item("dummy:marker").is_some());
    assert!(node.item("dummy:missing").is_none());
}
