// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types surfaced by repo loading, dependency resolution, and node
//! locking (spec.md §7, "Errors").

use crate::item::ItemId;
use thiserror::Error;

/// A bundle or item definition is malformed (spec.md §7: "An item
/// definition referencing an unknown `needs` prefix with no matching
/// peers must error at preparation time, not at dispatch time").
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("item {0} declares a dependency on itself")]
    SelfDependency(ItemId),

    #[error("item {id} has no peer whose id or type matches needs entry {needs:?}")]
    UnresolvedNeeds { id: ItemId, needs: String },

    #[error("item {0} is not a valid identifier (expected \"<type>:<name>\")")]
    InvalidItemId(String),

    #[error("{context}: {reason}")]
    InvalidAttributes { context: String, reason: String },

    #[error("duplicate item id {0} declared in more than one bundle")]
    DuplicateItemId(ItemId),
}

/// The dependency graph built from a node's items cannot be scheduled
/// (spec.md §7: "A dependency cycle ... must be detected during
/// preparation and reported, never deadlocked on at dispatch time").
#[derive(Debug, Error)]
pub enum DependencyError {
    #[error("dependency cycle detected: {}", format_cycle(.0))]
    Cycle(Vec<ItemId>),

    #[error("item {dependent} depends on {dependency}, which does not exist on this node")]
    MissingDependency {
        dependent: ItemId,
        dependency: ItemId,
    },
}

fn format_cycle(ids: &[ItemId]) -> String {
    ids.iter()
        .map(ItemId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Metadata recorded in the lock's info file (spec.md §6, "Lock file
/// format": `{"date": <epoch seconds, float>, "user": <string>, "host":
/// <string>}` — unknown fields are tolerated on read).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LockInfo {
    pub date: f64,
    pub user: String,
    pub host: String,
}

/// Another run already holds the node lock (spec.md §4.5).
#[derive(Debug, Error)]
#[error("node is already locked by {user}@{host} since {date}")]
pub struct NodeAlreadyLocked {
    pub date: f64,
    pub user: String,
    pub host: String,
}

impl NodeAlreadyLocked {
    pub fn from_info(info: &LockInfo) -> Self {
        Self {
            date: info.date,
            user: info.user.clone(),
            host: info.host.clone(),
        }
    }
}
