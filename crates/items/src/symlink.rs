// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::remote::quote;
use async_trait::async_trait;
use cvg_core::{ConfigError, Item, ItemDescriptor, ItemKind, ItemStatus, Transport, TransportError};
use serde_json::json;

/// A symbolic link at `path` pointing at `target` (spec.md §3,
/// `symlink`).
pub struct Symlink {
    pub path: String,
    pub target: String,
    pub owner: String,
    pub group: String,
}

impl Symlink {
    pub fn new(
        path: impl Into<String>,
        target: impl Into<String>,
        owner: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidAttributes {
                context: format!("symlink:{path}"),
                reason: "path must be absolute".into(),
            });
        }
        Ok(Self {
            path,
            target: target.into(),
            owner: owner.into(),
            group: group.into(),
        })
    }

    fn is_parent_of(parent: &str, path: &str) -> bool {
        path != parent && path.starts_with(parent.trim_end_matches('/')) && {
            let rest = &path[parent.trim_end_matches('/').len()..];
            rest.starts_with('/')
        }
    }
}

#[async_trait]
impl Item for Symlink {
    /// Depend on every `directory` item that contains this link's path
    /// (blocking-path detection), and reject a `file` declared at the
    /// same path as this link — a peer can't be both (spec.md §4.1,
    /// `get_auto_deps`).
    fn auto_deps(&self, peers: &[ItemDescriptor<'_>]) -> Result<Vec<cvg_core::ItemId>, ConfigError> {
        let mut deps = Vec::new();
        for peer in peers {
            if peer.name == self.path && matches!(peer.kind, ItemKind::File) {
                return Err(ConfigError::InvalidAttributes {
                    context: format!("symlink:{}", self.path),
                    reason: format!("a file is also declared at {}", self.path),
                });
            }
            if matches!(peer.kind, ItemKind::Directory) && Self::is_parent_of(peer.name, &self.path) {
                deps.push(peer.id.clone());
            }
        }
        Ok(deps)
    }

    async fn get_status(&self, transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        let readlink = transport
            .run(&format!("readlink {}", quote(&self.path)), true, false, false)
            .await?;
        let stat = transport
            .run(
                &format!("stat -c '%U %G' {}", quote(&self.path)),
                true,
                false,
                false,
            )
            .await?;

        let target_ok = readlink.return_code == 0 && readlink.stdout.trim() == self.target;
        let owner_group_ok = stat.return_code == 0 && {
            let mut parts = stat.stdout.split_whitespace();
            parts.next() == Some(self.owner.as_str()) && parts.next() == Some(self.group.as_str())
        };

        if target_ok && owner_group_ok {
            Ok(ItemStatus::correct())
        } else {
            Ok(ItemStatus::needs_fixing(json!({"target_ok": target_ok})))
        }
    }

    async fn fix(&self, transport: &dyn Transport, _status: &ItemStatus) -> Result<(), TransportError> {
        transport
            .run(
                &format!("ln -sfn {} {}", quote(&self.target), quote(&self.path)),
                false,
                true,
                false,
            )
            .await?;
        transport
            .run(
                &format!(
                    "chown -h {}:{} {}",
                    self.owner,
                    self.group,
                    quote(&self.path)
                ),
                false,
                true,
                false,
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "symlink_tests.rs"]
mod tests;
