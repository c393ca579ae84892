// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::remote::{parse_mode_owner_group, quote};
use async_trait::async_trait;
use cvg_core::{ConfigError, Item, ItemStatus, Transport, TransportError};
use serde_json::{json, Value};
use std::path::PathBuf;

/// A regular file whose content is rendered from a local `source` path
/// and pushed to `path` on the remote host (spec.md §3, `file`).
#[derive(Debug)]
pub struct File {
    pub path: String,
    pub source: PathBuf,
    pub mode: String,
    pub owner: String,
    pub group: String,
}

impl File {
    pub fn new(
        path: impl Into<String>,
        source: impl Into<PathBuf>,
        mode: impl Into<String>,
        owner: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        let mode = mode.into();
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidAttributes {
                context: format!("file:{path}"),
                reason: "path must be absolute".into(),
            });
        }
        if !(mode.len() == 3 || mode.len() == 4) || !mode.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::InvalidAttributes {
                context: format!("file:{path}"),
                reason: format!("mode {mode:?} is not an octal permission string"),
            });
        }
        Ok(Self {
            path,
            source: source.into(),
            mode,
            owner: owner.into(),
            group: group.into(),
        })
    }
}

#[async_trait]
impl Item for File {
    async fn get_status(&self, transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        let wanted = tokio::fs::read(&self.source)
            .await
            .map_err(|e| TransportError::Exec(format!("reading source {:?}: {e}", self.source)))?;

        let cat = transport
            .run(&format!("cat {}", quote(&self.path)), true, false, false)
            .await?;
        let stat = transport
            .run(
                &format!("stat -c '%a %U %G' {}", quote(&self.path)),
                true,
                false,
                false,
            )
            .await?;

        let content_ok = cat.return_code == 0 && cat.stdout.as_bytes() == wanted.as_slice();
        let attrs_ok = stat.return_code == 0
            && parse_mode_owner_group(&stat.stdout)
                == Some((self.mode.clone(), self.owner.clone(), self.group.clone()));

        if content_ok && attrs_ok {
            Ok(ItemStatus::correct())
        } else {
            Ok(ItemStatus::needs_fixing(json!({
                "content_ok": content_ok,
                "attrs_ok": attrs_ok,
            })))
        }
    }

    async fn fix(&self, transport: &dyn Transport, status: &ItemStatus) -> Result<(), TransportError> {
        let content_ok = status
            .info
            .get("content_ok")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !content_ok {
            transport
                .upload(
                    &self.source,
                    &self.path,
                    Some(&self.mode),
                    Some(&self.owner),
                    Some(&self.group),
                )
                .await
        } else {
            transport
                .run(
                    &format!("chmod {} {}", self.mode, quote(&self.path)),
                    false,
                    true,
                    false,
                )
                .await?;
            transport
                .run(
                    &format!("chown {}:{} {}", self.owner, self.group, quote(&self.path)),
                    false,
                    true,
                    false,
                )
                .await?;
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "file_tests.rs"]
mod tests;
