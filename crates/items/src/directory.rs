// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::remote::{parse_mode_owner_group, quote};
use async_trait::async_trait;
use cvg_core::{ConfigError, Item, ItemStatus, Transport, TransportError};
use serde_json::json;

/// A directory, created if missing (spec.md §3, `directory`).
#[derive(Debug)]
pub struct Directory {
    pub path: String,
    pub mode: String,
    pub owner: String,
    pub group: String,
}

impl Directory {
    pub fn new(
        path: impl Into<String>,
        mode: impl Into<String>,
        owner: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(ConfigError::InvalidAttributes {
                context: format!("directory:{path}"),
                reason: "path must be absolute".into(),
            });
        }
        Ok(Self {
            path,
            mode: mode.into(),
            owner: owner.into(),
            group: group.into(),
        })
    }
}

#[async_trait]
impl Item for Directory {
    async fn get_status(&self, transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        let test = transport
            .run(&format!("test -d {}", quote(&self.path)), true, false, false)
            .await?;
        if test.return_code != 0 {
            return Ok(ItemStatus::needs_fixing(json!({"exists": false})));
        }

        let stat = transport
            .run(
                &format!("stat -c '%a %U %G' {}", quote(&self.path)),
                true,
                false,
                false,
            )
            .await?;
        let attrs_ok = stat.return_code == 0
            && parse_mode_owner_group(&stat.stdout)
                == Some((self.mode.clone(), self.owner.clone(), self.group.clone()));

        if attrs_ok {
            Ok(ItemStatus::correct())
        } else {
            Ok(ItemStatus::needs_fixing(json!({"exists": true})))
        }
    }

    async fn fix(&self, transport: &dyn Transport, status: &ItemStatus) -> Result<(), TransportError> {
        let exists = status
            .info
            .get("exists")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false);
        if !exists {
            transport
                .run(&format!("mkdir -p {}", quote(&self.path)), false, true, false)
                .await?;
        }
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

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
