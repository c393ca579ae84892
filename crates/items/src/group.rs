// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::remote::quote;
use async_trait::async_trait;
use cvg_core::{ConfigError, Item, ItemStatus, Transport, TransportError};

/// A POSIX group (spec.md §3, `group`).
pub struct Group {
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(ConfigError::InvalidAttributes {
                context: "group".into(),
                reason: format!("{name:?} is not a valid group name"),
            });
        }
        Ok(Self { name })
    }
}

#[async_trait]
impl Item for Group {
    async fn get_status(&self, transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        let entry = transport
            .run(&format!("getent group {}", quote(&self.name)), true, false, false)
            .await?;
        if entry.return_code == 0 {
            Ok(ItemStatus::correct())
        } else {
            Ok(ItemStatus::needs_fixing(serde_json::Value::Null))
        }
    }

    async fn fix(&self, transport: &dyn Transport, _status: &ItemStatus) -> Result<(), TransportError> {
        transport
            .run(&format!("groupadd {}", quote(&self.name)), false, true, false)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "group_tests.rs"]
mod tests;
