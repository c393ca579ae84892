// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::remote::quote;
use async_trait::async_trait;
use cvg_core::{ConfigError, Item, ItemStatus, Transport, TransportError};
use serde_json::json;

/// A POSIX user account (spec.md §3, `user`).
pub struct User {
    pub name: String,
    pub shell: String,
    pub home: String,
}

impl User {
    pub fn new(
        name: impl Into<String>,
        shell: impl Into<String>,
        home: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(ConfigError::InvalidAttributes {
                context: "user".into(),
                reason: format!("{name:?} is not a valid username"),
            });
        }
        Ok(Self {
            name,
            shell: shell.into(),
            home: home.into(),
        })
    }
}

#[async_trait]
impl Item for User {
    async fn get_status(&self, transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        let entry = transport
            .run(&format!("getent passwd {}", quote(&self.name)), true, false, false)
            .await?;
        if entry.return_code != 0 {
            return Ok(ItemStatus::needs_fixing(json!({"exists": false})));
        }
        let fields: Vec<&str> = entry.stdout.trim().split(':').collect();
        let home_ok = fields.get(5) == Some(&self.home.as_str());
        let shell_ok = fields.get(6) == Some(&self.shell.as_str());
        if home_ok && shell_ok {
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
        let command = if exists {
            format!(
                "usermod -d {} -s {} {}",
                quote(&self.home),
                quote(&self.shell),
                quote(&self.name)
            )
        } else {
            format!(
                "useradd -d {} -s {} -m {}",
                quote(&self.home),
                quote(&self.shell),
                quote(&self.name)
            )
        };
        transport.run(&command, false, true, false).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "user_tests.rs"]
mod tests;
