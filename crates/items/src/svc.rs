// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::remote::quote;
use async_trait::async_trait;
use cvg_core::{Item, ItemStatus, Transport, TransportError};
use serde_json::json;

/// `svc_systemd`: a systemd unit's running/enabled state (spec.md §3,
/// `svc_*`).
pub struct SvcSystemd {
    pub name: String,
    pub running: bool,
    pub enabled: bool,
}

impl SvcSystemd {
    pub fn new(name: impl Into<String>, running: bool, enabled: bool) -> Self {
        Self {
            name: name.into(),
            running,
            enabled,
        }
    }
}

#[async_trait]
impl Item for SvcSystemd {
    async fn get_status(&self, transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        let active = transport
            .run(&format!("systemctl is-active {}", quote(&self.name)), true, false, false)
            .await?;
        let enabled = transport
            .run(&format!("systemctl is-enabled {}", quote(&self.name)), true, false, false)
            .await?;

        let is_running = active.stdout.trim() == "active";
        let is_enabled = enabled.stdout.trim() == "enabled";

        if is_running == self.running && is_enabled == self.enabled {
            Ok(ItemStatus::correct())
        } else {
            Ok(ItemStatus::needs_fixing(json!({
                "is_running": is_running,
                "is_enabled": is_enabled,
            })))
        }
    }

    async fn fix(&self, transport: &dyn Transport, status: &ItemStatus) -> Result<(), TransportError> {
        let is_running = status
            .info
            .get("is_running")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(!self.running);
        let is_enabled = status
            .info
            .get("is_enabled")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(!self.enabled);

        if is_running != self.running {
            let verb = if self.running { "start" } else { "stop" };
            transport
                .run(&format!("systemctl {verb} {}", quote(&self.name)), false, true, false)
                .await?;
        }
        if is_enabled != self.enabled {
            let verb = if self.enabled { "enable" } else { "disable" };
            transport
                .run(&format!("systemctl {verb} {}", quote(&self.name)), false, true, false)
                .await?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "svc_tests.rs"]
mod tests;
