// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::remote::quote;
use async_trait::async_trait;
use cvg_core::{Item, ItemStatus, Transport, TransportError};

/// `pkg_apt`: a system package managed through `dpkg`/`apt-get`
/// (spec.md §3, `pkg_*`). Other backends (`pkg_pacman`, `pkg_yum`, ...)
/// are additional structs behind the same [`Item`] contract, not
/// variants of this one — see [`cvg_core::ItemKind::Generic`].
pub struct PkgApt {
    pub name: String,
    pub installed: bool,
}

impl PkgApt {
    pub fn new(name: impl Into<String>, installed: bool) -> Self {
        Self {
            name: name.into(),
            installed,
        }
    }
}

#[async_trait]
impl Item for PkgApt {
    async fn get_status(&self, transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        let check = transport
            .run(&format!("dpkg -s {}", quote(&self.name)), true, false, false)
            .await?;
        let is_installed = check.return_code == 0 && check.stdout.contains("Status: install ok installed");
        if is_installed == self.installed {
            Ok(ItemStatus::correct())
        } else {
            Ok(ItemStatus::needs_fixing(serde_json::Value::Null))
        }
    }

    async fn fix(&self, transport: &dyn Transport, _status: &ItemStatus) -> Result<(), TransportError> {
        let command = if self.installed {
            format!("DEBIAN_FRONTEND=noninteractive apt-get install -y {}", quote(&self.name))
        } else {
            format!("apt-get remove -y {}", quote(&self.name))
        };
        transport.run(&command, false, true, false).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "pkg_tests.rs"]
mod tests;
