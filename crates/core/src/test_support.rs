// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixtures shared by `cvg-resolver`/`cvg-pool`/`cvg-engine` tests, gated
//! behind the `test-support` feature so downstream crates don't pull
//! them into release builds.

use crate::item::Item;
use crate::status::ItemStatus;
use crate::node::ItemRecord;
use crate::transport::{CommandResult, Transport, TransportError};
use crate::{ItemId, ItemKind};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Records every command it is asked to run and always succeeds — for
/// tests exercising dependency/trigger wiring rather than transport
/// behavior itself.
#[derive(Default)]
pub struct RecordingTransport {
    pub commands: Mutex<Vec<String>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn run(
        &self,
        command: &str,
        _may_fail: bool,
        _sudo: bool,
        _pty: bool,
    ) -> Result<CommandResult, TransportError> {
        self.commands.lock().push(command.to_string());
        Ok(CommandResult::ok(""))
    }

    async fn upload(
        &self,
        _local: &Path,
        _remote: &str,
        _mode: Option<&str>,
        _owner: Option<&str>,
        _group: Option<&str>,
    ) -> Result<(), TransportError> {
        Ok(())
    }

    async fn download(
        &self,
        _remote: &str,
        _local: &Path,
        _ignore_failure: bool,
    ) -> Result<(), TransportError> {
        Ok(())
    }
}

/// An item whose status/fix outcome is fixed at construction time, for
/// tests that only care about scheduling, not about a real item type's
/// attributes.
pub struct ScriptedItem {
    correct: bool,
    fix_succeeds: bool,
    pub fix_calls: AtomicUsize,
}

impl ScriptedItem {
    pub fn correct() -> Self {
        Self {
            correct: true,
            fix_succeeds: true,
            fix_calls: AtomicUsize::new(0),
        }
    }

    pub fn needs_fix() -> Self {
        Self {
            correct: false,
            fix_succeeds: true,
            fix_calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            correct: false,
            fix_succeeds: false,
            fix_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Item for ScriptedItem {
    async fn get_status(&self, _transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        Ok(if self.correct {
            ItemStatus::correct()
        } else {
            ItemStatus::needs_fixing(serde_json::Value::Null)
        })
    }

    async fn fix(&self, _transport: &dyn Transport, _status: &ItemStatus) -> Result<(), TransportError> {
        self.fix_calls.fetch_add(1, Ordering::SeqCst);
        if self.fix_succeeds {
            Ok(())
        } else {
            Err(TransportError::Exec("scripted failure".into()))
        }
    }
}

/// Build a [`ItemRecord`] around a [`ScriptedItem`] (or any other
/// behavior) without repeating the `Arc::new` boilerplate at every call
/// site.
pub fn scripted_record(id: &str, kind: ItemKind, behavior: Arc<dyn Item>) -> ItemRecord {
    ItemRecord::new(ItemId::new(id), kind, behavior)
}
