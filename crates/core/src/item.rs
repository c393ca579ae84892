// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The item contract (spec.md §4.1, "Item abstraction").

use crate::error::ConfigError;
use crate::status::{ItemStatus, StatusCode};
use crate::transport::{Transport, TransportError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable identifier for an item, unique within a node.
///
/// Conventionally `<type>:<name>` (e.g. `file:/etc/hosts`), but the
/// format is a convention, not an invariant this type enforces — callers
/// (bundles, `needs` expansion) are the ones that rely on the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id's type prefix matches `type_name` (e.g. `"file"`
    /// for `"file:/etc/hosts"`). Used by `needs` and dummy-group
    /// expansion (spec.md §4.2 steps 2–4).
    pub fn has_type_prefix(&self, type_name: &str) -> bool {
        self.0
            .split_once(':')
            .map(|(prefix, _)| prefix == type_name)
            .unwrap_or(false)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// The closed set of item types named in spec.md §3, with a `Generic`
/// escape hatch for the open-ended `pkg_*`/`svc_*` backend families
/// (`pkg_apt`, `pkg_pacman`, `svc_systemd`, ...) — new backends plug in by
/// implementing [`Item`], not by extending this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    File,
    Directory,
    Symlink,
    User,
    Group,
    Action,
    /// Structural no-op join node synthesized by the resolver, or
    /// declared directly by the author.
    Dummy,
    /// `pkg_<backend>` / `svc_<backend>` and any other type name not
    /// modeled above, carrying its BundleWrap-style `ITEM_TYPE_NAME`.
    Generic(String),
}

impl ItemKind {
    /// The `ITEM_TYPE_NAME` this kind corresponds to (spec.md §6).
    pub fn type_name(&self) -> &str {
        match self {
            ItemKind::File => "file",
            ItemKind::Directory => "directory",
            ItemKind::Symlink => "symlink",
            ItemKind::User => "user",
            ItemKind::Group => "group",
            ItemKind::Action => "action",
            ItemKind::Dummy => "dummy",
            ItemKind::Generic(name) => name,
        }
    }

    pub fn is_dummy(&self) -> bool {
        matches!(self, ItemKind::Dummy)
    }

    pub fn is_action(&self) -> bool {
        matches!(self, ItemKind::Action)
    }

    /// Type-level structural prerequisites every item of this kind
    /// carries regardless of its author-declared `needs` (spec.md §4.2
    /// step 3, "NEEDS_STATIC"). A `symlink` always needs every `user` to
    /// exist first, since resolving `~alice/...`-style targets depends
    /// on the account already being present; no other kind modeled here
    /// declares one. Expansion follows the same prefix rule as `needs`:
    /// each entry is a `"<type>:"` tag matched against peer ids, and an
    /// empty match is not an error (spec.md §9, "document their
    /// expansion rule explicitly").
    pub fn needs_static(&self) -> &'static [&'static str] {
        match self {
            ItemKind::Symlink => &["user:"],
            _ => &[],
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A minimal, read-only view of a peer item, handed to `auto_deps` so an
/// item can reason about its siblings without borrowing the whole
/// scheduling record (spec.md §4.1, `get_auto_deps(peers)`).
#[derive(Debug, Clone, Copy)]
pub struct ItemDescriptor<'a> {
    pub id: &'a ItemId,
    pub kind: &'a ItemKind,
    pub name: &'a str,
}

/// Whether the caller should be asked for confirmation before a repair,
/// and how to ask (spec.md §4.1's "prompt if interactive").
pub trait Prompter: Send + Sync {
    /// Ask `question`, returning the user's answer (or `default` if the
    /// prompter cannot interact, e.g. in tests).
    fn ask(&self, question: &str, default: bool) -> bool;
}

/// A prompter that always answers `default` without asking — used for
/// non-interactive runs (worker count > 1) and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NonInteractive;

impl Prompter for NonInteractive {
    fn ask(&self, _question: &str, default: bool) -> bool {
        default
    }
}

/// Per-dispatch context an item's work function needs beyond its own
/// attributes: whether this run is interactive, and whether this item
/// was armed by an upstream trigger (spec.md §3, `has_been_triggered`).
pub struct ApplyContext<'a> {
    pub interactive: bool,
    pub triggered: bool,
    pub has_been_triggered: bool,
    pub prompter: &'a dyn Prompter,
}

impl<'a> ApplyContext<'a> {
    /// The trigger gate every item type must honor first (spec.md §3
    /// invariant: "A `triggered` item whose `has_been_triggered` is false
    /// at dispatch must produce `SKIPPED`").
    pub fn triggered_but_not_armed(&self) -> bool {
        self.triggered && !self.has_been_triggered
    }
}

/// The four operations every configurable unit implements (spec.md
/// §4.1). `get_status`/`fix` default to an always-correct no-op, which is
/// exactly the behavior a `dummy` item needs; stateful item types
/// override both, actions override `apply` directly instead.
#[async_trait]
pub trait Item: Send + Sync {
    /// Ids this item implicitly depends on given the full peer set.
    /// Must error if another peer's configuration makes this item
    /// unsatisfiable (spec.md §4.1).
    fn auto_deps(&self, _peers: &[ItemDescriptor<'_>]) -> Result<Vec<ItemId>, ConfigError> {
        Ok(Vec::new())
    }

    /// Probe the host; report whether it matches desired state and, if
    /// not, which sub-attributes need fixing.
    async fn get_status(&self, _transport: &dyn Transport) -> Result<ItemStatus, TransportError> {
        Ok(ItemStatus::correct())
    }

    /// Apply the repairs indicated by `status.info`.
    async fn fix(
        &self,
        _transport: &dyn Transport,
        _status: &ItemStatus,
    ) -> Result<(), TransportError> {
        Ok(())
    }

    /// Compute status; if correct, return `Ok`; else prompt if
    /// interactive, then `fix` and return `Fixed` on success, `Failed` on
    /// repair error, `Skipped` if the user declined (spec.md §4.1). This
    /// default implements that flow in terms of `get_status`/`fix`;
    /// action items override it entirely with their own gate/unless/run
    /// logic (spec.md §4.1, "Actions override").
    async fn apply(&self, transport: &dyn Transport, ctx: ApplyContext<'_>) -> StatusCode {
        if ctx.triggered_but_not_armed() {
            return StatusCode::Skipped;
        }

        let status = match self.get_status(transport).await {
            Ok(status) => status,
            Err(_) => return StatusCode::Failed,
        };

        if status.correct {
            return StatusCode::Ok;
        }

        if ctx.interactive && !ctx.prompter.ask("apply this change?", true) {
            return StatusCode::Skipped;
        }

        match self.fix(transport, &status).await {
            Ok(()) => StatusCode::Fixed,
            Err(_) => StatusCode::Failed,
        }
    }
}

/// A structural no-op item: always correct, nothing to fix. Used both
/// for author-declared `dummy` items and for the join nodes the resolver
/// synthesizes for group-style dependencies (spec.md §4.2 step 4, §9).
#[derive(Debug, Clone, Copy, Default)]
pub struct Dummy;

impl Item for Dummy {}

#[cfg(test)]
#[path = "item_tests.rs"]
mod tests;
