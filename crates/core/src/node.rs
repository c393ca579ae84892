// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Nodes, bundles, and the prepared item record the resolver/engine work
//! with (spec.md §3, "Data model").

use crate::item::{Item, ItemId, ItemKind};
use std::sync::{Arc, OnceLock};

/// Legal bundle and item-name characters, mirroring the convention every
/// `<type>:<name>` id is built from.
fn name_regex() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        regex::Regex::new(r"^[a-zA-Z0-9_.\-/]+$").unwrap()
    })
}

/// Reject names with characters that would break the `<type>:<name>` id
/// convention or a remote shell invocation (spec.md §3).
pub fn validate_name(name: &str) -> bool {
    !name.is_empty() && name_regex().is_match(name)
}

/// A named collection of items, as authored in a repo (spec.md §4.7,
/// "added"). Bundles are a loading-time grouping only — once attached to
/// a node, their items are flattened into one id-addressed set.
#[derive(Debug, Clone)]
pub struct Bundle {
    pub name: String,
    pub item_ids: Vec<ItemId>,
}

impl Bundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            item_ids: Vec::new(),
        }
    }
}

/// An item together with the scheduling metadata the resolver computes
/// and the engine mutates (spec.md §3's per-item fields: `explicit_deps`,
/// `auto_deps`, `needs`, `triggers`, `triggered`, `has_been_triggered`).
///
/// The behavioral contract ([`Item::get_status`]/[`fix`]/[`apply`]) and
/// the scheduling record are deliberately separate types: a trait object
/// held behind an `Arc` has no room for engine-owned mutable state, and
/// concurrent dispatch would make that state hard to reason about if it
/// lived on the item itself.
impl std::fmt::Debug for ItemRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRecord")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("explicit_deps", &self.explicit_deps)
            .field("auto_deps", &self.auto_deps)
            .field("needs", &self.needs)
            .field("triggers", &self.triggers)
            .field("triggered", &self.triggered)
            .field("has_been_triggered", &self.has_been_triggered)
            .field("cascade_skip", &self.cascade_skip)
            .finish_non_exhaustive()
    }
}

pub struct ItemRecord {
    pub id: ItemId,
    pub kind: ItemKind,
    pub name: String,
    /// Dependencies declared directly on this item (`needs`, resolved to
    /// concrete ids, plus any explicit `depends_on`).
    pub explicit_deps: Vec<ItemId>,
    /// Dependencies computed by [`Item::auto_deps`] during preparation.
    pub auto_deps: Vec<ItemId>,
    /// Raw `needs` tags as authored: either a full item id or a bare
    /// `"<type>:"` prefix meaning "every peer of that type" (spec.md
    /// §4.2 step 2). Consumed and cleared by `cvg-resolver::prepare`.
    pub needs: Vec<String>,
    /// Ids of items this item's success should arm (spec.md §3,
    /// "triggers" — separate from the dependency edges above).
    pub triggers: Vec<ItemId>,
    /// Whether this item only runs when triggered by an upstream item.
    pub triggered: bool,
    /// Whether a triggering upstream item has already succeeded this
    /// run. Mutated by the engine as results come in.
    pub has_been_triggered: bool,
    /// Whether this item's failure/skip should cascade-skip its
    /// dependents (default `true`, spec.md §3).
    pub cascade_skip: bool,
    pub behavior: Arc<dyn Item>,
}

impl ItemRecord {
    pub fn new(id: impl Into<ItemId>, kind: ItemKind, behavior: Arc<dyn Item>) -> Self {
        let id = id.into();
        let name = id
            .as_str()
            .split_once(':')
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| id.as_str().to_string());
        Self {
            id,
            kind,
            name,
            explicit_deps: Vec::new(),
            auto_deps: Vec::new(),
            needs: Vec::new(),
            triggers: Vec::new(),
            triggered: false,
            has_been_triggered: false,
            cascade_skip: true,
            behavior,
        }
    }

    /// All dependency edges, explicit and auto-derived, deduplicated.
    pub fn all_deps(&self) -> impl Iterator<Item = &ItemId> {
        self.explicit_deps.iter().chain(self.auto_deps.iter())
    }
}

/// A single managed host: a stable id plus the flattened set of items a
/// run applies to it (spec.md §3, "Node").
#[derive(Debug)]
pub struct Node {
    pub id: String,
    pub bundles: Vec<Bundle>,
    pub items: Vec<ItemRecord>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            bundles: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn item(&self, id: &str) -> Option<&ItemRecord> {
        self.items.iter().find(|item| item.id.as_str() == id)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
