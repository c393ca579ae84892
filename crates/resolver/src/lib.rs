// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! The dependency resolver (spec.md §4.2): turns an author-supplied item
//! list into a normalized DAG the apply engine can drain.

use cvg_core::{ConfigError, DependencyError, Dummy, Item, ItemDescriptor, ItemId, ItemKind};
use cvg_core::node::ItemRecord;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum PrepareError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dependency(#[from] DependencyError),
}

/// Run the full six-step preparation pipeline over `items` (spec.md
/// §4.2). Consumes the unprepared records and returns the normalized set
/// — dummy items included — ready for `split_ready`.
pub fn prepare(mut items: Vec<ItemRecord>) -> Result<Vec<ItemRecord>, PrepareError> {
    inject_auto_deps(&mut items)?;
    resolve_needs(&mut items)?;
    expand_static_needs(&mut items);
    synthesize_dummies(&mut items);
    link_triggers(&mut items)?;
    validate(&items)?;
    Ok(items)
}

fn inject_auto_deps(items: &mut [ItemRecord]) -> Result<(), PrepareError> {
    let peers: Vec<ItemDescriptor<'_>> = items
        .iter()
        .map(|item| ItemDescriptor {
            id: &item.id,
            kind: &item.kind,
            name: &item.name,
        })
        .collect();
    let mut computed = Vec::with_capacity(items.len());
    for item in items.iter() {
        computed.push(item.behavior.auto_deps(&peers)?);
    }
    for (item, deps) in items.iter_mut().zip(computed) {
        item.auto_deps = deps;
    }
    Ok(())
}

/// A `needs` tag is either a concrete id or a bare `"<type>:"` prefix
/// meaning "every peer of that type" (spec.md §4.2 step 2).
fn resolve_tag(tag: &str, self_id: &ItemId, peers: &[ItemId]) -> Option<Vec<ItemId>> {
    if let Some(prefix) = tag.strip_suffix(':') {
        let matches: Vec<ItemId> = peers
            .iter()
            .filter(|id| id.has_type_prefix(prefix) && *id != self_id)
            .cloned()
            .collect();
        if matches.is_empty() {
            None
        } else {
            Some(matches)
        }
    } else if peers.iter().any(|id| id.as_str() == tag) {
        Some(vec![ItemId::new(tag)])
    } else {
        None
    }
}

fn resolve_needs(items: &mut [ItemRecord]) -> Result<(), PrepareError> {
    let peers: Vec<ItemId> = items.iter().map(|item| item.id.clone()).collect();
    for idx in 0..items.len() {
        let needs = std::mem::take(&mut items[idx].needs);
        for tag in needs {
            match resolve_tag(&tag, &items[idx].id, &peers) {
                Some(resolved) => items[idx].explicit_deps.extend(resolved),
                None => {
                    return Err(ConfigError::UnresolvedNeeds {
                        id: items[idx].id.clone(),
                        needs: tag,
                    }
                    .into())
                }
            }
        }
    }
    Ok(())
}

/// Unlike `needs`, an unsatisfied static requirement is not an error —
/// it is vacuously satisfied when no peer of that type exists (spec.md
/// §9's "document the expansion rule explicitly").
fn expand_static_needs(items: &mut [ItemRecord]) {
    let peers: Vec<ItemId> = items.iter().map(|item| item.id.clone()).collect();
    for idx in 0..items.len() {
        let prefixes = items[idx].kind.needs_static();
        if prefixes.is_empty() {
            continue;
        }
        let mut resolved = Vec::new();
        for prefix in prefixes {
            let prefix = prefix.trim_end_matches(':');
            resolved.extend(
                peers
                    .iter()
                    .filter(|id| id.has_type_prefix(prefix) && *id != &items[idx].id)
                    .cloned(),
            );
        }
        items[idx].explicit_deps.extend(resolved);
    }
}

/// Introduce a `dummy` item for every dependency reference that names a
/// type prefix rather than a concrete item, with that prefix string as
/// the dummy's own id — so dependents that already reference
/// `"file:"` resolve it without rewriting (spec.md §4.2 step 4).
fn synthesize_dummies(items: &mut Vec<ItemRecord>) {
    let known: HashSet<ItemId> = items.iter().map(|item| item.id.clone()).collect();
    let mut groups: HashSet<ItemId> = HashSet::new();
    for item in items.iter() {
        for dep in item.explicit_deps.iter().chain(item.auto_deps.iter()) {
            if !known.contains(dep) && dep.as_str().ends_with(':') {
                groups.insert(dep.clone());
            }
        }
    }

    for group_id in groups {
        let prefix = group_id.as_str().trim_end_matches(':');
        let members: Vec<ItemId> = items
            .iter()
            .filter(|item| item.id.has_type_prefix(prefix))
            .map(|item| item.id.clone())
            .collect();
        let mut dummy = ItemRecord::new(group_id, ItemKind::Dummy, Arc::new(Dummy) as Arc<dyn Item>);
        dummy.explicit_deps = members;
        items.push(dummy);
    }
}

fn link_triggers(items: &mut [ItemRecord]) -> Result<(), PrepareError> {
    let index: HashMap<String, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id.as_str().to_string(), i))
        .collect();
    let edges: Vec<(ItemId, ItemId)> = items
        .iter()
        .flat_map(|item| {
            item.triggers
                .iter()
                .cloned()
                .map(move |target| (item.id.clone(), target))
        })
        .collect();
    for (source, target) in edges {
        match index.get(target.as_str()) {
            Some(&idx) => items[idx].triggered = true,
            None => {
                return Err(DependencyError::MissingDependency {
                    dependent: source,
                    dependency: target,
                }
                .into())
            }
        }
    }
    Ok(())
}

fn validate(items: &[ItemRecord]) -> Result<(), PrepareError> {
    let index: HashMap<&str, usize> = items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id.as_str(), i))
        .collect();

    for item in items {
        for dep in item.all_deps() {
            if dep == &item.id {
                return Err(ConfigError::SelfDependency(item.id.clone()).into());
            }
            if !index.contains_key(dep.as_str()) {
                return Err(DependencyError::MissingDependency {
                    dependent: item.id.clone(),
                    dependency: dep.clone(),
                }
                .into());
            }
        }
    }

    detect_cycle(items, &index)
}

#[derive(Clone, Copy, PartialEq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

fn detect_cycle(items: &[ItemRecord], index: &HashMap<&str, usize>) -> Result<(), PrepareError> {
    let mut marks = vec![Mark::Unvisited; items.len()];
    let mut stack = Vec::new();

    for start in 0..items.len() {
        if marks[start] == Mark::Unvisited {
            if let Some(cycle) = visit(start, items, index, &mut marks, &mut stack) {
                return Err(DependencyError::Cycle(cycle).into());
            }
        }
    }
    Ok(())
}

fn visit(
    node: usize,
    items: &[ItemRecord],
    index: &HashMap<&str, usize>,
    marks: &mut [Mark],
    stack: &mut Vec<usize>,
) -> Option<Vec<ItemId>> {
    marks[node] = Mark::InProgress;
    stack.push(node);

    for dep in items[node].all_deps() {
        let Some(&next) = index.get(dep.as_str()) else {
            continue;
        };
        match marks[next] {
            Mark::Unvisited => {
                if let Some(cycle) = visit(next, items, index, marks, stack) {
                    return Some(cycle);
                }
            }
            Mark::InProgress => {
                let start = stack.iter().position(|&n| n == next).unwrap_or(0);
                let mut cycle: Vec<ItemId> = stack[start..].iter().map(|&n| items[n].id.clone()).collect();
                cycle.push(items[next].id.clone());
                return Some(cycle);
            }
            Mark::Done => {}
        }
    }

    stack.pop();
    marks[node] = Mark::Done;
    None
}

/// Partition a prepared item list into `(blocked, ready)` (spec.md
/// §4.2's `split_ready`).
pub fn split_ready(items: Vec<ItemRecord>) -> (Vec<ItemRecord>, Vec<ItemRecord>) {
    items
        .into_iter()
        .partition(|item| item.all_deps().next().is_some())
}

/// Strip `id` from every remaining item's dependency set (spec.md
/// §4.2's `remove_dep`).
pub fn remove_dep(items: &mut [ItemRecord], id: &ItemId) {
    for item in items.iter_mut() {
        item.explicit_deps.retain(|dep| dep != id);
        item.auto_deps.retain(|dep| dep != id);
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
