// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Turns authored HCL into the [`cvg_core::node::Node`] shape
//! `cvg-resolver` and `cvg-engine` operate on (spec.md §4.7, "added").
//! This module owns no scheduling semantics; it is a convenience
//! front-end over the item types `cvg-items` already provides.

use crate::schema::{CommonAttrs, Repo};
use cvg_core::node::{Bundle, ItemRecord, Node};
use cvg_core::{ConfigError, Item, ItemId, ItemKind};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing {path}: {source}")]
    Hcl {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("node {0:?} is not declared in this repo")]
    UnknownNode(String),
    #[error("node {node:?} references undeclared bundle {bundle:?}")]
    UnknownBundle { node: String, bundle: String },
}

/// Parse every `*.hcl` file directly under `root` into one merged
/// [`Repo`]. A `node` or `bundle` label repeated across files is a
/// loading-time error: there is exactly one repo to converge on, not a
/// stack of overlays to merge.
pub fn load_repo(root: &Path) -> Result<Repo, RepoError> {
    let mut merged = Repo::default();
    let mut seen_nodes: HashSet<String> = HashSet::new();
    let mut seen_bundles: HashSet<String> = HashSet::new();

    let mut paths: Vec<PathBuf> = std::fs::read_dir(root)
        .map_err(|source| RepoError::Io { path: root.to_path_buf(), source })?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "hcl").unwrap_or(false))
        .collect();
    paths.sort();

    for path in paths {
        let text = std::fs::read_to_string(&path)
            .map_err(|source| RepoError::Io { path: path.clone(), source })?;
        let parsed: Repo =
            hcl::from_str(&text).map_err(|source| RepoError::Hcl { path: path.clone(), source })?;

        for (name, decl) in parsed.node {
            if !seen_nodes.insert(name.clone()) {
                return Err(ConfigError::InvalidAttributes {
                    context: format!("node {name:?}"),
                    reason: format!("declared more than once, last seen in {}", path.display()),
                }
                .into());
            }
            merged.node.insert(name, decl);
        }
        for (name, decl) in parsed.bundle {
            if !seen_bundles.insert(name.clone()) {
                return Err(ConfigError::InvalidAttributes {
                    context: format!("bundle {name:?}"),
                    reason: format!("declared more than once, last seen in {}", path.display()),
                }
                .into());
            }
            merged.bundle.insert(name, decl);
        }
    }

    Ok(merged)
}

/// Flatten one node's bundles into a [`Node`] ready for
/// `cvg_resolver::prepare` (spec.md §4.2's input shape).
pub fn materialize_node(repo: &Repo, node_name: &str) -> Result<Node, RepoError> {
    let decl = repo
        .node
        .get(node_name)
        .ok_or_else(|| RepoError::UnknownNode(node_name.to_string()))?;

    let mut node = Node::new(node_name);
    let mut seen_ids: HashSet<ItemId> = HashSet::new();

    for bundle_name in &decl.bundles {
        let bundle_decl = repo.bundle.get(bundle_name).ok_or_else(|| RepoError::UnknownBundle {
            node: node_name.to_string(),
            bundle: bundle_name.clone(),
        })?;
        let mut bundle = Bundle::new(bundle_name.clone());

        for (path, item_decl) in &bundle_decl.file {
            let behavior = cvg_items::File::new(
                path.clone(),
                PathBuf::from(&item_decl.source),
                item_decl.mode.clone(),
                item_decl.owner.clone(),
                item_decl.group.clone(),
            )?;
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "file",
                path,
                ItemKind::File,
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        for (path, item_decl) in &bundle_decl.directory {
            let behavior = cvg_items::Directory::new(
                path.clone(),
                item_decl.mode.clone(),
                item_decl.owner.clone(),
                item_decl.group.clone(),
            )?;
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "directory",
                path,
                ItemKind::Directory,
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        for (path, item_decl) in &bundle_decl.symlink {
            let behavior = cvg_items::Symlink::new(
                path.clone(),
                item_decl.target.clone(),
                item_decl.owner.clone(),
                item_decl.group.clone(),
            )?;
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "symlink",
                path,
                ItemKind::Symlink,
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        for (name, item_decl) in &bundle_decl.user {
            let home = item_decl.home.clone().unwrap_or_else(|| format!("/home/{name}"));
            let behavior = cvg_items::User::new(name.clone(), item_decl.shell.clone(), home)?;
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "user",
                name,
                ItemKind::User,
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        for (name, item_decl) in &bundle_decl.group {
            let behavior = cvg_items::Group::new(name.clone())?;
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "group",
                name,
                ItemKind::Group,
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        for (name, item_decl) in &bundle_decl.pkg_apt {
            let behavior = cvg_items::PkgApt::new(name.clone(), item_decl.installed);
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "pkg_apt",
                name,
                ItemKind::Generic("pkg_apt".into()),
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        for (name, item_decl) in &bundle_decl.svc_systemd {
            let behavior = cvg_items::SvcSystemd::new(name.clone(), item_decl.running, item_decl.enabled);
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "svc_systemd",
                name,
                ItemKind::Generic("svc_systemd".into()),
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        for (name, item_decl) in &bundle_decl.action {
            let mut behavior = cvg_items::Action::new(name.clone(), item_decl.command.clone());
            behavior.unless = item_decl.unless.clone();
            behavior.expected_return_code = item_decl.expected_return_code;
            behavior.expected_stdout = item_decl.expected_stdout.clone();
            behavior.expected_stderr = item_decl.expected_stderr.clone();
            behavior.interactive = item_decl.interactive;
            push_item(
                &mut node,
                &mut bundle,
                &mut seen_ids,
                "action",
                name,
                ItemKind::Action,
                Arc::new(behavior),
                &item_decl.common,
            )?;
        }

        node.bundles.push(bundle);
    }

    Ok(node)
}

#[allow(clippy::too_many_arguments)]
fn push_item(
    node: &mut Node,
    bundle: &mut Bundle,
    seen_ids: &mut HashSet<ItemId>,
    type_name: &str,
    name: &str,
    kind: ItemKind,
    behavior: Arc<dyn Item>,
    common: &CommonAttrs,
) -> Result<(), RepoError> {
    let id = ItemId::new(format!("{type_name}:{name}"));
    if !seen_ids.insert(id.clone()) {
        return Err(ConfigError::DuplicateItemId(id).into());
    }

    let mut record = ItemRecord::new(id.clone(), kind, behavior);
    record.needs = common.needs.clone();
    record.triggers = common.triggers.iter().cloned().map(ItemId::new).collect();
    record.triggered = common.triggered;
    record.cascade_skip = common.cascade_skip;

    bundle.item_ids.push(id);
    node.items.push(record);
    Ok(())
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
