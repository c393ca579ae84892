// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Repo loading and transport selection shared by every subcommand.

use crate::error::ConvergeError;
use cvg_core::node::Node;
use cvg_core::Transport;
use cvg_repo::Repo;
use cvg_transport::{LocalTransport, SshTransport};
use std::path::Path;
use std::sync::Arc;

pub fn load_node(repo_root: &Path, node_name: &str) -> Result<(Repo, Node), ConvergeError> {
    let repo = cvg_repo::load_repo(repo_root)?;
    let node = cvg_repo::materialize_node(&repo, node_name)?;
    Ok((repo, node))
}

/// `localhost`/`127.0.0.1` run in-process; anything else shells out over
/// `ssh` (spec.md §6, "added" transport implementations).
pub fn transport_for(repo: &Repo, node_name: &str) -> Arc<dyn Transport> {
    let hostname = repo
        .node
        .get(node_name)
        .map(|decl| decl.hostname.as_str())
        .unwrap_or(node_name);
    if hostname == "localhost" || hostname == "127.0.0.1" {
        Arc::new(LocalTransport)
    } else {
        Arc::new(SshTransport::new(hostname))
    }
}

pub fn hostname_for(repo: &Repo, node_name: &str) -> String {
    repo.node
        .get(node_name)
        .map(|decl| decl.hostname.clone())
        .unwrap_or_else(|| node_name.to_string())
}
