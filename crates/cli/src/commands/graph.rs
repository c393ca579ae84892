// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `cvg graph` (spec.md §4.8, "added"): dump the prepared dependency
//! graph as Graphviz `dot`, the diagnostic format spec.md §7 calls for
//! when a cycle survives preparation.

use super::shared::load_node;
use crate::error::ConvergeError;
use std::path::Path;

pub fn run(repo_root: &Path, node_name: &str) -> Result<(), ConvergeError> {
    let (_repo, node) = load_node(repo_root, node_name)?;
    let items = cvg_resolver::prepare(node.items)?;

    println!("digraph \"{node_name}\" {{");
    for item in &items {
        println!("  \"{}\";", item.id.as_str());
        for dep in item.all_deps() {
            println!("  \"{}\" -> \"{}\";", dep.as_str(), item.id.as_str());
        }
    }
    println!("}}");
    Ok(())
}
