// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! HCL repo loading (spec.md §4.7, "added"): authored `node`/`bundle`
//! blocks in on disk, a prepared [`cvg_core::node::Node`] out.

mod loader;
mod schema;

pub use loader::{load_repo, materialize_node, RepoError};
pub use schema::{
    ActionDecl, BundleDecl, CommonAttrs, DirectoryDecl, FileDecl, GroupDecl, NodeDecl, PkgAptDecl,
    Repo, SvcSystemdDecl, SymlinkDecl, UserDecl,
};
