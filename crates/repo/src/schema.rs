// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The declarative HCL shape a repo is authored in (spec.md §4.7,
//! "added"): `node "<id>" { ... }` blocks list the bundles a host gets,
//! `bundle "<id>" { ... }` blocks list the items a bundle contains.

use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repo {
    #[serde(default)]
    pub node: IndexMap<String, NodeDecl>,
    #[serde(default)]
    pub bundle: IndexMap<String, BundleDecl>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeDecl {
    pub hostname: String,
    #[serde(default)]
    pub bundles: Vec<String>,
}

/// Item-type blocks are checked with `deny_unknown_fields`: an unrecognized
/// block name inside a `bundle` (a typo, or a backend this crate does not
/// model) must fail at load time, not be silently dropped (spec.md §7).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleDecl {
    #[serde(default)]
    pub file: IndexMap<String, FileDecl>,
    #[serde(default)]
    pub directory: IndexMap<String, DirectoryDecl>,
    #[serde(default)]
    pub symlink: IndexMap<String, SymlinkDecl>,
    #[serde(default)]
    pub user: IndexMap<String, UserDecl>,
    #[serde(default)]
    pub group: IndexMap<String, GroupDecl>,
    #[serde(default)]
    pub pkg_apt: IndexMap<String, PkgAptDecl>,
    #[serde(default)]
    pub svc_systemd: IndexMap<String, SvcSystemdDecl>,
    #[serde(default)]
    pub action: IndexMap<String, ActionDecl>,
}

/// Attributes every item block accepts regardless of type: the
/// scheduling metadata that lives on [`cvg_core::node::ItemRecord`]
/// rather than on any one item's own state (spec.md §3).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommonAttrs {
    #[serde(default)]
    pub needs: Vec<String>,
    #[serde(default)]
    pub triggers: Vec<String>,
    #[serde(default)]
    pub triggered: bool,
    #[serde(default = "default_true")]
    pub cascade_skip: bool,
}

fn default_true() -> bool {
    true
}

fn default_file_mode() -> String {
    "0644".into()
}

fn default_dir_mode() -> String {
    "0755".into()
}

fn default_owner() -> String {
    "root".into()
}

fn default_group() -> String {
    "root".into()
}

fn default_shell() -> String {
    "/bin/bash".into()
}

fn default_expected_return_code() -> Option<i32> {
    Some(0)
}

#[derive(Debug, Clone, Deserialize)]
pub struct FileDecl {
    pub source: String,
    #[serde(default = "default_file_mode")]
    pub mode: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(flatten)]
    pub common: CommonAttrs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryDecl {
    #[serde(default = "default_dir_mode")]
    pub mode: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(flatten)]
    pub common: CommonAttrs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SymlinkDecl {
    pub target: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_group")]
    pub group: String,
    #[serde(flatten)]
    pub common: CommonAttrs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDecl {
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default)]
    pub home: Option<String>,
    #[serde(flatten)]
    pub common: CommonAttrs,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupDecl {
    #[serde(flatten)]
    pub common: CommonAttrs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PkgAptDecl {
    #[serde(default = "default_true")]
    pub installed: bool,
    #[serde(flatten)]
    pub common: CommonAttrs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SvcSystemdDecl {
    #[serde(default = "default_true")]
    pub running: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(flatten)]
    pub common: CommonAttrs,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActionDecl {
    pub command: String,
    #[serde(default)]
    pub unless: Option<String>,
    #[serde(default = "default_expected_return_code")]
    pub expected_return_code: Option<i32>,
    #[serde(default)]
    pub expected_stdout: Option<String>,
    #[serde(default)]
    pub expected_stderr: Option<String>,
    #[serde(default)]
    pub interactive: Option<bool>,
    #[serde(flatten)]
    pub common: CommonAttrs,
}
