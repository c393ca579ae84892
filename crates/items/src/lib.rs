// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Concrete [`cvg_core::Item`] implementations (spec.md §3): the stateful
//! item types plus `action`. `dummy` lives in `cvg-core` itself since both
//! the resolver and the author-facing repo format need it.

mod action;
mod directory;
mod file;
mod group;
mod pkg;
mod remote;
mod symlink;
mod user;
mod svc;

pub use action::Action;
pub use directory::Directory;
pub use file::File;
pub use group::Group;
pub use pkg::PkgApt;
pub use symlink::Symlink;
pub use svc::SvcSystemd;
pub use user::User;
