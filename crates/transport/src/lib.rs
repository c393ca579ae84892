// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Concrete transports (spec.md §6, "added" — peripheral to the core).
//!
//! Both transports shell out to a subprocess rather than linking a
//! connection library, the way `oj-shell` drives commands through
//! `tokio::process::Command` instead of an in-process shell interpreter.

mod local;
mod ssh;

pub use local::LocalTransport;
pub use ssh::SshTransport;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
