// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cvg-core: data model and item contract for the Converge configuration agent.
//!
//! This crate defines the vocabulary every other crate builds on: the
//! [`Item`] trait every configurable unit implements, the [`StatusCode`]
//! lifecycle it reports, and the [`Node`]/[`ApplyResult`] types the apply
//! engine threads through a run. It has no scheduling logic of its own —
//! see `cvg-resolver` and `cvg-engine`.

pub mod apply_result;
pub mod clock;
pub mod error;
pub mod item;
pub mod macros;
pub mod node;
pub mod status;
pub mod transport;
pub mod worker;

pub use apply_result::ApplyResult;
pub use clock::{Clock, FakeClock, SystemClock};
pub use error::{ConfigError, DependencyError, LockInfo, NodeAlreadyLocked};
pub use item::{ApplyContext, Dummy, Item, ItemDescriptor, ItemId, ItemKind, NonInteractive, Prompter};
pub use node::{validate_name, Bundle, Node};
pub use status::{ItemStatus, StatusCode};
pub use transport::{CommandResult, Transport, TransportError};
pub use worker::WorkerId;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
