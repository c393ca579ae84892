// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The transport contract items and the node lock run commands through
//! (spec.md §6, "Transport (consumed)").
//!
//! `cvg-core` only defines the trait; concrete transports (a local
//! subprocess runner, an `ssh`/`scp` wrapper) live in `cvg-transport` and
//! are deliberately peripheral — per spec.md §1 they are "external
//! collaborators whose interfaces the core consumes", not part of the
//! scheduler.

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Failure reaching or executing on the remote host. Transport errors
/// never escape a running task (spec.md §7) — item implementations catch
/// them and report `StatusCode::Failed`/`ActionFailed`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("command execution failed: {0}")]
    Exec(String),
    #[error("upload of {local} to {remote} failed: {source}")]
    Upload {
        local: String,
        remote: String,
        #[source]
        source: std::io::Error,
    },
    #[error("download of {remote} to {local} failed: {source}")]
    Download {
        remote: String,
        local: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a single remote command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub return_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            return_code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// A shell transport to a single remote host (spec.md §6).
///
/// Every operation that touches the network or the remote filesystem
/// goes through this trait; it is the one suspension point inside a
/// worker task (spec.md §5).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Run a command on the remote host.
    async fn run(
        &self,
        command: &str,
        may_fail: bool,
        sudo: bool,
        pty: bool,
    ) -> Result<CommandResult, TransportError>;

    /// Upload a local file to the remote host, optionally setting mode/owner/group.
    async fn upload(
        &self,
        local: &Path,
        remote: &str,
        mode: Option<&str>,
        owner: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), TransportError>;

    /// Download a remote file to the local filesystem.
    async fn download(
        &self,
        remote: &str,
        local: &Path,
        ignore_failure: bool,
    ) -> Result<(), TransportError>;

    /// Close every open connection. Called before the node lock returns
    /// control to a caller that may fork, and again on release — see
    /// spec.md §4.5 step 5 and §9's fork-safety design note. Transports
    /// with no persistent connection (a bare subprocess runner) make this
    /// a no-op.
    async fn disconnect_all(&self) {}
}
