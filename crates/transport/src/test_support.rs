// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A scriptable transport for resolver/engine tests that need to
//! control exactly what a remote command returns (lock contention,
//! action return codes) without shelling out to anything.

use async_trait::async_trait;
use cvg_core::{CommandResult, Transport, TransportError};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Run(String),
    Upload { local: PathBuf, remote: String },
    Download { remote: String, local: PathBuf },
}

/// Replies with a canned [`CommandResult`] per exact command string, or
/// a default success otherwise; records every call for assertions.
#[derive(Default)]
pub struct FakeTransport {
    responses: Mutex<HashMap<String, CommandResult>>,
    calls: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, command: impl Into<String>, result: CommandResult) {
        self.responses.lock().insert(command.into(), result);
    }

    pub fn calls(&self) -> Vec<Recorded> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn run(
        &self,
        command: &str,
        _may_fail: bool,
        _sudo: bool,
        _pty: bool,
    ) -> Result<CommandResult, TransportError> {
        self.calls.lock().push(Recorded::Run(command.to_string()));
        Ok(self
            .responses
            .lock()
            .get(command)
            .cloned()
            .unwrap_or_else(|| CommandResult::ok("")))
    }

    async fn upload(
        &self,
        local: &Path,
        remote: &str,
        _mode: Option<&str>,
        _owner: Option<&str>,
        _group: Option<&str>,
    ) -> Result<(), TransportError> {
        self.calls.lock().push(Recorded::Upload {
            local: local.to_path_buf(),
            remote: remote.to_string(),
        });
        Ok(())
    }

    async fn download(
        &self,
        remote: &str,
        local: &Path,
        _ignore_failure: bool,
    ) -> Result<(), TransportError> {
        self.calls.lock().push(Recorded::Download {
            remote: remote.to_string(),
            local: local.to_path_buf(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unmapped_command_succeeds_with_empty_output() {
        let transport = FakeTransport::new();
        let result = transport.run("echo hi", false, false, false).await.unwrap();
        assert_eq!(result.return_code, 0);
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn mapped_command_returns_the_scripted_result() {
        let transport = FakeTransport::new();
        transport.on(
            "test -d /tmp/converge.lock",
            CommandResult {
                return_code: 1,
                stdout: String::new(),
                stderr: String::new(),
            },
        );
        let result = transport
            .run("test -d /tmp/converge.lock", true, false, false)
            .await
            .unwrap();
        assert_eq!(result.return_code, 1);
    }
}
