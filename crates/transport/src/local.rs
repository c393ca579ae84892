// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use cvg_core::{CommandResult, Transport, TransportError};
use std::path::Path;
use tokio::process::Command;

/// Executes commands in-process via `tokio::process`, and treats
/// "remote" paths as ordinary local paths. Used for single-machine runs
/// and by the test suite; has no persistent connection, so
/// `disconnect_all` is the trait's default no-op.
#[derive(Debug, Default)]
pub struct LocalTransport;

#[async_trait]
impl Transport for LocalTransport {
    async fn run(
        &self,
        command: &str,
        may_fail: bool,
        sudo: bool,
        _pty: bool,
    ) -> Result<CommandResult, TransportError> {
        let mut cmd = Command::new("sh");
        cmd.arg("-c");
        if sudo {
            cmd.arg(format!("sudo sh -c {command:?}"));
        } else {
            cmd.arg(command);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| TransportError::Exec(format!("spawning {command:?}: {e}")))?;

        let result = CommandResult {
            return_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !may_fail && result.return_code != 0 {
            return Err(TransportError::Exec(format!(
                "{command:?} exited {}: {}",
                result.return_code, result.stderr
            )));
        }

        Ok(result)
    }

    async fn upload(
        &self,
        local: &Path,
        remote: &str,
        mode: Option<&str>,
        _owner: Option<&str>,
        _group: Option<&str>,
    ) -> Result<(), TransportError> {
        tokio::fs::copy(local, remote)
            .await
            .map_err(|source| TransportError::Upload {
                local: local.display().to_string(),
                remote: remote.to_string(),
                source,
            })?;

        if let Some(mode) = mode {
            if let Ok(bits) = u32::from_str_radix(mode, 8) {
                let _ = tokio::fs::set_permissions(
                    remote,
                    std::os::unix::fs::PermissionsExt::from_mode(bits),
                )
                .await;
            }
        }
        Ok(())
    }

    async fn download(
        &self,
        remote: &str,
        local: &Path,
        ignore_failure: bool,
    ) -> Result<(), TransportError> {
        match tokio::fs::copy(remote, local).await {
            Ok(_) => Ok(()),
            Err(_) if ignore_failure => Ok(()),
            Err(source) => Err(TransportError::Download {
                remote: remote.to_string(),
                local: local.display().to_string(),
                source,
            }),
        }
    }
}
