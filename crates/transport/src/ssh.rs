// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use cvg_core::{CommandResult, Transport, TransportError};
use std::path::Path;
use tokio::process::Command;

/// Shells out to the system `ssh`/`scp` binaries rather than linking an
/// SSH library, mirroring how `oj-shell` drives every external process.
/// Holds no persistent connection object, so `disconnect_all` is the
/// trait's default no-op — there is nothing a fork could corrupt.
#[derive(Debug, Clone)]
pub struct SshTransport {
    pub host: String,
    pub user: Option<String>,
    pub port: Option<u16>,
}

impl SshTransport {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: None,
            port: None,
        }
    }

    fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}@{}", self.host),
            None => self.host.clone(),
        }
    }

    fn ssh_command(&self) -> Command {
        let mut cmd = Command::new("ssh");
        if let Some(port) = self.port {
            cmd.arg("-p").arg(port.to_string());
        }
        cmd.arg(self.destination());
        cmd
    }

    fn scp_command(&self) -> Command {
        let mut cmd = Command::new("scp");
        cmd.arg("-q");
        if let Some(port) = self.port {
            cmd.arg("-P").arg(port.to_string());
        }
        cmd
    }
}

#[async_trait]
impl Transport for SshTransport {
    async fn run(
        &self,
        command: &str,
        may_fail: bool,
        sudo: bool,
        pty: bool,
    ) -> Result<CommandResult, TransportError> {
        let mut cmd = self.ssh_command();
        if pty {
            cmd.arg("-t");
        }
        let remote_command = if sudo {
            format!("sudo sh -c {command:?}")
        } else {
            command.to_string()
        };
        cmd.arg(remote_command);

        let output = cmd
            .output()
            .await
            .map_err(|e| TransportError::Exec(format!("ssh to {}: {e}", self.host)))?;

        let result = CommandResult {
            return_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        if !may_fail && result.return_code != 0 {
            return Err(TransportError::Exec(format!(
                "{command:?} on {} exited {}: {}",
                self.host, result.return_code, result.stderr
            )));
        }

        Ok(result)
    }

    async fn upload(
        &self,
        local: &Path,
        remote: &str,
        mode: Option<&str>,
        owner: Option<&str>,
        group: Option<&str>,
    ) -> Result<(), TransportError> {
        let destination = format!("{}:{remote}", self.destination());
        let status = self
            .scp_command()
            .arg(local)
            .arg(&destination)
            .status()
            .await
            .map_err(|source| TransportError::Upload {
                local: local.display().to_string(),
                remote: remote.to_string(),
                source,
            })?;

        if !status.success() {
            return Err(TransportError::Upload {
                local: local.display().to_string(),
                remote: remote.to_string(),
                source: std::io::Error::other(format!("scp exited {status}")),
            });
        }

        if mode.is_some() || owner.is_some() || group.is_some() {
            let mut chattr = String::new();
            if let Some(mode) = mode {
                chattr.push_str(&format!("chmod {mode} {remote:?}; "));
            }
            if owner.is_some() || group.is_some() {
                let ownership = format!(
                    "{}:{}",
                    owner.unwrap_or(""),
                    group.unwrap_or("")
                );
                chattr.push_str(&format!("chown {ownership} {remote:?}; "));
            }
            let _ = self.run(&chattr, true, true, false).await;
        }

        Ok(())
    }

    async fn download(
        &self,
        remote: &str,
        local: &Path,
        ignore_failure: bool,
    ) -> Result<(), TransportError> {
        let source = format!("{}:{remote}", self.destination());
        let status = self.scp_command().arg(&source).arg(local).status().await;

        match status {
            Ok(status) if status.success() => Ok(()),
            Ok(_) if ignore_failure => Ok(()),
            Ok(status) => Err(TransportError::Download {
                remote: remote.to_string(),
                local: local.display().to_string(),
                source: std::io::Error::other(format!("scp exited {status}")),
            }),
            Err(_) if ignore_failure => Ok(()),
            Err(source) => Err(TransportError::Download {
                remote: remote.to_string(),
                local: local.display().to_string(),
                source,
            }),
        }
    }
}
