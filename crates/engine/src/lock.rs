// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Advisory node lock (spec.md §4.5): a marker directory plus an info
//! file on the target host, guarding against two operators converging
//! the same node at once.

use cvg_core::{Clock, LockInfo, NodeAlreadyLocked, Prompter, Transport};
use thiserror::Error;

/// Default marker directory (spec.md §9, "parameterize it — tests need
/// isolation"); callers running concurrent tests should override it.
pub const DEFAULT_LOCK_PATH: &str = "/tmp/converge.lock";

#[derive(Debug, Error)]
pub enum LockError {
    #[error(transparent)]
    AlreadyLocked(#[from] NodeAlreadyLocked),
    #[error(transparent)]
    Transport(#[from] cvg_core::TransportError),
}

fn quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', "'\\''"))
}

fn info_path(lock_path: &str) -> String {
    format!("{lock_path}/info")
}

/// Held for the duration of one apply run; `release` must be called on
/// every exit path, success or failure (spec.md §4.5).
pub struct NodeLock<'a> {
    transport: &'a dyn Transport,
    lock_path: String,
    held: bool,
}

impl std::fmt::Debug for NodeLock<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeLock")
            .field("lock_path", &self.lock_path)
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}

impl<'a> NodeLock<'a> {
    /// Attempt to acquire the lock at `lock_path` (spec.md §4.5 steps
    /// 1–5). `force` bypasses contention unconditionally; when not
    /// forced and `interactive` is set, `prompter` is asked whether to
    /// override a stale lock.
    pub async fn acquire(
        transport: &'a dyn Transport,
        clock: &dyn Clock,
        lock_path: &str,
        user: &str,
        host: &str,
        interactive: bool,
        force: bool,
        prompter: &dyn Prompter,
    ) -> Result<Self, LockError> {
        let mkdir = transport
            .run(&format!("mkdir {}", quote(lock_path)), true, false, false)
            .await?;

        if mkdir.return_code != 0 {
            let existing = transport
                .run(&format!("cat {}", quote(&info_path(lock_path))), true, false, false)
                .await?;
            let info: LockInfo = serde_json::from_str(&existing.stdout).unwrap_or(LockInfo {
                date: 0.0,
                user: "<unknown>".to_string(),
                host: String::new(),
            });

            let overridden = force
                || (interactive
                    && prompter.ask(
                        &format!("node appears locked by {}@{} — override?", info.user, info.host),
                        false,
                    ));
            if !overridden {
                return Err(LockError::AlreadyLocked(NodeAlreadyLocked::from_info(&info)));
            }
        }

        let info = LockInfo {
            date: clock.epoch_ms() as f64 / 1000.0,
            user: user.to_string(),
            host: host.to_string(),
        };
        let payload = serde_json::to_string(&info).unwrap_or_default();
        transport
            .run(
                &format!("printf '%s' {} > {}", quote(&payload), quote(&info_path(lock_path))),
                true,
                false,
                false,
            )
            .await?;

        // A downstream caller may fork before the next remote round-trip;
        // live connections do not survive that (spec.md §9).
        transport.disconnect_all().await;

        Ok(Self {
            transport,
            lock_path: lock_path.to_string(),
            held: true,
        })
    }

    /// Release the lock. Logs and swallows a removal failure rather than
    /// erroring, matching spec.md §4.5's "log a warning, do not fail".
    pub async fn release(mut self) {
        self.release_inner().await;
    }

    async fn release_inner(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;
        match self
            .transport
            .run(&format!("rm -R {}", quote(&self.lock_path)), true, false, false)
            .await
        {
            Ok(result) if result.return_code == 0 => {}
            Ok(result) => tracing::warn!(code = result.return_code, "could not release node lock"),
            Err(error) => tracing::warn!(%error, "could not release node lock"),
        }
        self.transport.disconnect_all().await;
    }
}

impl Drop for NodeLock<'_> {
    fn drop(&mut self) {
        if self.held {
            tracing::warn!("NodeLock dropped without an explicit release");
        }
    }
}

#[cfg(test)]
#[path = "lock_tests.rs"]
mod tests;
