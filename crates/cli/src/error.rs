// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `ConvergeError`, the aggregating error enum `main()` prints and maps
//! to a process exit code — the way `oj-cli`'s `exit_error` module keeps
//! that translation out of `main()` itself.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvergeError {
    #[error(transparent)]
    Repo(#[from] cvg_repo::RepoError),
    #[error(transparent)]
    Prepare(#[from] cvg_resolver::PrepareError),
    #[error(transparent)]
    Lock(#[from] cvg_engine::LockError),
    #[error(transparent)]
    StuckFrontier(#[from] cvg_engine::StuckFrontier),
    #[error("{0}")]
    Usage(String),
    #[error("node run completed with {0} failed item(s)")]
    RunFailed(usize),
}

impl ConvergeError {
    /// Exit code `main()` passes to `std::process::exit`.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvergeError::Repo(_) => 2,
            ConvergeError::Prepare(_) => 2,
            ConvergeError::StuckFrontier(_) => 2,
            ConvergeError::Lock(_) => 3,
            ConvergeError::Usage(_) => 64,
            ConvergeError::RunFailed(_) => 1,
        }
    }
}
