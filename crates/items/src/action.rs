// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use async_trait::async_trait;
use cvg_core::{ApplyContext, Item, StatusCode, Transport};

/// A command run against a node rather than a piece of state to converge
/// toward (spec.md §3, `action`). Unlike the stateful item types, an
/// action overrides `apply` directly instead of `get_status`/`fix` — there
/// is no "current state" to probe, only a command to run and its result
/// to judge (spec.md §4.1, "Actions override").
pub struct Action {
    pub name: String,
    pub command: String,
    /// Skip the action without running it if this command (run with
    /// `may_fail`) exits zero.
    pub unless: Option<String>,
    pub expected_return_code: Option<i32>,
    pub expected_stdout: Option<String>,
    pub expected_stderr: Option<String>,
    /// `None` defers to the run's own `interactive` flag; `Some(true)`
    /// forces a prompt even on an otherwise non-interactive run's
    /// single-worker path; `Some(false)` never prompts for this action.
    pub interactive: Option<bool>,
}

impl Action {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            unless: None,
            expected_return_code: Some(0),
            expected_stdout: None,
            expected_stderr: None,
            interactive: None,
        }
    }

    fn wants_prompt(&self, ctx_interactive: bool) -> bool {
        match self.interactive {
            Some(false) => false,
            Some(true) => true,
            None => ctx_interactive,
        }
    }
}

#[async_trait]
impl Item for Action {
    async fn apply(&self, transport: &dyn Transport, ctx: ApplyContext<'_>) -> StatusCode {
        if !ctx.interactive && self.interactive == Some(true) {
            return StatusCode::ActionSkipped;
        }

        if ctx.triggered_but_not_armed() {
            return StatusCode::ActionSkipped;
        }

        if let Some(unless) = &self.unless {
            match transport.run(unless, true, true, false).await {
                Ok(result) if result.return_code == 0 => return StatusCode::ActionSkipped,
                Ok(_) => {}
                Err(_) => return StatusCode::ActionFailed,
            }
        }

        if self.wants_prompt(ctx.interactive) {
            let question = format!("run action {}: `{}`?", self.name, self.command);
            if !ctx.prompter.ask(&question, true) {
                return StatusCode::ActionSkipped;
            }
        }

        let result = match transport.run(&self.command, true, true, false).await {
            Ok(result) => result,
            Err(_) => return StatusCode::ActionFailed,
        };

        if let Some(expected) = self.expected_return_code {
            if result.return_code != expected {
                return StatusCode::ActionFailed;
            }
        }
        if let Some(expected) = &self.expected_stdout {
            if &result.stdout != expected {
                return StatusCode::ActionFailed;
            }
        }
        if let Some(expected) = &self.expected_stderr {
            if &result.stderr != expected {
                return StatusCode::ActionFailed;
            }
        }

        StatusCode::ActionOk
    }
}

#[cfg(test)]
#[path = "action_tests.rs"]
mod tests;
