// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ANSI color helpers for item-result output (spec.md §4.8, "added"),
//! the BundleWrap-style `✓`/`✘`/`»` markers `node.py::format_item_result`
//! prints.

use std::io::IsTerminal;

/// Priority: `NO_COLOR=1` disables, `COLOR=1` forces, otherwise a TTY check.
pub fn should_colorize() -> bool {
    if std::env::var("NO_COLOR").is_ok_and(|v| v == "1") {
        return false;
    }
    if std::env::var("COLOR").is_ok_and(|v| v == "1") {
        return true;
    }
    std::io::stdout().is_terminal()
}

fn wrap(code: u8, text: &str) -> String {
    if should_colorize() {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

pub fn red(text: &str) -> String {
    wrap(31, text)
}

pub fn green(text: &str) -> String {
    wrap(32, text)
}

pub fn yellow(text: &str) -> String {
    wrap(33, text)
}

pub fn bold(text: &str) -> String {
    wrap(1, text)
}
