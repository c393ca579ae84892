// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for parsing the small amount of remote command output
//! the stateful item types depend on.

/// Parse `stat -c '%a %U %G'` output into `(mode, owner, group)`.
pub fn parse_mode_owner_group(output: &str) -> Option<(String, String, String)> {
    let mut parts = output.split_whitespace();
    let mode = parts.next()?.to_string();
    let owner = parts.next()?.to_string();
    let group = parts.next()?.to_string();
    Some((mode, owner, group))
}

/// Shell-quote a path for inclusion in a remote command string. This is
/// not a general-purpose shell escaper — it only needs to survive the
/// paths item attributes validate (spec.md §3, "validated at
/// construction").
pub fn quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', "'\\''"))
}
