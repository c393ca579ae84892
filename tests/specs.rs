// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace-level end-to-end specs (spec.md §8's S1-S7 scenarios),
//! driving `cvg-resolver::prepare` and `cvg-engine::apply`/`apply_node`
//! across crate boundaries the way `cvg-cli` does, rather than through
//! any one crate's internal test doubles.

use cvg_core::node::ItemRecord;
use cvg_core::test_support::{scripted_record, ScriptedItem};
use cvg_core::{CommandResult, FakeClock, ItemId, ItemKind, NonInteractive};
use cvg_items::Action;
use cvg_transport::test_support::FakeTransport;
use std::sync::Arc;

fn dep(record: &mut ItemRecord, id: &str) {
    record.explicit_deps.push(ItemId::new(id));
}

/// S1: a linear chain `a -> b -> c`, all already correct.
#[tokio::test]
async fn s1_linear_chain_all_correct() {
    let mut b = scripted_record("file:b", ItemKind::File, Arc::new(ScriptedItem::correct()));
    dep(&mut b, "file:a");
    let mut c = scripted_record("file:c", ItemKind::File, Arc::new(ScriptedItem::correct()));
    dep(&mut c, "file:b");
    let a = scripted_record("file:a", ItemKind::File, Arc::new(ScriptedItem::correct()));

    let items = cvg_resolver::prepare(vec![a, b, c]).expect("no cycle in a linear chain");

    let clock = FakeClock::new();
    let result = cvg_engine::apply_node(
        "node1",
        items,
        Arc::new(FakeTransport::new()),
        &clock,
        2,
        false,
        Arc::new(NonInteractive),
    )
    .await
    .expect("linear chain never leaves a stuck frontier");

    assert_eq!(result.correct(), 3);
    assert_eq!(result.total(), 3);
    let ids: Vec<&str> = result.outcomes().iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["file:a", "file:b", "file:c"]);
}

/// S2: `a -> b -> c`, `a` fixable, `b` fails with `cascade_skip=true`;
/// `c` must skip without ever invoking its work function.
#[tokio::test]
async fn s2_cascade_on_failure() {
    let mut b = scripted_record("file:b", ItemKind::File, Arc::new(ScriptedItem::failing()));
    dep(&mut b, "file:a");
    let mut c = scripted_record("file:c", ItemKind::File, Arc::new(ScriptedItem::correct()));
    dep(&mut c, "file:b");
    let a = scripted_record("file:a", ItemKind::File, Arc::new(ScriptedItem::needs_fix()));

    let items = cvg_resolver::prepare(vec![a, b, c]).expect("no cycle");

    let clock = FakeClock::new();
    let result = cvg_engine::apply_node(
        "node1",
        items,
        Arc::new(FakeTransport::new()),
        &clock,
        1,
        false,
        Arc::new(NonInteractive),
    )
    .await
    .expect("cascade skip still drains the frontier");

    assert_eq!(result.fixed(), 1);
    assert_eq!(result.failed(), 1);
    assert_eq!(result.skipped(), 1);
    assert_eq!(result.total(), 3);
}

/// S3: a trigger fans out from `a` to `b` and `c`. Case A: `a` gets
/// fixed, so `b`/`c` run and report having invoked their work function.
/// Case B: `a` is already correct, so `b`/`c` skip untouched.
#[tokio::test]
async fn s3_case_a_trigger_fires_on_fix() {
    trigger_fan_out(true, 2).await;
}

#[tokio::test]
async fn s3_case_b_trigger_withheld_on_ok() {
    trigger_fan_out(false, 0).await;
}

async fn trigger_fan_out(a_needs_fix: bool, expected_fix_invocations: usize) {
    let a_behavior = if a_needs_fix {
        Arc::new(ScriptedItem::needs_fix())
    } else {
        Arc::new(ScriptedItem::correct())
    };
    let mut a = scripted_record("file:a", ItemKind::File, a_behavior);
    a.triggers = vec![ItemId::new("file:b"), ItemId::new("file:c")];

    let b_behavior = Arc::new(ScriptedItem::needs_fix());
    let mut b = scripted_record("file:b", ItemKind::File, b_behavior.clone());
    b.triggered = true;

    let c_behavior = Arc::new(ScriptedItem::needs_fix());
    let mut c = scripted_record("file:c", ItemKind::File, c_behavior.clone());
    c.triggered = true;

    let items = cvg_resolver::prepare(vec![a, b, c]).expect("triggers are not dependency edges");

    let clock = FakeClock::new();
    let result = cvg_engine::apply_node(
        "node1",
        items,
        Arc::new(FakeTransport::new()),
        &clock,
        3,
        false,
        Arc::new(NonInteractive),
    )
    .await
    .expect("fan-out drains cleanly");

    assert_eq!(result.total(), 3);
    let total_fix_calls = b_behavior.fix_calls.load(std::sync::atomic::Ordering::SeqCst)
        + c_behavior.fix_calls.load(std::sync::atomic::Ordering::SeqCst);
    assert_eq!(total_fix_calls, expected_fix_invocations);
    if a_needs_fix {
        assert_eq!(result.skipped(), 0);
    } else {
        assert_eq!(result.skipped(), 2);
    }
}

/// S4: `a -> b -> a` is a cycle; preparation must fail naming both ids,
/// with no items ever reaching the engine.
#[test]
fn s4_cycle_detection_is_a_preparation_error() {
    let mut a = scripted_record("file:a", ItemKind::File, Arc::new(ScriptedItem::correct()));
    dep(&mut a, "file:b");
    let mut b = scripted_record("file:b", ItemKind::File, Arc::new(ScriptedItem::correct()));
    dep(&mut b, "file:a");

    let err = cvg_resolver::prepare(vec![a, b]).expect_err("a->b->a is a cycle");
    let message = err.to_string();
    assert!(message.contains("file:a"), "cycle diagnostic must name file:a: {message}");
    assert!(message.contains("file:b"), "cycle diagnostic must name file:b: {message}");
}

/// S5/S6: lock contention on the same node, first without then with
/// `force`, run through the full `cvg_engine::apply` (lock + engine +
/// hooks), not `apply_node` alone.
#[tokio::test]
async fn s5_s6_lock_contention_without_then_with_force() {
    let transport = Arc::new(FakeTransport::new());
    transport.on(
        &format!("mkdir '{}'", cvg_engine::DEFAULT_LOCK_PATH),
        CommandResult { return_code: 1, ..Default::default() },
    );
    transport.on(
        &format!("cat '{}/info'", cvg_engine::DEFAULT_LOCK_PATH),
        CommandResult::ok(r#"{"user":"bob","date":1.0,"host":"other run"}"#),
    );

    let clock = FakeClock::new();

    let items = vec![scripted_record("file:a", ItemKind::File, Arc::new(ScriptedItem::correct()))];
    let unforced = cvg_engine::apply(
        "node1",
        items,
        transport.clone(),
        &clock,
        1,
        false,
        false,
        Arc::new(NonInteractive),
        "alice",
        "build01",
        &cvg_engine::TracingHooks,
    )
    .await
    .expect("contention without force is not an engine error");
    assert_eq!(unforced.total(), 0);
    assert!(unforced.good());

    let items = vec![scripted_record("file:a", ItemKind::File, Arc::new(ScriptedItem::correct()))];
    let forced = cvg_engine::apply(
        "node1",
        items,
        transport.clone(),
        &clock,
        1,
        false,
        true,
        Arc::new(NonInteractive),
        "alice",
        "build01",
        &cvg_engine::TracingHooks,
    )
    .await
    .expect("force proceeds past contention");
    assert_eq!(forced.correct(), 1);

    assert!(transport
        .calls()
        .iter()
        .any(|c| matches!(c, cvg_transport::test_support::Recorded::Run(cmd) if cmd.starts_with("rm -R"))));
}

/// S7: an action expecting return code 0 gets 1 back; it fails and its
/// dependent (`cascade_skip=true`) is never dispatched.
#[tokio::test]
async fn s7_action_unexpected_return_code_cascades() {
    let transport = Arc::new(FakeTransport::new());
    transport.on("exit 1", CommandResult { return_code: 1, ..Default::default() });

    let mut action = Action::new("fail-on-purpose", "exit 1");
    action.expected_return_code = Some(0);
    let action_record = scripted_record("action:fail-on-purpose", ItemKind::Action, Arc::new(action));

    let dependent = ScriptedItem::correct();
    let mut dependent_record = scripted_record("file:after", ItemKind::File, Arc::new(dependent));
    dep(&mut dependent_record, "action:fail-on-purpose");

    let items = cvg_resolver::prepare(vec![action_record, dependent_record]).expect("no cycle");

    let clock = FakeClock::new();
    let result = cvg_engine::apply_node("node1", items, transport, &clock, 1, false, Arc::new(NonInteractive))
        .await
        .expect("cascade drains the frontier");

    let action_status = result
        .outcomes()
        .iter()
        .find(|(id, _)| id.as_str() == "action:fail-on-purpose")
        .map(|(_, status)| *status)
        .expect("action result must be emitted");
    assert_eq!(action_status, cvg_core::StatusCode::ActionFailed);

    let dependent_status = result
        .outcomes()
        .iter()
        .find(|(id, _)| id.as_str() == "file:after")
        .map(|(_, status)| *status)
        .expect("dependent result must be emitted");
    assert_eq!(dependent_status, cvg_core::StatusCode::Skipped);
}

/// Loads a node straight out of authored HCL (spec.md §4.7) and drives
/// it through the real resolver/engine, exercising the author-facing
/// front end the CLI uses rather than hand-built `ItemRecord`s.
#[tokio::test]
async fn repo_loaded_node_converges_through_the_full_pipeline() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(
        dir.path().join("site.hcl"),
        r#"
bundle "base" {
  directory "/srv/app" {
    mode  = "0755"
    owner = "root"
    group = "root"
  }

  action "seed" {
    command = "seed-app"
    needs   = ["directory:"]
  }
}

node "web01" {
  hostname = "web01.internal"
  bundles  = ["base"]
}
"#,
    )
    .expect("write hcl");

    let repo = cvg_repo::load_repo(dir.path()).expect("repo loads");
    let node = cvg_repo::materialize_node(&repo, "web01").expect("node materializes");

    let transport = Arc::new(FakeTransport::new());
    transport.on(
        "test -d '/srv/app'",
        CommandResult::ok(""),
    );
    transport.on(
        "stat -c '%a %U %G' '/srv/app'",
        CommandResult::ok("755 root root"),
    );
    transport.on("seed-app", CommandResult::ok(""));

    let items = cvg_resolver::prepare(node.items).expect("needs resolves against the directory");
    let clock = FakeClock::new();
    let result = cvg_engine::apply_node(&node.id, items, transport, &clock, 1, false, Arc::new(NonInteractive))
        .await
        .expect("no cycle in a single bundle");

    assert_eq!(result.correct(), 1, "directory already matches desired state");
    let action_status = result
        .outcomes()
        .iter()
        .find(|(id, _)| id.as_str() == "action:seed")
        .map(|(_, status)| *status)
        .expect("action result must be emitted");
    assert_eq!(action_status, cvg_core::StatusCode::ActionOk);
}
