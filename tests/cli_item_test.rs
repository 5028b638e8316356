//! Integration tests for item lifecycle commands via the CLI:
//! add, mark, complete, and delete.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Add Tests ===

#[test]
fn test_add_creates_item() {
    let env = TestEnv::new();

    env.bj()
        .args(["add", "Buy milk", "--status", "incomplete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk"))
        .stdout(predicate::str::contains("Added item"));
}

#[test]
fn test_add_accepts_symbols() {
    let env = TestEnv::new();

    env.bj()
        .args(["add", "Dentist", "-s", "o", "--signifier", "*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added item"));
}

#[test]
fn test_add_rejects_unknown_status() {
    let env = TestEnv::new();

    env.bj()
        .args(["add", "Buy milk", "--status", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid state"));
}

#[test]
fn test_add_rejects_prefix_status() {
    let env = TestEnv::new();

    // Prefix matching is for list filters and mark, not add.
    env.bj()
        .args(["add", "Buy milk", "--status", "comp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid state"));
}

#[test]
fn test_add_with_time_renders_schedule() {
    let env = TestEnv::new();

    env.bj()
        .args([
            "add",
            "Dentist",
            "-s",
            "event",
            "-t",
            "2030-06-09 14:05",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sunday, June 9, 2030 at 2:05 PM"));
}

#[test]
fn test_add_rejects_unparseable_time() {
    let env = TestEnv::new();

    env.bj()
        .args(["add", "Dentist", "-s", "event", "-t", "someday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized time"));
}

#[test]
fn test_add_rejects_missing_parent() {
    let env = TestEnv::new();

    env.bj()
        .args(["add", "Child", "-s", ".", "-p", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item 42 not found"));
}

// === Mark Tests ===

#[test]
fn test_mark_status_by_prefix() {
    let env = TestEnv::new();
    env.add("Buy milk", "incomplete");

    env.bj()
        .args(["mark", "comp", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked item 1 as complete"));
}

#[test]
fn test_mark_signifier_and_clear() {
    let env = TestEnv::new();
    env.add("Buy milk", "incomplete");

    env.bj()
        .args(["mark", "*", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked item 1 as priority"));

    env.bj()
        .args(["mark", "none", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared signifier for item 1"));
}

#[test]
fn test_mark_missing_item() {
    let env = TestEnv::new();

    env.bj()
        .args(["mark", "x", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item 9 not found"));
}

#[test]
fn test_mark_invalid_token_lists_options() {
    let env = TestEnv::new();
    env.add("Buy milk", "incomplete");

    env.bj()
        .args(["mark", "zz", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid choice"))
        .stderr(predicate::str::contains("incomplete"))
        .stderr(predicate::str::contains("priority"));
}

// === Complete Sweep Tests ===

#[test]
fn test_complete_sweeps_past_items() {
    let env = TestEnv::new();

    env.bj()
        .args(["add", "Past", "-s", ".", "-t", "2020-01-01 09:00"])
        .assert()
        .success();
    env.add("Untimed", "incomplete");

    env.bj()
        .args(["complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed 1 items"));

    // A second sweep finds nothing left to do.
    env.bj()
        .args(["complete"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All past items are complete"));
}

// === Delete Tests ===

#[test]
fn test_delete_prints_subtree_and_cascades() {
    let env = TestEnv::new();
    env.add("Parent", "incomplete");
    env.bj()
        .args(["add", "Child", "-s", "-", "-p", "1"])
        .assert()
        .success();

    env.bj()
        .args(["delete", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parent"))
        .stdout(predicate::str::contains("Child"))
        .stdout(predicate::str::contains("Deleted item 1"));

    // Both the parent and its child are gone.
    env.bj()
        .args(["mark", "x", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item 2 not found"));
}

#[test]
fn test_delete_missing_item() {
    let env = TestEnv::new();

    env.bj()
        .args(["delete", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Item 7 not found"));
}

// === Verbose Mode Tests ===

#[test]
fn test_verbose_flag_appends_values() {
    let env = TestEnv::new();

    env.bj()
        .args(["-v", "add", "Buy milk", "--status", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains(". (incomplete)"));
}

#[test]
fn test_verbose_env_var() {
    let env = TestEnv::new();

    env.bj()
        .env("BUJO_VERBOSE", "1")
        .args(["add", "Buy milk", "--status", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains(". (incomplete)"));
}

// === Info Tests ===

#[test]
fn test_info_shows_legend() {
    let env = TestEnv::new();

    env.bj()
        .args(["info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("States"))
        .stdout(predicate::str::contains("incomplete"))
        .stdout(predicate::str::contains("Signifiers"))
        .stdout(predicate::str::contains("inspiration"))
        .stdout(predicate::str::contains("Verbose mode is"));
}
