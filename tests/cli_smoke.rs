//! CLI surface smoke tests.

mod support;

use predicates::prelude::*;
use support::TestStore;

#[test]
fn help_lists_subcommands() {
    let fixture = TestStore::init();
    fixture
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("log"))
        .stdout(predicate::str::contains("current"));
}

#[test]
fn missing_store_is_a_user_error() {
    let fixture = TestStore::init();
    let mut cmd = assert_cmd::Command::cargo_bin("dayplan").unwrap();
    cmd.current_dir(fixture.path())
        .arg("--store")
        .arg(fixture.path().join("nowhere"))
        .args(["current", "demo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Store not initialized"));
}

#[test]
fn unknown_project_is_a_user_error() {
    let fixture = TestStore::init();
    fixture
        .cmd()
        .args(["current", "ghost"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Project not found"));
}

#[test]
fn bad_start_date_is_rejected() {
    let fixture = TestStore::init();
    fixture.create_demo_project();
    fixture
        .cmd()
        .args(["start", "demo", "--date", "01/08/2024"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid start date"));
}

#[test]
fn json_errors_carry_the_envelope() {
    let fixture = TestStore::init();
    fixture
        .cmd()
        .args(["--json", "current", "ghost"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"schema_version\": \"dayplan.v1\""))
        .stdout(predicate::str::contains("\"status\": \"error\""))
        .stdout(predicate::str::contains("\"kind\": \"user_error\""));
}
