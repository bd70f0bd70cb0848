use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn invalid_enum_value_for_format_yields_error() {
    let mut cmd = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd.arg("neighborhood").arg("--format").arg("nope");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'nope' for '--format"))
        .stderr(predicate::str::contains("[possible values: text, json]"));
}

#[test]
fn invalid_fallback_policy_yields_error() {
    let mut cmd = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd.arg("render").arg("--fallback").arg("random");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("[possible values: smallest, fail]"));
}

#[test]
fn completions_are_generated() {
    let mut cmd = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd.arg("completions").arg("bash");
    cmd.assert().success().stdout(predicate::str::contains("movie-kg-dashboard"));
}
