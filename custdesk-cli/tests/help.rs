use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("custdesk");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("custdesk"))
        .stdout(contains("customers"))
        .stdout(contains("posts"));
}

#[test]
fn form_help_lists_data_and_output() {
    let mut cmd = cargo::cargo_bin_cmd!("custdesk");
    cmd.args(["form", "--help"])
        .assert()
        .success()
        .stdout(contains("--data"))
        .stdout(contains("--output"));
}

#[test]
fn rejects_invalid_initial_data() {
    let mut cmd = cargo::cargo_bin_cmd!("custdesk");
    cmd.args(["form", "--data", "{not json"])
        .assert()
        .failure()
        .stderr(contains("failed to parse initial data"));
}
