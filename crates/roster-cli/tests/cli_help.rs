use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("roster")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_serve_help_shows_overrides() {
    cargo_bin_cmd!("roster")
        .args(["serve", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--port"))
        .stdout(predicate::str::contains("--data"))
        .stdout(predicate::str::contains("--origin"))
        .stdout(predicate::str::contains("--static-dir"));
}

#[test]
fn test_browse_help_shows_base_url() {
    cargo_bin_cmd!("roster")
        .args(["browse", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("roster")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
