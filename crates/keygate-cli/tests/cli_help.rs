use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("keygate")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("register"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("token"));
}

#[test]
fn test_login_help_shows_flags() {
    cargo_bin_cmd!("keygate")
        .args(["login", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--email"))
        .stdout(predicate::str::contains("--password"))
        .stdout(predicate::str::contains("--no-open"))
        .stdout(predicate::str::contains("KEYGATE_PASSWORD"));
}

#[test]
fn test_login_requires_email() {
    cargo_bin_cmd!("keygate")
        .args(["login", "--password", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--email"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("keygate")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
