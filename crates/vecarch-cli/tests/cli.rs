//! End-to-end tests for the `vecarch` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn vecarch() -> Command {
    let mut cmd = Command::cargo_bin("vecarch").expect("binary builds");
    cmd.env_remove("VECARCH_DISABLED")
        .env_remove("VECARCH_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_json_lists_every_snapshot_field() {
    vecarch()
        .arg("json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sse2\""))
        .stdout(predicate::str::contains("\"fma3_avx2\""))
        .stdout(predicate::str::contains("\"neon64\""));
}

#[test]
fn test_disable_reports_false_in_json() {
    vecarch()
        .args(["--disable", "sse2", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sse2\": false"))
        .stdout(predicate::str::contains("\"avx512f\": false"));
}

#[test]
fn test_check_unknown_tag_is_an_error() {
    vecarch()
        .args(["check", "mmx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown architecture tag `mmx`"));
}

#[test]
fn test_check_disabled_tag_fails() {
    vecarch()
        .args(["check", "ssse3", "--disable", "ssse3"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("unavailable"));
}

#[test]
fn test_best_prints_a_tag_or_none() {
    vecarch()
        .arg("best")
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_list_shows_the_catalogue() {
    vecarch()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Builds on"))
        .stdout(predicate::str::contains("fma3+avx2"))
        .stdout(predicate::str::contains("sve512"));
}

#[test]
fn test_list_available_hides_disabled_tags() {
    vecarch()
        .args(["list", "--available", "--disable", "sse2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sse4.1").not());
}

#[test]
fn test_config_file_masks_tags() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "disabled = [\"sse3\"]").expect("write config");

    vecarch()
        .arg("--config")
        .arg(file.path())
        .args(["check", "sse3"])
        .assert()
        .code(1);
}

#[test]
fn test_environment_masks_tags() {
    vecarch()
        .env("VECARCH_DISABLED", "sse4.1")
        .args(["check", "sse4.2"])
        .assert()
        .code(1);
}

#[test]
fn test_invalid_config_file_fails() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "disabled = 42").expect("write config");

    vecarch()
        .arg("--config")
        .arg(file.path())
        .arg("best")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}
