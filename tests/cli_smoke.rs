//! CLI smoke tests for the offline subcommands.

use assert_cmd::Command;
use predicates::prelude::*;

fn anirate() -> Command {
    Command::cargo_bin("anirate").expect("anirate binary")
}

#[test]
fn palette_lists_all_nine_labels_in_display_order() {
    let assert = anirate().arg("palette").assert().success();
    let output = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    let labels = [
        "garbage",
        "broken",
        "weak",
        "inconsistent",
        "whatever",
        "acceptable",
        "solid",
        "stunning",
        "generational",
    ];
    let mut last = 0;
    for label in labels {
        let pos = output.find(label).unwrap_or_else(|| panic!("missing {label}"));
        assert!(pos >= last, "{label} out of display order");
        last = pos;
    }
}

#[test]
fn palette_json_is_well_formed() {
    let assert = anirate().args(["palette", "--json"]).assert().success();
    let output = assert.get_output().stdout.clone();
    let entries: Vec<serde_json::Value> = serde_json::from_slice(&output).unwrap();

    assert_eq!(entries.len(), 9);
    assert_eq!(entries[0]["label"], "garbage");
    assert_eq!(entries[0]["ordinal"], 1);
    assert_eq!(entries[0]["color"], "#ff0000");
    // Display order puts broken second even though its ordinal is 3.
    assert_eq!(entries[1]["label"], "broken");
    assert_eq!(entries[1]["ordinal"], 3);
}

#[test]
fn whoami_defaults_to_signed_out() {
    let tmp = tempfile::TempDir::new().unwrap();
    anirate()
        .args(["whoami", "--data-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign In"))
        .stdout(predicate::str::contains("token:    none"));
}

#[test]
fn whoami_reads_cookie_state() {
    let tmp = tempfile::TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("cookies.txt"),
        "token=abc; username=kira; user_id=42",
    )
    .unwrap();

    anirate()
        .args(["whoami", "--data-dir"])
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("kira"))
        .stdout(predicate::str::contains("42"))
        .stdout(predicate::str::contains("token:    present"));
}

#[test]
fn completions_generate_for_bash() {
    anirate()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("anirate"));
}

#[test]
fn bad_config_path_fails_with_context() {
    anirate()
        .args(["--config", "/definitely/not/here.toml", "palette"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("here.toml"));
}
