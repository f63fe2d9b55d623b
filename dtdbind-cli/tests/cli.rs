use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn dtdbind() -> Command {
    let mut cmd = cargo_bin_cmd!("dtdbind");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn generates_go_to_stdout_with_progress_on_stderr() {
    let mut cmd = dtdbind();
    cmd.arg("--input")
        .arg(fixture_path("bookstore.dtd"))
        .arg("--target")
        .arg("go");

    let stdout = predicate::str::starts_with("package main\n")
        .and(predicate::str::contains("type Bookstore struct {"))
        .and(predicate::str::contains("\tAuthor []string `xml:\"author,omitempty\"`"))
        .and(predicate::str::contains("\tCurrency string `xml:\"currency,attr,omitempty\"`"))
        .and(predicate::str::contains("Parsing DTD file").not());
    let stderr = predicate::str::contains("Parsing DTD file")
        .and(predicate::str::contains("Found 5 elements in DTD file"))
        .and(predicate::str::contains("  - bookstore"));

    cmd.assert().success().stdout(stdout).stderr(stderr);
}

#[test]
fn rust_is_the_default_target() {
    let mut cmd = dtdbind();
    cmd.arg("-i").arg(fixture_path("bookstore.dtd"));

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("pub mod main {\n"))
        .stdout(predicate::str::contains("pub author: Vec<String>,"));
}

#[test]
fn writes_output_file_and_creates_directories() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("generated").join("models").join("bookstore.go");

    let mut cmd = dtdbind();
    cmd.arg("-i")
        .arg(fixture_path("bookstore.dtd"))
        .arg("-o")
        .arg(&output)
        .arg("-p")
        .arg("models")
        .arg("-t")
        .arg("go");

    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("written to"));

    let written = fs::read_to_string(&output).expect("output written");
    assert!(written.starts_with("package models\n"));
    assert!(written.contains("type Book struct {"));
}

#[test]
fn missing_input_flag_fails() {
    dtdbind().assert().failure();
}

#[test]
fn unreadable_input_fails() {
    let dir = tempdir().expect("temp dir");

    let mut cmd = dtdbind();
    cmd.arg("-i").arg(dir.path().join("missing.dtd"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: failed to open"));
}

#[test]
fn unknown_target_fails() {
    let mut cmd = dtdbind();
    cmd.arg("-i")
        .arg(fixture_path("bookstore.dtd"))
        .arg("-t")
        .arg("cobol");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown target 'cobol'"));
}

#[test]
fn grammar_without_elements_is_not_an_error() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("never.rs");

    let mut cmd = dtdbind();
    cmd.arg("-i")
        .arg(fixture_path("comments-only.dtd"))
        .arg("-o")
        .arg(&output);

    cmd.assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No elements found in DTD file"));
    assert!(!output.exists());
}

#[test]
fn lists_targets() {
    let mut cmd = dtdbind();
    cmd.arg("--list-targets");

    cmd.assert().success().stdout(
        predicate::str::contains("  go (.go)")
            .and(predicate::str::contains("  json (.json)"))
            .and(predicate::str::contains("  rust (.rs)")),
    );
}

#[test]
fn config_file_is_layered_under_flags() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("dtdbind.toml");
    fs::write(
        &config,
        "[output]\npackage = \"fromconfig\"\ntarget = \"go\"\n\n[generation]\ndoc-comments = false\n",
    )
    .expect("write config");

    let mut from_file = dtdbind();
    from_file
        .arg("-i")
        .arg(fixture_path("bookstore.dtd"))
        .arg("-c")
        .arg(&config);
    from_file.assert().success().stdout(
        predicate::str::starts_with("package fromconfig\n")
            .and(predicate::str::contains("represents the").not()),
    );

    let mut with_flag = dtdbind();
    with_flag
        .arg("-i")
        .arg(fixture_path("bookstore.dtd"))
        .arg("-c")
        .arg(&config)
        .arg("-p")
        .arg("fromflag");
    with_flag
        .assert()
        .success()
        .stdout(predicate::str::starts_with("package fromflag\n"));
}

#[test]
fn invalid_config_fails() {
    let dir = tempdir().expect("temp dir");
    let config = dir.path().join("dtdbind.toml");
    fs::write(&config, "[generation]\nchoice-cardinality = \"sometimes\"\n").expect("write config");

    let mut cmd = dtdbind();
    cmd.arg("-i")
        .arg(fixture_path("bookstore.dtd"))
        .arg("-c")
        .arg(&config);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error: invalid configuration"));
}

#[test]
fn quiet_suppresses_progress() {
    let mut cmd = dtdbind();
    cmd.arg("-q").arg("-i").arg(fixture_path("bookstore.dtd"));

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Parsing DTD file").not());
}
