use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("Cargo.toml"),
        "[package]\nname = \"acme\"\nversion = \"0.1.0\"\n",
    )
    .unwrap();
    let src = temp.path().join("src");
    fs::create_dir_all(&src).unwrap();
    fs::write(
        src.join("db.rs"),
        "// @factory: new_db -> db\npub fn new_db() {}\n",
    )
    .unwrap();
    temp
}

#[test]
fn prints_generated_source_to_stdout() {
    let temp = project();

    Command::cargo_bin("wireup")
        .unwrap()
        .arg(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn wire()"))
        .stdout(predicate::str::contains("new_db"));
}

#[test]
fn writes_generated_source_to_output_file() {
    let temp = project();
    let out = temp.path().join("wired.rs");

    Command::cargo_bin("wireup")
        .unwrap()
        .arg(temp.path())
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    let generated = fs::read_to_string(&out).unwrap();
    assert!(generated.starts_with("// Code generated by wireup."));
    assert!(generated.contains("pub fn wire()"));
}

#[test]
fn fails_on_a_rootless_directory() {
    let temp = TempDir::new().unwrap();

    Command::cargo_bin("wireup")
        .unwrap()
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Manifest"));
}
