use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    let mut f = fs::File::create(path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
}

#[test]
fn render_quiet_suppresses_non_essential_output() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(
        &root.join("hybrid_recommendations.json"),
        r#"{"user_id":"User_1","recommendations":[]}"#,
    );
    write_file(&root.join("evaluation_results.json"), r#"{"mean_hybrid":0.1,"mean_gcn":0.1}"#);

    let mut cmd_no_quiet = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd_no_quiet.arg("render").arg("-d").arg(root).arg("-o").arg(root.join("a.html"));
    cmd_no_quiet.assert().success().stdout(predicate::str::contains("Dashboard written to"));

    let mut cmd_quiet = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd_quiet.arg("-q").arg("render").arg("-d").arg(root).arg("-o").arg(root.join("b.html"));
    cmd_quiet.assert().success().stdout(predicate::str::is_empty());
    assert!(root.join("b.html").exists());
}

#[test]
fn skipped_export_warning_follows_log_level() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_file(
        &root.join("hybrid_recommendations.json"),
        r#"{"user_id":"User_1","recommendations":[]}"#,
    );
    write_file(&root.join("evaluation_results.json"), r#"{"mean_hybrid":0.1,"mean_gcn":0.1}"#);

    // No graph file, so the --json export has nothing to write
    let mut loud = Command::cargo_bin("movie-kg-dashboard").unwrap();
    loud.env_remove("RUST_LOG")
        .arg("render")
        .arg("-d")
        .arg(root)
        .arg("-o")
        .arg(root.join("a.html"))
        .arg("--json")
        .arg(root.join("a.json"));
    loud.assert().success().stderr(predicate::str::contains("skipping neighborhood export"));

    let mut quiet = Command::cargo_bin("movie-kg-dashboard").unwrap();
    quiet
        .env_remove("RUST_LOG")
        .arg("-q")
        .arg("render")
        .arg("-d")
        .arg(root)
        .arg("-o")
        .arg(root.join("b.html"))
        .arg("--json")
        .arg(root.join("b.json"));
    quiet.assert().success().stderr(predicate::str::is_empty());
    assert!(!root.join("b.json").exists());
    assert!(root.join("b.html").exists());
}
