use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

fn write_file(path: &PathBuf, content: &str) {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let mut f = fs::File::create(path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
}

fn write_inputs(dir: &Path) {
    write_file(
        &dir.join("hybrid_recommendations.json"),
        r#"{"user_id":"User_1","recommendations":["Inception","Arrival"],"movie_descriptions":{"Inception":"A heist..."}}"#,
    );
    write_file(&dir.join("evaluation_results.json"), r#"{"mean_hybrid":0.412,"mean_gcn":0.327}"#);
    write_file(
        &dir.join("knowledge_graph.json"),
        r#"{"directed":true,"multigraph":true,
            "nodes":[{"id":"User_1"},{"id":"Inception"},{"id":"Sci-Fi"},{"id":"Arrival"}],
            "links":[
              {"source":"User_1","target":"Inception","label":"rated","key":0},
              {"source":"Inception","target":"Sci-Fi","label":"belongs_to","key":0},
              {"source":"User_1","target":"Arrival","label":"watched","key":0}
            ]}"#,
    );
    write_file(&dir.join("movie_nodes.json"), r#"["Inception","Arrival"]"#);
}

#[test]
fn render_writes_dashboard_with_all_panels() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_inputs(root);
    let out = root.join("dashboard.html");

    let mut cmd = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd.arg("render").arg("--data-dir").arg(root).arg("--out").arg(&out);
    cmd.assert().success().stdout(predicate::str::contains("Dashboard written to"));

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("System Overview"));
    assert!(html.contains("<strong>Hybrid Precision@10</strong>: 0.412"));
    assert!(html.contains("<strong>1. Inception</strong>"));
    assert!(html.contains("<strong>Plot / Description</strong>: No description available."));
    assert!(html.contains("Interactive subgraph centered on User_1"));
    assert!(html.contains("\"color\":\"#32CD32\""));
    assert!(!html.contains("Could not load KG"));
    assert!(html.contains("How It Works"));
}

#[test]
fn render_without_graph_files_shows_inline_error() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_inputs(root);
    fs::remove_file(root.join("knowledge_graph.json")).unwrap();
    let out = root.join("dashboard.html");

    let mut cmd = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd.arg("render").arg("--data-dir").arg(root).arg("--out").arg(&out);
    cmd.assert().success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("Could not load KG: Missing input file"));
    assert!(html.contains("Make sure the knowledge graph and movie node files exist."));
    assert!(html.contains("<strong>2. Arrival</strong>"));
}

#[test]
fn render_without_recommendations_fails() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write_inputs(root);
    fs::remove_file(root.join("hybrid_recommendations.json")).unwrap();
    let out = root.join("dashboard.html");

    let mut cmd = Command::cargo_bin("movie-kg-dashboard").unwrap();
    cmd.arg("render").arg("--data-dir").arg(root).arg("--out").arg(&out);
    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing input file"))
        .stderr(predicate::str::contains("hybrid_recommendations.json"));
    assert!(!out.exists());
}
