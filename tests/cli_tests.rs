//! CLI integration tests (offline pages only, no network)
use std::fs;
use std::path::Path;

use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::cargo::cargo_bin_cmd!("wiki-wordfreq")
}

fn write_page(dir: &Path, file: &str, body: &str) {
    let html = format!(
        concat!(
            r#"<html><body><div id="mw-content-text">{}"#,
            "<table><tr><td>infobox noise</td></tr></table>",
            "</div></body></html>",
        ),
        body
    );
    fs::write(dir.join(file), html).unwrap();
}

/// Lugia links to Ho-Oh, which links back.
fn wiki() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_page(
        dir.path(),
        "Lugia.html",
        r#"<p>Lugia is the guardian of the seas. See <a href="/wiki/Ho-Oh">Ho-Oh</a>.</p>"#,
    );
    write_page(
        dir.path(),
        "Ho-Oh.html",
        r#"<p>Ho-Oh is the partner of <a href="/wiki/Lugia">Lugia</a>.</p>"#,
    );
    dir
}

fn baseline(dir: &Path) -> String {
    let path = dir.join("en.json");
    fs::write(&path, r#"{"the": 0.05, "of": 0.03, "is": 0.01, "see": 0.001}"#).unwrap();
    path.to_string_lossy().into_owned()
}

fn store_counts(store: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(store).unwrap()).unwrap()
}

#[test]
fn test_summary_prints_first_paragraph() {
    let wiki = wiki();
    let store = wiki.path().join("counts.json");

    cmd()
        .args(["summary", "Lugia", "--offline-dir"])
        .arg(wiki.path())
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Lugia is the guardian of the seas"))
        .stdout(predicate::str::contains("infobox").not());

    assert!(!store.exists());
}

#[test]
fn test_summary_missing_article() {
    let wiki = wiki();

    cmd()
        .args(["summary", "Missingno", "--offline-dir"])
        .arg(wiki.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Could not load page"));
}

#[test]
fn test_count_single_article() {
    let wiki = wiki();
    let store = wiki.path().join("counts.json");

    cmd()
        .args(["count", "Lugia", "--offline-dir"])
        .arg(wiki.path())
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Counted"));

    let counts = store_counts(&store);
    assert_eq!(counts["lugia"], 1);
    assert_eq!(counts["the"], 2);
    assert!(counts.get("infobox").is_none());
}

#[test]
fn test_count_twice_doubles() {
    let wiki = wiki();
    let store = wiki.path().join("counts.json");

    for _ in 0..2 {
        cmd()
            .args(["count", "Lugia", "--offline-dir"])
            .arg(wiki.path())
            .arg("--store")
            .arg(&store)
            .assert()
            .success();
    }

    assert_eq!(store_counts(&store)["the"], 4);
}

#[test]
fn test_count_missing_article() {
    let wiki = wiki();
    let store = wiki.path().join("counts.json");

    cmd()
        .args(["count", "Missingno", "--offline-dir"])
        .arg(wiki.path())
        .arg("--store")
        .arg(&store)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Could not load page"));

    assert!(!store.exists());
}

#[test]
fn test_crawl_follows_links() {
    let wiki = wiki();
    let store = wiki.path().join("counts.json");

    cmd()
        .args(["crawl", "Lugia", "--depth", "1", "--wait", "0", "--offline-dir"])
        .arg(wiki.path())
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("Ho-Oh"));

    let counts = store_counts(&store);
    assert_eq!(counts["lugia"], 2);
    assert_eq!(counts["partner"], 1);
}

#[test]
fn test_crawl_rejects_zero_concurrency() {
    let wiki = wiki();

    cmd()
        .args(["crawl", "Lugia", "--concurrency", "0", "--offline-dir"])
        .arg(wiki.path())
        .arg("--store")
        .arg(wiki.path().join("counts.json"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("concurrency"));
}

#[test]
fn test_analyze_json_output() {
    let wiki = wiki();
    let store = wiki.path().join("counts.json");
    fs::write(&store, r#"{"the": 6, "lugia": 3, "xyzzy": 1}"#).unwrap();

    let output = cmd()
        .args(["analyze", "--mode", "article", "--count", "2", "--json", "--baseline"])
        .arg(baseline(wiki.path()))
        .arg("--store")
        .arg(&store)
        .output()
        .unwrap();

    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows[0]["word"], "the");
    assert_eq!(rows[0]["article_frequency"], 1.0);
    assert_eq!(rows[1]["word"], "lugia");
    assert!(rows[1]["baseline_frequency"].is_null());
}

#[test]
fn test_analyze_without_counts() {
    let wiki = wiki();

    cmd()
        .args(["analyze", "--mode", "language", "--count", "3", "--baseline"])
        .arg(baseline(wiki.path()))
        .arg("--store")
        .arg(wiki.path().join("empty.json"))
        .assert()
        .code(1)
        .stdout(predicate::str::contains("No word counts found"));
}

#[test]
fn test_score() {
    let wiki = wiki();
    let store = wiki.path().join("counts.json");
    fs::write(&store, r#"{"the": 5, "xyzzy": 2}"#).unwrap();

    cmd()
        .args(["score", "--top-k", "1", "--baseline"])
        .arg(baseline(wiki.path()))
        .arg("--store")
        .arg(&store)
        .assert()
        .success()
        .stdout(predicate::str::contains("71.43%"));
}
