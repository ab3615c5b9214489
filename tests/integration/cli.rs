//! Tests for the `jsp-insights` binary.

use assert_cmd::Command;
use jsp_insights::constants::{DEEP_OUTPUT_FILE, RAW_OUTPUT_FILE, SHALLOW_OUTPUT_FILE};
use jsp_insights::graph::DeepNode;
use jsp_insights::test_utils::CorpusFixture;
use predicates::prelude::*;

fn jsp_insights(corpus: &CorpusFixture) -> Command {
    let config = corpus.write_config().unwrap();
    let mut cmd = Command::cargo_bin("jsp-insights").unwrap();
    cmd.current_dir(corpus.root()).env_remove("RUST_LOG").arg("--config").arg(config);
    cmd
}

#[test]
fn test_deep_writes_output_files() {
    let corpus = CorpusFixture::sample().unwrap();

    jsp_insights(&corpus)
        .arg("deep")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 tree(s) written"));

    let output = corpus.output_dir();
    assert!(output.join(SHALLOW_OUTPUT_FILE).exists());
    assert!(output.join(DEEP_OUTPUT_FILE).exists());
    assert!(!output.join(RAW_OUTPUT_FILE).exists());
}

#[test]
fn test_output_dir_override() {
    let corpus = CorpusFixture::sample().unwrap();
    let elsewhere = corpus.root().join("elsewhere");

    jsp_insights(&corpus)
        .arg("raw")
        .arg("--output-dir")
        .arg(&elsewhere)
        .assert()
        .success();

    assert!(elsewhere.join(RAW_OUTPUT_FILE).exists());
    assert!(!corpus.output_dir().join(RAW_OUTPUT_FILE).exists());
}

#[test]
fn test_deep_summary_is_json() {
    let corpus = CorpusFixture::sample().unwrap();

    let output = jsp_insights(&corpus).args(["deep", "--summary"]).assert().success();
    let summary: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(summary["pages"], 4);
    assert_eq!(summary["unresolved"], 1);
}

#[test]
fn test_quiet_suppresses_result_lines() {
    let corpus = CorpusFixture::sample().unwrap();

    jsp_insights(&corpus)
        .args(["--quiet", "shallow"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_tree_text_marks_cycles() {
    let corpus = CorpusFixture::sample().unwrap();

    jsp_insights(&corpus)
        .args(["tree", "USBC/Cart.jsp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("├── "))
        .stdout(predicate::str::contains("Header.jspf"))
        .stdout(predicate::str::contains("(circular, first included at depth 0)"));
}

#[test]
fn test_tree_json_is_parseable() {
    let corpus = CorpusFixture::sample().unwrap();
    let cart = corpus.page_key("USBC/Cart.jsp");

    let output = jsp_insights(&corpus).args(["tree", &cart, "--format", "json"]).assert().success();
    let tree: DeepNode = serde_json::from_slice(&output.get_output().stdout).unwrap();

    assert_eq!(tree.path, cart);
    assert_eq!(tree.nested.len(), 2);
}

#[test]
fn test_tree_depth_limit() {
    let corpus = CorpusFixture::sample().unwrap();

    jsp_insights(&corpus)
        .args(["tree", "USBC/Cart.jsp", "--depth", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logo.jsp").not());
}

#[test]
fn test_tree_unknown_page_fails() {
    let corpus = CorpusFixture::sample().unwrap();

    jsp_insights(&corpus)
        .args(["tree", "Nowhere.jsp"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nowhere.jsp"));
}

#[test]
fn test_invalid_format_fails() {
    let corpus = CorpusFixture::sample().unwrap();

    jsp_insights(&corpus)
        .args(["tree", "USBC/Cart.jsp", "--format", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown output format 'yaml'"));
}

#[test]
fn test_missing_stores_dir_fails_with_suggestion() {
    let corpus = CorpusFixture::sample().unwrap();

    jsp_insights(&corpus)
        .args(["raw", "--stores-dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stores directory not found"))
        .stderr(predicate::str::contains("stores_dir"));
}

#[test]
fn test_missing_config_fails() {
    let corpus = CorpusFixture::sample().unwrap();

    Command::cargo_bin("jsp-insights")
        .unwrap()
        .current_dir(corpus.root())
        .args(["--config", "absent.toml", "raw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}
