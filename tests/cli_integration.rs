//! CLI integration tests.
//!
//! Spawns the `json-structgen` binary against the fixtures in
//! `tests/fixtures` and checks stdout, stderr and exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn structgen() -> Command {
    cargo_bin_cmd!("json-structgen")
}

// ──────────────────────────────────────────────
// rust
// ──────────────────────────────────────────────

#[test]
fn book_fixture_emits_children_before_root() {
    let output = structgen()
        .arg("rust")
        .arg(fixture("book.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let src = String::from_utf8(output).unwrap();

    let order: Vec<usize> = ["pub struct Quote {", "pub struct Bid {", "pub struct Trade {", "pub struct NewTypeRenameMe {"]
        .iter()
        .map(|decl| src.find(decl).unwrap_or_else(|| panic!("missing `{decl}` in:\n{src}")))
        .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{src}");

    assert!(src.contains("  pub company_name: String,\n"));
    assert!(src.contains("  #[serde(rename = \"isUSMarketOpen\")]\n  pub is_us_market_open: bool,\n"), "{src}");
    assert!(!src.contains("pe_ratio"));
    assert!(src.contains("  pub asks: Vec<serde_json::Value>,\n"));
    assert!(src.contains("  pub trades: Vec<Trade>,\n"));
    assert!(src.contains("pub struct Trade {\n  pub price: f64,\n  pub size: f64,\n"));
}

#[test]
fn degraded_fields_are_logged_as_warnings() {
    structgen()
        .arg("rust")
        .arg(fixture("book.json"))
        .assert()
        .success()
        .stderr(predicate::str::contains("/quote/peRatio: null value, field omitted"))
        .stderr(predicate::str::contains("/asks: no element to sample"));
}

#[test]
fn array_root_uses_array_placeholder() {
    structgen()
        .args(["rust", "--prelude"])
        .arg(fixture("array_root.json"))
        .assert()
        .success()
        .stdout(predicate::str::starts_with("use serde::{Deserialize, Serialize};"))
        .stdout(predicate::str::contains("pub struct ArrayInnerObjectRenameMe {"))
        .stdout(predicate::str::contains("  pub tags: Vec<String>,"));
}

#[test]
fn root_type_and_integers_flags() {
    structgen()
        .args(["rust", "--root-type", "Book", "--integers"])
        .arg(fixture("book.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("pub struct Book {"))
        .stdout(predicate::str::contains("  pub timestamp: i64,"))
        .stdout(predicate::str::contains("  pub latest_price: f64,"));
}

#[test]
fn invalid_root_type_is_recased() {
    structgen()
        .args(["rust", "--root-type", "my type"])
        .arg(fixture("array_root.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("pub struct MyType {"))
        .stderr(predicate::str::contains("using `MyType`"));
}

#[test]
fn json_pointer_narrows_the_document() {
    structgen()
        .args(["rust", "--json-pointer", "/quote", "--root-type", "Quote"])
        .arg(fixture("book.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("pub struct Quote {"))
        .stdout(predicate::str::contains("Bid").not());
}

#[test]
fn reads_stdin() {
    structgen()
        .args(["rust", "-"])
        .write_stdin(r#"{"symbol": "AAPL", "bidPrice": 100.5}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("  pub bid_price: f64,"));
}

#[test]
fn writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("models/book.rs");
    structgen()
        .arg("rust")
        .arg(fixture("book.json"))
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    let src = fs::read_to_string(out).unwrap();
    assert!(src.contains("pub struct NewTypeRenameMe {"));
}

// ──────────────────────────────────────────────
// schema
// ──────────────────────────────────────────────

#[test]
fn schema_view_is_ordered_json() {
    let output = structgen()
        .arg("schema")
        .arg(fixture("book.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let view: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let names: Vec<&String> = view.as_object().unwrap().keys().collect();
    assert_eq!(names, vec!["Quote", "Bid", "Trade", "NewTypeRenameMe"]);
    assert_eq!(
        view["NewTypeRenameMe"]["fields"]["trades"]["ty"],
        serde_json::json!({"Sequence": {"Nested": "Trade"}})
    );
}

// ──────────────────────────────────────────────
// failures
// ──────────────────────────────────────────────

#[test]
fn missing_file_fails() {
    structgen()
        .args(["rust", "no/such/file.json"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to read no/such/file.json"));
}

#[test]
fn malformed_json_fails() {
    structgen()
        .args(["rust", "-"])
        .write_stdin("{\"a\": ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse JSON from <stdin>"));
}

#[test]
fn primitive_root_fails() {
    structgen()
        .args(["rust", "-"])
        .write_stdin("42")
        .assert()
        .failure()
        .stderr(predicate::str::contains("root value is a number"));
}
