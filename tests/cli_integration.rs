//! End-to-end runs of the `dealerlot` binary.

use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SNAPSHOT: &str = indoc! {r#"
    [
        {"id": 1, "year": 2012, "make": "Ford", "model": "Fusion", "price": 9000,
         "miles": 80000, "status": "available", "body_type": "Sedan",
         "created_at": "2024-01-05T10:00:00Z"},
        {"id": 2, "year": 2015, "make": "Honda", "model": "Accord", "trim": "EX",
         "price": 15000, "miles": 40000, "status": "pending", "body_type": "Sedan",
         "created_at": "2024-01-04T10:00:00Z"},
        {"id": 3, "year": 2011, "make": "Toyota", "model": "Corolla", "price": 12000,
         "miles": 120000, "status": "sold", "body_type": "Sedan",
         "created_at": "2024-01-03T10:00:00Z"},
        {"id": 4, "year": 2017, "make": "Ford", "model": "Escape", "price": 17500,
         "miles": 65000, "body_type": "SUV", "featured": true, "featured_rank": 0,
         "created_at": "2024-01-01T10:00:00Z"}
    ]
"#};

fn run(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dealerlot"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute dealerlot")
}

fn lot() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("lot.json"), SNAPSHOT).unwrap();
    dir
}

fn json_stdout(output: &Output) -> Value {
    if !output.status.success() {
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("dealerlot exited with {}", output.status);
    }
    serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).expect("stdout is not JSON")
}

fn ids(json: &Value) -> Vec<i64> {
    json["vehicles"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

#[test]
fn test_browse_status_outranks_price_sort() {
    let dir = lot();
    let output = run(
        dir.path(),
        &["browse", "lot.json", "--price-min", "10000", "--sort", "price_asc", "--format", "json"],
    );
    let json = json_stdout(&output);
    // available Escape first, then pending Accord, then sold Corolla
    assert_eq!(ids(&json), vec![4, 2, 3]);
    assert_eq!(json["vehicles"][0]["bodyType"], "SUV");
    assert_eq!(json["total"], 3);
    assert_eq!(json["filters"]["price"]["min"], 10000);
    assert!(json["filters"]["price"]["max"].is_null());
}

#[test]
fn test_browse_default_keeps_featured_order() {
    let dir = lot();
    let json = json_stdout(&run(dir.path(), &["browse", "lot.json", "--format", "json"]));
    // featured row first, then newest; the sold row drops to the end
    assert_eq!(ids(&json), vec![4, 1, 2, 3]);
    assert_eq!(json["vehicles"][1]["model"], "Fusion");
    assert_eq!(json["vehicles"][2]["model"], "Accord EX");
}

#[test]
fn test_browse_pages_with_config_page_size() {
    let dir = lot();
    fs::write(dir.path().join(".dealerlot.toml"), "[storefront]\npage_size = 1\n").unwrap();

    let json = json_stdout(&run(dir.path(), &["browse", "lot.json", "--format", "json"]));
    assert_eq!(json["shown"], 1);
    assert_eq!(json["hasMore"], true);

    let json = json_stdout(&run(
        dir.path(),
        &["browse", "lot.json", "--pages", "9", "--format", "json"],
    ));
    assert_eq!(json["shown"], 4);
    assert_eq!(json["hasMore"], false);
}

#[test]
fn test_browse_json_keys_are_camel_case() {
    let dir = lot();
    let json = json_stdout(&run(
        dir.path(),
        &["browse", "lot.json", "--body-type", "SUV", "--format", "json"],
    ));
    assert_eq!(json["filters"]["bodyType"], "SUV");
    assert!(json["filters"].get("body_type").is_none());
    assert_eq!(json["pageSize"], 8);
    assert_eq!(json["vehicles"][0]["isNew"], false);
}

#[test]
fn test_browse_mileage_step_and_make() {
    let dir = lot();
    let json = json_stdout(&run(
        dir.path(),
        &[
            "browse",
            "lot.json",
            "--make",
            "Ford",
            "--mileage-step",
            "60-90k",
            "--format",
            "json",
        ],
    ));
    assert_eq!(ids(&json), vec![4, 1]);
}

#[test]
fn test_browse_terminal_output() {
    let dir = lot();
    let output = run(dir.path(), &["browse", "lot.json", "--query", "accord", "--plain"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1 matching vehicles"));
    assert!(stdout.contains("2015 Honda Accord EX"));
    assert!(stdout.contains("Pending"));
}

#[test]
fn test_browse_missing_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["browse", "nope.json"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.json"));
}

#[test]
fn test_browse_rejects_explicit_invalid_config() {
    let dir = lot();
    fs::write(dir.path().join("bad.toml"), "[storefront]\npage_size = 0\n").unwrap();
    let output = run(dir.path(), &["browse", "lot.json", "--config", "bad.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("page_size"));
}

#[test]
fn test_estimate_zero_apr() {
    let dir = TempDir::new().unwrap();
    let json = json_stdout(&run(
        dir.path(),
        &["estimate", "--price", "20000", "--down", "2000", "--apr", "0", "--term", "60", "--format", "json"],
    ));
    assert_eq!(json["monthlyPayment"], 300.0);
    assert_eq!(json["totalInterest"], 0.0);
}

#[test]
fn test_estimate_tier_sets_apr() {
    let dir = TempDir::new().unwrap();
    let json = json_stdout(&run(
        dir.path(),
        &["estimate", "--tier", "excel", "--format", "json"],
    ));
    assert_eq!(json["apr"], 7.49);
    assert_eq!(json["tier"], "excel");
}

#[test]
fn test_slug_command() {
    let dir = lot();
    let output = run(dir.path(), &["slug", "lot.json"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first = stdout.lines().next().unwrap();
    assert_eq!(first, "2017-ford-escape-4\t2017 Ford Escape");
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    let output = run(dir.path(), &["init"]);
    assert!(output.status.success());
    assert!(dir.path().join(".dealerlot.toml").exists());

    let output = run(dir.path(), &["init"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("--force"));

    let output = run(dir.path(), &["init", "--force"]);
    assert!(output.status.success());
}

#[test]
fn test_sitemap_skips_sold_listings() {
    let dir = lot();
    let output = run(
        dir.path(),
        &["sitemap", "lot.json", "--base-url", "https://lot.example/"],
    );
    assert!(output.status.success());
    let xml = String::from_utf8_lossy(&output.stdout);
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<loc>https://lot.example/</loc>"));
    assert!(xml.contains("<loc>https://lot.example/inventory/2017-ford-escape-4</loc>"));
    assert!(xml.contains("<loc>https://lot.example/inventory/2015-honda-accord-ex-2</loc>"));
    // the Corolla is sold
    assert!(!xml.contains("corolla"));
    assert_eq!(xml.matches("<url>").count(), 4);
}

#[test]
fn test_sitemap_writes_file() {
    let dir = lot();
    let output = run(
        dir.path(),
        &["sitemap", "lot.json", "--base-url", "https://lot.example", "-o", "sitemap.xml"],
    );
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Sitemap written with 4 URLs."));
    let xml = fs::read_to_string(dir.path().join("sitemap.xml")).unwrap();
    assert!(xml.ends_with("</urlset>\n"));
}
