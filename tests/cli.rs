use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn wordcrawl() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wordcrawl"));
    cmd.env_remove("WORDCRAWL_CONFIG").env_remove("RUST_LOG");
    cmd
}

fn parse_json(stdout: &[u8]) -> Vec<Value> {
    serde_json::from_slice::<Vec<Value>>(stdout).expect("valid json array")
}

fn parse_jsonl(stdout: &[u8]) -> Vec<Value> {
    let s = String::from_utf8_lossy(stdout);
    s.lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str::<Value>(l).expect("valid jsonl line"))
        .collect()
}

fn file_names(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|v| v["file_name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn reports_matches_as_json_array() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "cat dog cat");
    write_file(&temp.path().join("b.txt"), "dog");
    write_file(&temp.path().join(".git/x.txt"), "cat");

    let assert = wordcrawl().arg("cat").arg(temp.path()).assert().success();
    let items = parse_json(&assert.get_output().stdout);

    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert!(item["file_name"].as_str().unwrap().ends_with("a.txt"));
    assert_eq!(item["pattern"], "cat");
    assert_eq!(item["match_count"], 2);
    assert_eq!(item["unique_match_count"], 1);
    assert_eq!(item["matched_strings"], serde_json::json!(["cat", "cat"]));
    assert_eq!(item["unique_matched_strings"], serde_json::json!(["cat"]));
}

#[test]
fn summary_goes_to_stderr() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "cat");
    write_file(&temp.path().join("b.txt"), "dog");

    wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .arg("--no-color")
        .assert()
        .success()
        .stderr(predicate::str::contains("1 of 2 inspected files matched (50.0%)"));
}

#[test]
fn quiet_suppresses_summary() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "cat");

    wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .arg("-q")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn empty_tree_prints_empty_array() {
    let temp = tempdir().unwrap();

    wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"))
        .stderr(predicate::str::contains("no files inspected"));
}

#[test]
fn jsonl_lists_files_in_stable_order() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("b.txt"), "cat");
    write_file(&temp.path().join("a.txt"), "cat");
    write_file(&temp.path().join("sub/zz.md"), "CAT");

    let assert = wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .args(["--format", "jsonl"])
        .assert()
        .success();
    let names = file_names(&parse_jsonl(&assert.get_output().stdout));

    assert_eq!(names.len(), 3);
    assert!(names[0].ends_with("a.txt"));
    assert!(names[1].ends_with("b.txt"));
    assert!(names[2].ends_with("sub/zz.md"));
}

#[test]
fn markdown_output_has_table() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "cat");

    wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .args(["--format", "md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("## Matches for `cat`"));
}

#[test]
fn conflicting_extension_filters_fail() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "cat");

    wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .args(["--include-ext", "txt", "--exclude-ext", "md"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("only one may be used"));
}

#[test]
fn missing_path_fails() {
    let temp = tempdir().unwrap();
    let missing = temp.path().join("nope");

    wordcrawl()
        .arg("cat")
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a directory or a file"));
}

#[test]
fn invalid_pattern_fails() {
    let temp = tempdir().unwrap();

    wordcrawl()
        .arg("(cat")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be compiled as a regex"));
}

#[test]
fn include_ext_limits_search() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "cat");
    write_file(&temp.path().join("b.md"), "cat");

    let assert = wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .args(["--include-ext", "md"])
        .assert()
        .success();
    let names = file_names(&parse_json(&assert.get_output().stdout));

    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("b.md"));
}

#[test]
fn collapse_whitespace_matches_across_lines() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "foo\n\n  bar");

    let assert = wordcrawl()
        .arg("foo bar")
        .arg(temp.path())
        .arg("--collapse-whitespace")
        .assert()
        .success();
    let items = parse_json(&assert.get_output().stdout);

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["matched_strings"], serde_json::json!(["foo bar"]));
}

#[test]
fn config_file_applies_and_flags_override() {
    let temp = tempdir().unwrap();
    let tree = temp.path().join("tree");
    write_file(&tree.join("a.txt"), "cat");
    write_file(&tree.join("vendor/b.txt"), "cat");
    let config = temp.path().join("wordcrawl.json");
    write_file(
        &config,
        &format!(
            r#"{{"search_paths": [{}], "excluded_subdirectories": ["vendor"], "format": "jsonl"}}"#,
            serde_json::to_string(tree.to_str().unwrap()).unwrap()
        ),
    );

    let assert = wordcrawl()
        .arg("cat")
        .arg("--config")
        .arg(&config)
        .assert()
        .success();
    let names = file_names(&parse_jsonl(&assert.get_output().stdout));
    assert_eq!(names.len(), 1);
    assert!(names[0].ends_with("a.txt"));

    let assert = wordcrawl()
        .arg("cat")
        .arg("--exclude-dir=")
        .arg("--format=json")
        .env("WORDCRAWL_CONFIG", &config)
        .assert()
        .success();
    let names = file_names(&parse_json(&assert.get_output().stdout));
    assert_eq!(names.len(), 2);
}

#[test]
fn unknown_config_key_fails() {
    let temp = tempdir().unwrap();
    let config = temp.path().join("bad.json");
    write_file(&config, r#"{"exclude_dirs": ["x"]}"#);

    wordcrawl()
        .arg("cat")
        .arg(temp.path())
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse JSON config"));
}
