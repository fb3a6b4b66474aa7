use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn jsonfix() -> Command {
    Command::cargo_bin("jsonfix").unwrap()
}

#[test]
fn cli_stdin_to_stdout() {
    let assert = jsonfix().arg("-").write_stdin("{'a':1, b: 2,}").assert().success();
    let out = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1, "b": 2}));
    // No trailing newline on stdout.
    assert!(!out.ends_with('\n'));
}

#[test]
fn cli_fix_file_in_place() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{\"a\": 1,}").unwrap();
    jsonfix().arg(path.to_str().unwrap()).assert().success();
    let fixed = fs::read_to_string(&path).unwrap();
    assert!(fixed.ends_with('\n'));
    let v: serde_json::Value = serde_json::from_str(&fixed).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1}));
    // Pretty-printed with two-space indentation.
    assert!(fixed.contains("\n  \"a\": 1"));
}

#[test]
fn cli_output_to_file() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("in.json");
    let out = dir.path().join("out.json");
    fs::write(&inp, "{key: 'v'}").unwrap();
    jsonfix()
        .args([inp.to_str().unwrap(), "-o", out.to_str().unwrap()])
        .assert()
        .success();
    // Input untouched, output fixed.
    assert_eq!(fs::read_to_string(&inp).unwrap(), "{key: 'v'}");
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(v, serde_json::json!({"key": "v"}));
}

#[test]
fn cli_output_dash_means_stdout() {
    let dir = tempdir().unwrap();
    let inp = dir.path().join("in.json");
    fs::write(&inp, "[1,2,]").unwrap();
    jsonfix()
        .args([inp.to_str().unwrap(), "-o", "-"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1"));
    assert_eq!(fs::read_to_string(&inp).unwrap(), "[1,2,]");
}

#[test]
fn cli_verbose_reports_repairs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("v.json");
    fs::write(&path, "{\"a\": 1,}").unwrap();
    jsonfix()
        .args(["-v", path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Fixed 1 issue(s) in"))
        .stderr(predicate::str::contains("Line 1: Removed trailing comma"));
}

#[test]
fn cli_verbose_no_changes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ok.json");
    fs::write(&path, "{\n  \"a\": 1\n}\n").unwrap();
    jsonfix()
        .args(["--verbose", path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("No changes needed in"));
}

#[test]
fn cli_backup_keeps_original() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("b.json");
    fs::write(&path, "{\"a\": 1,}").unwrap();
    jsonfix()
        .args(["-b", path.to_str().unwrap()])
        .assert()
        .success();
    let backup = dir.path().join("b.json.bak");
    assert_eq!(fs::read_to_string(&backup).unwrap(), "{\"a\": 1,}");
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1}));
}

#[test]
fn cli_dry_run_touches_nothing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("d.json");
    fs::write(&path, "{\"a\": 1,}").unwrap();
    jsonfix()
        .args(["--dry-run", path.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Would fix 1 issue(s) in"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"a\": 1,}");
}

#[test]
fn cli_multiple_files() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.json");
    let b = dir.path().join("b.json");
    fs::write(&a, "{x: 1}").unwrap();
    fs::write(&b, "[1,]").unwrap();
    jsonfix()
        .args([a.to_str().unwrap(), b.to_str().unwrap()])
        .assert()
        .success();
    serde_json::from_str::<serde_json::Value>(&fs::read_to_string(&a).unwrap()).unwrap();
    serde_json::from_str::<serde_json::Value>(&fs::read_to_string(&b).unwrap()).unwrap();
}

#[test]
fn cli_output_with_multiple_files_is_usage_error() {
    jsonfix()
        .args(["a.json", "b.json", "-o", "out.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--output can only be used with a single input file"));
}

#[test]
fn cli_missing_file_fails() {
    jsonfix()
        .arg("definitely-not-here.json")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn cli_unparseable_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.json");
    fs::write(&path, "{\"a\": /* unclosed").unwrap();
    jsonfix()
        .arg(path.to_str().unwrap())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error parsing"));
}

#[test]
fn cli_partial_failure_still_fixes_good_files() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.json");
    fs::write(&good, "{\"a\": 1,}").unwrap();
    jsonfix()
        .args(["missing.json", good.to_str().unwrap()])
        .assert()
        .code(1);
    let v: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&good).unwrap()).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1}));
}

#[test]
fn cli_version() {
    jsonfix()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("jsonfix "));
}

#[test]
fn cli_no_files_is_usage_error() {
    jsonfix().assert().code(1);
}

#[test]
fn cli_unknown_option_is_usage_error() {
    jsonfix()
        .args(["--frobnicate", "x.json"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown option"));
}

#[test]
fn cli_unicode_preserved_in_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("u.json");
    fs::write(&path, "{name: '张三'}").unwrap();
    jsonfix().arg(path.to_str().unwrap()).assert().success();
    let fixed = fs::read_to_string(&path).unwrap();
    assert!(fixed.contains("张三"));
}
