//! CLI integration tests for inijson
//!
//! These tests run the binary end to end: converting between INI and JSON,
//! editing files in place, and loading configuration.

use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE: &str = "
; This is a comment
[Database]
host = localhost
port = 3306
user = app_user
password = S3cr3tP@ssw0rd

[Settings]
debug_mode = true
max_connections = 50
timeout_seconds = 30
";

/// Get a command instance isolated from the user's configuration
fn inijson_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("inijson"));
    cmd.env("INIJSON_CONFIG", dir.path().join("config.toml"));
    cmd
}

/// Create a temporary directory holding `app.ini`
fn setup_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("app.ini");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn stdout_json(output: &assert_cmd::assert::Assert) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

// =============================================================================
// Conversion Tests
// =============================================================================

#[test]
fn test_parse_coerces_values() {
    let (dir, path) = setup_file(SAMPLE);

    let output = inijson_cmd(&dir).arg("parse").arg(&path).assert().success();
    let json = stdout_json(&output);

    assert_eq!(json["Database"]["host"], "localhost");
    assert_eq!(json["Database"]["port"], 3306);
    assert_eq!(json["Settings"]["debug_mode"], true);
}

#[test]
fn test_parse_preserves_order() {
    let (dir, path) = setup_file("[Zeta]\nb = 1\na = 2\n[Alpha]\nk = v\n");

    inijson_cmd(&dir)
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout("{\n  \"Zeta\": {\n    \"b\": 1,\n    \"a\": 2\n  },\n  \"Alpha\": {\n    \"k\": \"v\"\n  }\n}\n");
}

#[test]
fn test_parse_text_mode_keeps_strings() {
    let (dir, path) = setup_file("top = 1\n[Settings]\ndebug_mode = true\n");

    let output = inijson_cmd(&dir)
        .args(["parse", "--text"])
        .arg(&path)
        .assert()
        .success();
    let json = stdout_json(&output);

    assert_eq!(json["default"]["top"], "1");
    assert_eq!(json["Settings"]["debug_mode"], "true");
}

#[test]
fn test_parse_reads_stdin() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .arg("parse")
        .write_stdin("[A]\nk=1")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"k\": 1"));
}

#[test]
fn test_parse_empty_input_is_empty_object() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .arg("parse")
        .write_stdin("; comment\n# comment")
        .assert()
        .success()
        .stdout("{}\n");
}

#[test]
fn test_parse_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .args(["parse", "does-not-exist.ini"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read input file"));
}

#[test]
fn test_stringify_json_to_ini() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .arg("stringify")
        .write_stdin(r#"{"S": {"a": 1, "b": "x"}, "Features": {"caching_enabled": true, "cache_ttl": 3600}}"#)
        .assert()
        .success()
        .stdout("[S]\na = 1\nb = x\n\n[Features]\ncaching_enabled = true\ncache_ttl = 3600\n");
}

#[test]
fn test_stringify_empty_object() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .arg("stringify")
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn test_stringify_rejects_nested_objects() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .arg("stringify")
        .write_stdin(r#"{"S": {"inner": {"a": 1}}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Value of [S] inner is an object"));
}

#[test]
fn test_stringify_json_format_wraps_output() {
    let dir = TempDir::new().unwrap();

    let output = inijson_cmd(&dir)
        .args(["stringify", "--format", "json"])
        .write_stdin(r#"{"S": {"a": 1}}"#)
        .assert()
        .success();

    assert_eq!(stdout_json(&output)["ini"], "[S]\na = 1");
}

#[test]
fn test_parse_then_stringify_round_trip() {
    let (dir, path) = setup_file(SAMPLE);

    let parsed = inijson_cmd(&dir).arg("parse").arg(&path).assert().success();
    let json = String::from_utf8_lossy(&parsed.get_output().stdout).to_string();

    inijson_cmd(&dir)
        .arg("stringify")
        .write_stdin(json)
        .assert()
        .success()
        .stdout(
            "[Database]\nhost = localhost\nport = 3306\nuser = app_user\npassword = S3cr3tP@ssw0rd\n\n\
             [Settings]\ndebug_mode = true\nmax_connections = 50\ntimeout_seconds = 30\n",
        );
}

#[test]
fn test_fmt_prints_normalized() {
    let (dir, path) = setup_file("  [ A ]\n  k=TRUE  \n\n\n[Empty]\n");

    inijson_cmd(&dir)
        .arg("fmt")
        .arg(&path)
        .assert()
        .success()
        .stdout("[A]\nk = true\n");
}

#[test]
fn test_fmt_write_rewrites_file() {
    let (dir, path) = setup_file("# note\n[A]\nk=v\n");

    inijson_cmd(&dir)
        .args(["fmt", "--write"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Formatted"));

    assert_eq!(fs::read_to_string(&path).unwrap(), "[A]\nk = v\n");
}

#[test]
fn test_fmt_write_rejects_stdin() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .current_dir(dir.path())
        .args(["fmt", "--write", "-"])
        .write_stdin("[A]\nk=v\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--write needs a file path"));

    assert!(!dir.path().join("-").exists());
}

// =============================================================================
// Edit Tests
// =============================================================================

#[test]
fn test_get_value() {
    let (dir, path) = setup_file(SAMPLE);

    inijson_cmd(&dir)
        .arg("get")
        .arg(&path)
        .args(["Database", "host"])
        .assert()
        .success()
        .stdout("localhost\n");
}

#[test]
fn test_get_missing_key_fails() {
    let (dir, path) = setup_file(SAMPLE);

    inijson_cmd(&dir)
        .arg("get")
        .arg(&path)
        .args(["Database", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Key 'nope' not found in section 'Database'"));
}

#[test]
fn test_get_json_format() {
    let (dir, path) = setup_file(SAMPLE);

    let output = inijson_cmd(&dir)
        .arg("get")
        .arg(&path)
        .args(["Settings", "max_connections", "--format", "json"])
        .assert()
        .success();

    assert_eq!(stdout_json(&output)["value"], "50");
}

#[test]
fn test_set_updates_file() {
    let (dir, path) = setup_file(SAMPLE);

    inijson_cmd(&dir)
        .arg("set")
        .arg(&path)
        .args(["Database", "host", "db.prod.internal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set [Database] host = db.prod.internal"));

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("[Database]\nhost = db.prod.internal\nport = 3306\n"));
    assert!(!contents.contains("; This is a comment"));
}

#[test]
fn test_set_creates_file_and_section() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.ini");

    inijson_cmd(&dir)
        .arg("set")
        .arg(&path)
        .args(["AppConfig", "api_key", "XYZ123"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[AppConfig]\napi_key = XYZ123\n");
}

#[test]
fn test_delete_key() {
    let (dir, path) = setup_file("[Features]\nlogging_enabled = true\nmax_retries = 5\n");

    inijson_cmd(&dir)
        .arg("delete")
        .arg(&path)
        .args(["Features", "max_retries"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted [Features] max_retries"));

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[Features]\nlogging_enabled = true\n"
    );
}

#[test]
fn test_delete_last_key_removes_section() {
    let (dir, path) = setup_file("[A]\nk = v\n[B]\nonly = 1\n");

    inijson_cmd(&dir)
        .arg("delete")
        .arg(&path)
        .args(["B", "only"])
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[A]\nk = v\n");
}

#[test]
fn test_delete_section() {
    let (dir, path) = setup_file("[A]\nk = v\n[B]\nx = 1\ny = 2\n");

    inijson_cmd(&dir)
        .arg("delete")
        .arg(&path)
        .arg("B")
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&path).unwrap(), "[A]\nk = v\n");
}

#[test]
fn test_delete_missing_leaves_file_untouched() {
    let original = "; keep me\n[A]\nk = v\n";
    let (dir, path) = setup_file(original);

    let output = inijson_cmd(&dir)
        .arg("delete")
        .arg(&path)
        .args(["Missing", "--format", "json"])
        .assert()
        .success();

    assert_eq!(stdout_json(&output)["deleted"], false);
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_path_uses_env() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_show() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote default config"));

    assert!(dir.path().join("config.toml").is_file());

    inijson_cmd(&dir)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    inijson_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mode = \"typed\""));
}

#[test]
fn test_config_text_mode_default() {
    let (dir, path) = setup_file("[A]\nk = 1\n");
    fs::write(
        dir.path().join("config.toml"),
        "[parse]\nmode = \"text\"\n\n[json]\npretty = false\n",
    )
    .unwrap();

    inijson_cmd(&dir)
        .arg("parse")
        .arg(&path)
        .assert()
        .success()
        .stdout("{\"A\":{\"k\":\"1\"}}\n");

    inijson_cmd(&dir)
        .args(["parse", "--typed"])
        .arg(&path)
        .assert()
        .success()
        .stdout("{\"A\":{\"k\":1}}\n");
}

#[test]
fn test_config_default_format_json() {
    let (dir, path) = setup_file("[A]\nk = v\n");
    fs::write(dir.path().join("config.toml"), "default_format = \"json\"\n").unwrap();

    let output = inijson_cmd(&dir)
        .arg("get")
        .arg(&path)
        .args(["A", "k"])
        .assert()
        .success();

    assert_eq!(stdout_json(&output)["value"], "v");
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "default_format = 3\n").unwrap();

    inijson_cmd(&dir)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();

    inijson_cmd(&dir)
        .args(["--verbose", "parse"])
        .write_stdin("[A]\nk = 1")
        .assert()
        .success()
        .stderr(predicate::str::contains("[verbose:parse]"));
}
