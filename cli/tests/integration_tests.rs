use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn keyref_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_keyref"))
}

fn index_fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("parser")
        .join("tests")
        .join("fixtures")
        .join("index-excerpt.txt")
}

fn run(args: &[&str]) -> Output {
    Command::new(keyref_bin())
        .args(args)
        .output()
        .expect("failed to run keyref")
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(keyref_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn keyref");
    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("failed to write stdin");
    child.wait_with_output().expect("failed to wait for keyref")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_fixture_outputs_json_records() {
    let fixture = index_fixture();
    let output = run(&["parse", "--input", fixture.to_str().unwrap()]);
    assert_success(&output, "parse");

    let records: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(records.len(), 25);
    assert_eq!(records[0]["mode"], "insert");
    assert_eq!(records[0]["tag"], "i_CTRL-@");
    assert_eq!(records[0]["line"], 19);

    let scroll = records
        .iter()
        .find(|r| r["tag"] == "CTRL-B")
        .expect("CTRL-B record");
    assert_eq!(scroll["is_cursor_movement"], true);
    assert_eq!(scroll["is_undoable"], false);
}

#[test]
fn parse_count_format() {
    let fixture = index_fixture();
    let output = run(&["parse", "--format", "count", "--input", fixture.to_str().unwrap()]);
    assert_success(&output, "parse --format count");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "25");
}

#[test]
fn parse_yaml_format() {
    let fixture = index_fixture();
    let output = run(&["parse", "--format", "yaml", "--input", fixture.to_str().unwrap()]);
    assert_success(&output, "parse --format yaml");

    let records: serde_yaml::Value =
        serde_yaml::from_slice(&output.stdout).expect("stdout should be YAML");
    let records = records.as_sequence().expect("top-level sequence");
    assert_eq!(records.len(), 25);
}

#[test]
fn parse_with_stats_writes_counters_to_stderr() {
    let fixture = index_fixture();
    let output = run(&[
        "parse",
        "--format",
        "json",
        "--with-stats",
        "--input",
        fixture.to_str().unwrap(),
    ]);
    assert_success(&output, "parse --with-stats");

    let stderr = String::from_utf8_lossy(&output.stderr);
    let start = stderr.find('{').expect("stats JSON on stderr");
    let stats: serde_json::Value =
        serde_json::from_str(&stderr[start..]).expect("stats should be JSON");
    assert_eq!(stats["data_rows"], 39);
    assert_eq!(stats["abandoned_commands"], 14);
    assert_eq!(stats["sections_entered"].as_array().map(Vec::len), Some(14));
}

#[test]
fn parse_reads_stdin_when_no_input_given() {
    let index = fs::read_to_string(index_fixture()).expect("fixture readable");
    let output = run_with_stdin(&["parse", "--format", "count"], &index);
    assert_success(&output, "parse from stdin");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "25");
}

#[test]
fn parse_orphan_continuation_exits_with_error() {
    let index = "header\n==========\n1. Insert mode\n\ntag\n----\n\t\t\t\torphan text\n";
    let output = run_with_stdin(&["parse"], index);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error: line 7"), "stderr was: {stderr}");
    assert!(stderr.contains("continuation"), "stderr was: {stderr}");
}

#[test]
fn parse_missing_input_file_fails() {
    let output = run(&["parse", "--input", "/nonexistent/index.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_prints_default_tables() {
    let output = run(&["config"]);
    assert_success(&output, "config");

    let config: serde_yaml::Value =
        serde_yaml::from_slice(&output.stdout).expect("stdout should be YAML");
    assert_eq!(config["tab_width"].as_u64(), Some(8));
    assert_eq!(config["modes"].as_sequence().map(Vec::len), Some(14));
}

#[test]
fn custom_config_restricts_sections() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config_path = dir.path().join("keyref.yaml");
    fs::write(
        &config_path,
        r#"modes:
  - name: insert
    header: "1. Insert mode"
    skip_lines: 3
    chars_col: 16
    description_col: 32
"#,
    )
    .expect("failed to write config");

    let fixture = index_fixture();
    let output = run(&[
        "parse",
        "--config",
        config_path.to_str().unwrap(),
        "--input",
        fixture.to_str().unwrap(),
    ]);
    assert_success(&output, "parse --config");

    let records: Vec<serde_json::Value> =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r["mode"] == "insert"));
}

#[test]
fn invalid_config_is_rejected() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config_path = dir.path().join("bad.yaml");
    fs::write(&config_path, "tab_width: 0\nmodes: []\n").expect("failed to write config");

    let output = run(&["config", "--config", config_path.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "stderr was: {stderr}");
    assert!(stderr.contains("tab width"), "stderr was: {stderr}");
}

// ---------------------------------------------------------------------------
// keys
// ---------------------------------------------------------------------------

#[test]
fn keys_text_output() {
    let output = run_with_stdin(&["keys"], "<C-W>\n\n2dw\nCTRL-V {char}\n");
    assert_success(&output, "keys");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["<C-W>\tCtrl+W", "2dw\t2 D W", "CTRL-V {char}\tCtrl+V char"]);
}

#[test]
fn keys_json_output() {
    let output = run_with_stdin(&["keys", "--format", "json"], "<S-C-Left>\n");
    assert_success(&output, "keys --format json");

    let decoded: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    let key = &decoded[0]["keys"][0];
    assert_eq!(decoded[0]["input"], "<S-C-Left>");
    assert_eq!(key["key"]["name"], "Left");
    assert_eq!(key["key"]["category"], "named");
    assert_eq!(key["with_shift"], true);
    assert_eq!(key["with_control"], true);
}

#[test]
fn keys_unknown_notation_fails() {
    let output = run_with_stdin(&["keys"], "é\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to decode 'é'"), "stderr was: {stderr}");
}
