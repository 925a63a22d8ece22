//! Integration tests for wcabot CLI

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

/// Run the CLI with a clean LLM configuration and optional stdin.
fn run_wcabot_with(args: &[&str], env: &[(&str, &str)], stdin: Option<&str>) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-q", "-p", "wcabot", "--"];
    cmd_args.extend(args);

    let mut command = Command::new("cargo");
    command
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .env("ANTHROPIC_API_KEY", "")
        .env("WCABOT_LOG_LEVEL", "warn")
        .env_remove("RUST_LOG")
        .env_remove("WCABOT_LOG_DIR")
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    for (key, value) in env {
        command.env(key, value);
    }

    let mut child = command.spawn().expect("Failed to execute command");
    if let Some(input) = stdin {
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
    }
    let output = child.wait_with_output().expect("Failed to wait for command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

fn run_wcabot(args: &[&str]) -> (String, String, bool) {
    run_wcabot_with(args, &[], None)
}

fn rows_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(json.as_bytes()).expect("Failed to write temp file");
    file
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_wcabot(&["--help"]);

    assert!(success);
    assert!(stdout.contains("wcabot"));
    assert!(stdout.contains("ask"));
    assert!(stdout.contains("render"));
    assert!(stdout.contains("chat"));
    assert!(stdout.contains("check"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_wcabot(&["--version"]);

    assert!(success);
    assert!(stdout.contains("wcabot"));
}

#[test]
fn test_render_table() {
    let file = rows_file(
        r#"[
            {"name": "Max Park (박현수)", "best": 313, "event_id": "333"},
            {"name": "Yiheng Wang (王艺衡)", "best": 390, "event_id": "333"}
        ]"#,
    );
    let (stdout, _, success) = run_wcabot(&["render", file.path().to_str().unwrap()]);

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Results:");
    assert_eq!(lines[2], "name        |  best | event_id");
    assert_eq!(lines[4], "Max Park    | 3.13s |      333");
    assert_eq!(lines[5], "Yiheng Wang | 3.90s |      333");
}

#[test]
fn test_render_raw_skips_formatting() {
    let file = rows_file(r#"[{"name": "Max Park (박현수)", "best": 313}]"#);
    let (stdout, _, success) = run_wcabot(&["render", "--raw", file.path().to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("313"));
    assert!(stdout.contains("박현수"));
}

#[test]
fn test_render_truncation_notice() {
    let rows: Vec<String> = (1..=60)
        .map(|i| format!(r#"{{"world_rank": {}, "average": {}}}"#, i, 500 + i))
        .collect();
    let file = rows_file(&format!("[{}]", rows.join(",")));
    let (stdout, _, success) = run_wcabot(&[
        "render",
        file.path().to_str().unwrap(),
        "--max-rows",
        "50",
    ]);

    assert!(success);
    assert!(stdout.contains("5.01s"));
    assert!(!stdout.contains("5.51s"));
    assert!(stdout.trim_end().ends_with("... and 10 more results"));
}

#[test]
fn test_render_from_stdin() {
    let (stdout, _, success) = run_wcabot_with(
        &["render", "-"],
        &[],
        Some(r#"[{"personName": "Feliks Zemdegs", "average": -1}]"#),
    );

    assert!(success);
    assert!(stdout.contains("Feliks Zemdegs |     DNF"));
}

#[test]
fn test_render_empty_and_error_rows() {
    let file = rows_file("[]");
    let (stdout, _, success) = run_wcabot(&["render", file.path().to_str().unwrap()]);
    assert!(success);
    assert_eq!(stdout.trim_end(), "No results found.");

    let file = rows_file(r#"[{"error": "Execution failed", "message": "Unknown column 'foo'"}]"#);
    let (_, stderr, success) = run_wcabot(&["render", file.path().to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("Error: Unknown column 'foo'"));
}

#[test]
fn test_render_error_rows_fail_in_json_mode_too() {
    let file = rows_file(r#"[{"error": "Execution failed", "message": "Unknown column 'foo'"}]"#);
    let (stdout, stderr, success) = run_wcabot(&[
        "render",
        file.path().to_str().unwrap(),
        "--output",
        "json",
    ]);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Unknown column 'foo'"));
}

#[test]
fn test_sql_execution_failure_exits_nonzero() {
    let (stdout, stderr, success) = run_wcabot_with(
        &["sql", "SELECT 1"],
        &[("DB_HOST", "127.0.0.1"), ("DB_PORT", "1")],
        None,
    );

    assert!(!success);
    assert!(!stdout.contains("Results:"));
    assert!(stderr.contains("Error:"));
}

#[test]
fn test_render_json_output() {
    let file = rows_file(r#"[{"name": "Max Park", "best": 313}]"#);
    let (stdout, _, success) = run_wcabot(&[
        "render",
        file.path().to_str().unwrap(),
        "--output",
        "json",
    ]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["rows"][0]["best"], "3.13s");
    assert!(parsed["text"].as_str().unwrap().starts_with("Results:"));
}

#[test]
fn test_render_invalid_json() {
    let file = rows_file("not json");
    let (_, stderr, success) = run_wcabot(&["render", file.path().to_str().unwrap()]);

    assert!(!success);
    assert!(stderr.contains("Error"));
}

#[test]
fn test_ask_without_api_key() {
    let (stdout, _, success) = run_wcabot(&["ask", "What is the world record for 3x3?"]);

    assert!(success);
    assert!(stdout.contains("❌ Could not generate a valid SQL query from your question."));
}

#[test]
fn test_chat_console() {
    let (stdout, _, success) = run_wcabot_with(
        &["chat"],
        &[("COMMAND_PREFIX", "!wca")],
        Some("good morning\n!wca ping\n!wca help\n!wca dance\n!wca query\n"),
    );

    assert!(success);
    assert!(stdout.contains("Pong! Latency: "));
    assert!(stdout.contains("**WCA Statistics Bot Help**"));
    assert!(stdout.contains("Missing required argument: question"));
    assert!(!stdout.contains("Processing your question"));
}

#[test]
fn test_chat_console_query_shows_thinking() {
    let (stdout, _, success) = run_wcabot_with(&["chat"], &[], Some("!wca q top 5 3x3\n"));

    assert!(success);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "🤔 Processing your question...");
    assert_eq!(
        lines[1],
        "❌ Could not generate a valid SQL query from your question."
    );
}

#[test]
fn test_check_masks_key() {
    let (stdout, _, success) = run_wcabot_with(
        &["check"],
        &[("ANTHROPIC_API_KEY", "sk-ant-REDACTED")],
        None,
    );

    assert!(success);
    assert!(stdout.contains("[OK] Anthropic API Key: sk-ant-012...abcdefghij"));
    assert!(!stdout.contains("sk-ant-REDACTED"));
}

#[test]
fn test_check_reports_missing_key() {
    let (stdout, _, success) = run_wcabot(&["check"]);

    assert!(success);
    assert!(stdout.contains("[FAIL] Anthropic API Key: NOT SET"));
    assert!(stdout.contains("Some checks failed"));
}
