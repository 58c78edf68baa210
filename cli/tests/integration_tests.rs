use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

const GRAMMAR: &str = "\
// conversion tool options
! -i --input <string>       | Input file
?^1 -j --json               | Emit JSON
?^1 -y --yaml               | Emit YAML
?+ -I --include <string>    | Include directory
?&2 -u --user <string>      | Remote user
!&2 -p --port <int>         | Remote port
";

fn write_grammar(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("options.grammar");
    fs::write(&path, contents).expect("failed to write grammar");
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_optgroup"))
        .args(args)
        .output()
        .expect("failed to run optgroup")
}

// ---------------------------------------------------------------------------
// parse
// ---------------------------------------------------------------------------

#[test]
fn parse_prints_values_under_canonical_spelling() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, GRAMMAR);

    let out = run(&[
        "parse",
        "--grammar",
        grammar.to_str().unwrap(),
        "--",
        "--input",
        "data.csv",
        "-y",
        "--include",
        "a",
        "-I",
        "b",
        "-p",
        "22",
        "trailing",
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(report["options"]["-i"], serde_json::json!(["data.csv"]));
    assert_eq!(report["options"]["-y"], serde_json::json!([""]));
    assert_eq!(report["options"]["-I"], serde_json::json!(["a", "b"]));
    assert_eq!(report["options"]["-p"], serde_json::json!(["22"]));
    assert_eq!(report["positional"], serde_json::json!(["trailing"]));
}

#[test]
fn parse_fails_on_xor_violation() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, GRAMMAR);

    let out = run(&[
        "parse",
        "--grammar",
        grammar.to_str().unwrap(),
        "--",
        "-i",
        "x",
        "-p",
        "1",
        "-j",
        "-y",
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("XOR group 1"), "stderr: {stderr}");
}

#[test]
fn parse_fails_on_bad_argument() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, GRAMMAR);

    let out = run(&[
        "parse",
        "--grammar",
        grammar.to_str().unwrap(),
        "--",
        "-i",
        "x",
        "-p",
        "http",
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("expected <int>, got 'http'"),
        "stderr: {stderr}"
    );
}

#[test]
fn parse_help_request_prints_help() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, GRAMMAR);

    let out = run(&["parse", "--grammar", grammar.to_str().unwrap(), "--", "--help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Usage:"));
    assert!(stdout.contains("--include <string>"));
}

#[test]
fn parse_respects_config_file() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, "?|1 --tcp\n?|1 --udp\n? -v\n");
    let config = dir.path().join("parser.yaml");
    fs::write(&config, "ior_policy: at_least_one\n").unwrap();

    let out = run(&[
        "parse",
        "--grammar",
        grammar.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
        "--",
        "-v",
    ]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("IOR group 1"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// check / help
// ---------------------------------------------------------------------------

#[test]
fn check_reports_grammar_error_line() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, "! -a\n\n?? -b\n");

    let out = run(&["check", "--grammar", grammar.to_str().unwrap()]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("line 3"), "stderr: {stderr}");
}

#[test]
fn check_grammar_output_reloads() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, GRAMMAR);

    let out = run(&[
        "check",
        "--grammar",
        grammar.to_str().unwrap(),
        "--format",
        "grammar",
    ]);
    assert!(out.status.success());
    let dumped = String::from_utf8(out.stdout).unwrap();
    assert_eq!(dumped.lines().count(), 6);
    assert!(dumped.contains("!&2- -p --port <int> | Remote port"));

    let reloaded = write_grammar(&dir, &dumped);
    let out = run(&["check", "--grammar", reloaded.to_str().unwrap(), "--format", "json"]);
    assert!(out.status.success());
    let table: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(table.as_array().unwrap().len(), 6);
    assert_eq!(table[1]["group"]["kind"], "xor");
}

#[test]
fn help_uses_program_name_from_config() {
    let dir = TempDir::new().unwrap();
    let grammar = write_grammar(&dir, GRAMMAR);
    let config = dir.path().join("parser.yaml");
    fs::write(&config, "program_name: convert\n").unwrap();

    let out = run(&[
        "help",
        "--grammar",
        grammar.to_str().unwrap(),
        "--config",
        config.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("Usage: convert [OPTIONS]"));
    assert!(stdout.contains("Remote port (required, AND group 2)"));
}

#[test]
fn missing_grammar_file_fails() {
    let out = run(&["check", "--grammar", "/nonexistent/options.grammar"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.starts_with("error: Failed to load"), "stderr: {stderr}");
}
