//! End-to-end tests for the `wjson` binary.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

fn wjson() -> Command {
    Command::new(env!("CARGO_BIN_EXE_wjson"))
}

/// Run with the given arguments, feeding `input` on stdin.
fn run(args: &[&str], input: &str) -> Output {
    let mut child = wjson()
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn wjson");
    let written = child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes());
    // The tool may stop reading once it has seen an error.
    if let Err(e) = written {
        assert_eq!(e.kind(), ErrorKind::BrokenPipe, "write stdin: {}", e);
    }
    child.wait_with_output().expect("wait for wjson")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("test")
        .join(name)
}

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("wjson-{}-{}", std::process::id(), name))
}

#[test]
fn test_compacts_stdin() {
    let output = run(&[], "{ \"a\" : [1, 2.50, 1e2],\n \"b\": null }");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "{\"a\":[1,2.50,1e2],\"b\":null}\n");
}

#[test]
fn test_dash_reads_stdin() {
    let output = run(&["-"], "[true]");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[true]\n");
}

#[test]
fn test_number_formats() {
    let plain = run(&["--plain"], "[1e2, NaN]");
    assert_eq!(stdout(&plain), "[100,NaN]\n");

    let strict = run(&["--strict"], "[1e2, NaN, -Infinity]");
    assert_eq!(stdout(&strict), "[1e2,null,null]\n");
}

#[test]
fn test_parse_error_exits_nonzero() {
    let output = run(&[], "{}x");
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_eq!(
        stderr(&output).trim_end(),
        "<stdin>: Extra characters in JSON input at line 0, column 2"
    );
}

#[test]
fn test_check_file() {
    let path = fixture("pass/nested.json");
    let path = path.to_string_lossy();
    let output = run(&["--check", &path], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), format!("{}: ok\n", path));
}

#[test]
fn test_check_failing_file() {
    let path = fixture("fail/trailing-data.json");
    let path = path.to_string_lossy();
    let output = run(&["--check", &path], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with(&format!("{}: ", path)));
}

#[test]
fn test_untrusted_rejects_deep_nesting() {
    let deep = "[".repeat(200) + &"]".repeat(200);

    let output = run(&[], &deep);
    assert!(output.status.success());

    let output = run(&["--untrusted"], &deep);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Nesting exceeds 128 levels"));
}

#[test]
fn test_default_depth_cap_fails_cleanly() {
    let deep = "[".repeat(100_000) + &"]".repeat(100_000);
    let output = run(&[], &deep);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Nesting exceeds 256 levels"));
}

#[test]
fn test_output_file() {
    let path = scratch_file("out.json");
    let output = run(&["-o", &path.to_string_lossy()], "[ \"x\" ]");
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "[\"x\"]\n");
    let _ = fs::remove_file(&path);
}

#[test]
fn test_missing_file() {
    let output = run(&["no-such-file.json"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("Error reading no-such-file.json"));
}

#[test]
fn test_bad_arguments() {
    let output = run(&["--bogus"], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unknown option: --bogus"));

    let output = run(&["-o"], "");
    assert_eq!(output.status.code(), Some(1));

    let output = run(&["--check", "-o", "x.json"], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_and_version() {
    let output = run(&["--help"], "");
    assert!(output.status.success());
    assert!(stdout(&output).contains("USAGE:"));

    let output = run(&["-V"], "");
    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!("wjson {}\n", env!("CARGO_PKG_VERSION"))
    );
}
