//! Exit codes and output of the `most-active-cookie` binary.

use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

const LOG: &str = "cookie,timestamp
AtY0laUfhglK3lC7,2018-12-09T14:19:00+00:00
SAZuXPGUrfbcn5UA,2018-12-09T10:13:00+00:00
AtY0laUfhglK3lC7,2018-12-09T06:19:00+00:00
SAZuXPGUrfbcn5UA,2018-12-08T22:03:00+00:00
4sMM2LxV07bPJzwf,2018-12-08T21:30:00+00:00
";

fn write_log(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_most-active-cookie"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn prints_most_active_cookie() {
    let file = write_log(LOG);
    let output = run(&[file.path().to_str().unwrap(), "-d", "2018-12-09"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "AtY0laUfhglK3lC7\n");
}

#[test]
fn prints_every_tied_cookie() {
    let file = write_log(LOG);
    let output = run(&[file.path().to_str().unwrap(), "--date", "2018-12-08"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "4sMM2LxV07bPJzwf\nSAZuXPGUrfbcn5UA\n");
}

#[test]
fn unknown_date_prints_message_and_succeeds() {
    let file = write_log(LOG);
    let output = run(&[file.path().to_str().unwrap(), "-d", "2018-12-01"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "No Cookies on this date\n");
}

#[test]
fn unpadded_date_matches_unpadded_log_days() {
    let file = write_log("cookie,timestamp\nA,2018-1-9T10:00:00+00:00\n");
    let output = run(&[file.path().to_str().unwrap(), "-d", "2018-1-9"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "A\n");
}

#[test]
fn missing_date_is_a_usage_error() {
    // A path that does not exist: a usage error must come before any file access.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let output = run(&[path.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Please add -d followed by a date"));
}

#[test]
fn invalid_date_is_a_usage_error() {
    let file = write_log(LOG);
    let output = run(&[file.path().to_str().unwrap(), "-d", "2018-13-40"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let output = run(&[path.to_str().unwrap(), "-d", "2018-12-09"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}

#[test]
fn malformed_log_exits_with_failure() {
    let file = write_log("cookie,timestamp\nA,2018-12-09\n");
    let output = run(&[file.path().to_str().unwrap(), "-d", "2018-12-09"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
