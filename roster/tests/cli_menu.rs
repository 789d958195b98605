//! CLI tests for the `roster` binary.
//!
//! Spawns the binary with scripted stdin and checks the store file and the
//! console transcript.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

use roster::io::config::{RosterConfig, write_config};
use roster::io::store::RecordStore;
use roster::test_support::{SAMPLE_CSV, seed_store};

fn run_roster(dir: &std::path::Path, args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_roster"))
        .current_dir(dir)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn roster");
    if let Some(mut pipe) = child.stdin.take() {
        // The process may exit before reading (e.g. bad config).
        let _ = pipe.write_all(stdin.as_bytes());
    }
    child.wait_with_output().expect("roster output")
}

#[test]
fn update_email_through_the_menu() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = seed_store(temp.path(), SAMPLE_CSV);

    let output = run_roster(
        temp.path(),
        &["--store", "students.csv"],
        "4\nALICE\nnew@x.com\n5\n",
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Current email: alice@x.com"));
    assert!(stdout.contains("Email for ALICE successfully updated."));
    let snapshot = store.read_all().expect("read store");
    assert_eq!(snapshot.records[0].email, "new@x.com");
    assert_eq!(
        fs::read_to_string(store.path()).expect("read"),
        SAMPLE_CSV.replace("alice@x.com", "new@x.com")
    );
}

#[test]
fn store_path_comes_from_config_file() {
    let temp = tempfile::tempdir().expect("tempdir");
    let store = seed_store(temp.path(), SAMPLE_CSV);
    write_config(
        &temp.path().join("roster.toml"),
        &RosterConfig {
            store_path: store.path().to_path_buf(),
            atomic_rewrite: false,
        },
    )
    .expect("write config");

    let output = run_roster(temp.path(), &[], "2\n3\n5\n");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Course3:\nAlice - alice@x.com - 85.00\n"));
}

#[test]
fn missing_store_does_not_end_the_session() {
    let temp = tempfile::tempdir().expect("tempdir");

    let output = run_roster(temp.path(), &["--store", "absent.csv"], "1\n5\n");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8(output.stdout).expect("utf8");
    assert!(stdout.contains("Error: File not found"));
    assert!(stdout.contains("Goodbye!"));
}

#[test]
fn invalid_config_exits_with_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    fs::write(temp.path().join("roster.toml"), "store_path = 5\n").expect("write config");

    let output = run_roster(temp.path(), &[], "5\n");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).expect("utf8");
    assert!(stderr.contains("load config"));
}
