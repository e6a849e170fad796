// Integration tests for the command-line entry point
// Spawns the built binary; nothing here talks to the upstream API

use std::io::Write;
use std::process::Command;

fn binary() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_realestate-mcp"));
    cmd.env_remove("REALESTATE_SUBURBS_CSV")
        .env_remove("REALESTATE_API_BASE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_tools() {
    let output = binary()
        .arg("--list-tools")
        .output()
        .expect("Failed to run realestate-mcp --list-tools");

    assert!(output.status.success(), "exit status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("  - get-listings"), "stdout: {stdout}");
    assert!(stdout.contains("  - get-listing-detail"), "stdout: {stdout}");
}

#[test]
fn test_list_suburbs_from_table() {
    let mut table = tempfile::NamedTempFile::new().unwrap();
    writeln!(table, "name, code").unwrap();
    writeln!(table, "Mission Bay, 1234").unwrap();
    writeln!(table, "Ponsonby, 84").unwrap();

    let output = binary()
        .arg("--suburbs")
        .arg(table.path())
        .arg("--list-suburbs")
        .output()
        .expect("Failed to run realestate-mcp --list-suburbs");

    assert!(output.status.success(), "exit status: {:?}", output.status);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "1234\tmission bay\n84\tponsonby\n");
}

#[test]
fn test_missing_suburb_table_exits_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("suburbs.csv");

    let output = binary()
        .arg("--suburbs")
        .arg(&missing)
        .output()
        .expect("Failed to run realestate-mcp");

    assert!(!output.status.success(), "expected failure exit status");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to read suburb table"),
        "stderr should name the failed table. Got: {stderr}"
    );
}
