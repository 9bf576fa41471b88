//! End-to-end console sessions against a real file

use std::time::Duration;
use tempfile::TempDir;
use tokio::time::timeout;
use wintail::{run_session, Config};

async fn session(content: &str, input: &'static [u8]) -> String {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("log.txt");
    std::fs::write(&path, content).unwrap();

    let output = timeout(
        Duration::from_secs(5),
        run_session(&path, &Config::default(), input, Vec::new()),
    )
    .await
    .unwrap()
    .unwrap();
    String::from_utf8(output).unwrap()
}

#[tokio::test]
async fn test_session_reports_snapshot_and_outcomes() {
    let output = session("hello\n", b"ab\nabc\n\nexit\n").await;

    assert!(output.contains("hello\n"));
    assert!(output.contains("Thank you! Message was valid.\n"));
    assert!(output.contains("Invalid: input had odd number of characters.\n"));
    assert!(output.contains("No input received\n"));
}

#[tokio::test]
async fn test_exit_stops_reading() {
    let output = session("", b"EXIT\nab\n").await;
    assert!(!output.contains("Thank you!"));
}

#[tokio::test]
async fn test_end_of_input_ends_session() {
    let output = session("base", b"abcd").await;
    assert!(output.contains("base"));
    assert!(output.contains("Thank you! Message was valid."));
}

#[tokio::test]
async fn test_missing_file_fails_session() {
    let temp_dir = TempDir::new().unwrap();
    let result = run_session(
        &temp_dir.path().join("absent.log"),
        &Config::default(),
        &b""[..],
        Vec::new(),
    )
    .await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Cannot tail"));
}
