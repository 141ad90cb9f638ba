//! Tests for the sockecho binary
//!
//! These tests verify:
//! - Usage goes to stdout with exit 0 when no or an unknown subcommand is given
//! - The client process ends (exit 0) when the server hangs up

use std::io::Write;
use std::net::TcpListener;
use std::process::{Command, Output, Stdio};
use std::thread;

// =============================================================================
// Helper Functions
// =============================================================================

fn sockecho(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sockecho"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .unwrap()
}

// =============================================================================
// Usage Tests
// =============================================================================

#[test]
fn test_no_subcommand_prints_usage() {
    let output = sockecho(&[]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout: {}", stdout);
    assert!(stdout.contains("localhost:8080"));
}

#[test]
fn test_unknown_subcommand_prints_usage() {
    let output = sockecho(&["bogus"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage:"), "stdout: {}", stdout);
    assert!(stdout.contains("bogus"));
}

// =============================================================================
// Client Tests
// =============================================================================

#[test]
fn test_client_exits_when_server_hangs_up() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    // greets, then drops the connection
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        stream.write_all("欢迎来到Socket服务器! 你的地址: test\n".as_bytes()).unwrap();
    });

    // stdin stays open, so only the server hang-up can end the process
    let mut child = Command::new(env!("CARGO_BIN_EXE_sockecho"))
        .args(["client", "--server", &addr.to_string()])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let stdin = child.stdin.take();

    let output = child.wait_with_output().unwrap();
    drop(stdin);
    server.join().unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("欢迎来到Socket服务器!"), "stdout: {}", stdout);
    assert!(stdout.contains("与服务器的连接断开"), "stdout: {}", stdout);
}

#[test]
fn test_client_dial_failure_exits_zero() {
    let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();

    let output = sockecho(&["client", "--server", &addr.to_string()]);

    assert!(output.status.success());
}
