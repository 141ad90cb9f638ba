//! Integration tests for sockecho
//!
//! End-to-end scenario over a real listener, plus bind conflicts.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::thread;
use std::time::Duration;

use sockecho::network::Server;
use sockecho::{Config, SockError};

// =============================================================================
// End-to-end
// =============================================================================

#[test]
fn test_hello_then_quit_then_eof() {
    let config = Config::builder().listen_addr("127.0.0.1:0").build();
    let server = Server::bind(config).unwrap();
    let addr = server.local_addr().unwrap();
    thread::spawn(move || server.run());

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut line = String::new();

    reader.read_line(&mut line).unwrap();
    assert!(line.starts_with("欢迎来到Socket服务器! 你的地址: "));
    assert!(line.ends_with('\n'));

    stream.write_all(b"hello\n").unwrap();
    line.clear();
    reader.read_line(&mut line).unwrap();
    assert_eq!(line, "服务器回复: hello\n");

    stream.write_all(b"quit\n").unwrap();
    line.clear();
    reader.read_line(&mut line).unwrap();
    assert_eq!(line, "服务器: 再见!\n");

    line.clear();
    assert_eq!(reader.read_line(&mut line).unwrap(), 0);
}

// =============================================================================
// Bind conflicts
// =============================================================================

#[test]
fn test_second_bind_fails_first_still_serves() {
    let first = Server::bind(Config::builder().listen_addr("127.0.0.1:0").build()).unwrap();
    let addr = first.local_addr().unwrap();

    let second = Server::bind(Config::builder().listen_addr(addr.to_string()).build());
    match second {
        Err(SockError::Bind { addr: reported, .. }) => assert_eq!(reported, addr.to_string()),
        Err(e) => panic!("expected Bind error, got {}", e),
        Ok(_) => panic!("second bind on {} should fail", addr),
    }

    thread::spawn(move || first.run());

    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut greeting = String::new();
    reader.read_line(&mut greeting).unwrap();

    stream.write_all(b"ping\n").unwrap();
    let mut reply = String::new();
    reader.read_line(&mut reply).unwrap();
    assert_eq!(reply, "服务器回复: ping\n");
}

#[test]
fn test_bind_rejects_malformed_address() {
    let result = Server::bind(Config::builder().listen_addr("not an address").build());
    assert!(matches!(result, Err(SockError::Bind { .. })));
}
