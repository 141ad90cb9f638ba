//! Socket basics walkthrough
//!
//! A one-shot client/server exchange over an ephemeral loopback port that
//! narrates each socket call as it happens. Sequencing is done with sleeps,
//! not signalling, so it is only suitable for illustration.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

use crate::error::Result;

pub const CLIENT_MESSAGE: &str = "Hello from client!";
pub const SERVER_MESSAGE: &str = "Hello from server!";

const BUFFER_SIZE: usize = 1024;

/// What each side of the exchange received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutcome {
    /// Data the server side read (`None` if its half never completed)
    pub server_received: Option<String>,

    /// Data the client side read back
    pub client_received: String,
}

/// The walkthrough, with an adjustable pause between steps
#[derive(Debug, Clone)]
pub struct Demo {
    pause: Duration,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            pause: Duration::from_secs(1),
        }
    }
}

impl Demo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sleep used to order the client after the server
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn run(&self) -> Result<DemoOutcome> {
        println!("=== Socket基础概念演示 ===");
        println!();

        // 1. passive socket
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        println!("1. 监听Socket创建成功，地址: {}", addr);
        println!("   - Socket是操作系统提供的网络通信端点");
        println!("   - 包含IP地址和端口号");
        println!();

        let server = thread::Builder::new()
            .name("demo-server".to_string())
            .spawn(move || serve_once(listener))?;

        thread::sleep(self.pause);

        let mut stream = TcpStream::connect(addr)?;
        println!("2. 客户端连接到服务器: {}", addr);
        println!("   - connect()创建客户端socket");
        println!("   - 通过三次握手建立连接");
        println!();

        stream.write_all(CLIENT_MESSAGE.as_bytes())?;
        println!("3. 客户端发送数据: {}", CLIENT_MESSAGE);
        println!();

        let mut buffer = [0u8; BUFFER_SIZE];
        let n = stream.read(&mut buffer)?;
        let client_received = String::from_utf8_lossy(&buffer[..n]).into_owned();
        println!("4. 客户端收到响应: {}", client_received);
        println!();

        thread::sleep(self.pause);

        let server_received = match server.join() {
            Ok(Ok(received)) => Some(received),
            Ok(Err(e)) => {
                tracing::warn!("Demo server side failed: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!("Demo server thread panicked");
                None
            }
        };

        Ok(DemoOutcome {
            server_received,
            client_received,
        })
    }
}

/// Server half: accept, read once, answer once
fn serve_once(listener: TcpListener) -> std::io::Result<String> {
    let (mut conn, peer) = listener.accept()?;
    println!("2. 接受连接: {}", peer);
    println!("   - accept()返回一个新的socket用于通信");
    println!("   - 原监听socket继续监听新的连接");
    println!();

    let mut buffer = [0u8; BUFFER_SIZE];
    let n = conn.read(&mut buffer)?;
    let received = String::from_utf8_lossy(&buffer[..n]).into_owned();
    println!("3. 收到数据: {}", received);
    println!("   - read()从socket读取数据");
    println!("   - 数据通过内核缓冲区传输");
    println!();

    conn.write_all(SERVER_MESSAGE.as_bytes())?;
    println!("4. 发送响应: {}", SERVER_MESSAGE);
    println!("   - write()向socket写入数据");
    println!("   - 数据通过TCP协议传输");

    Ok(received)
}
