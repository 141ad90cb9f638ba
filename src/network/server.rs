//! TCP Server
//!
//! Accepts connections and hands each one to its own thread.

use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread;

use crate::config::Config;
use crate::error::{Result, SockError};
use super::connection::{CloseReason, Connection};

/// TCP echo server
pub struct Server {
    config: Config,
    listener: TcpListener,
}

impl Server {
    /// Bind the listening socket described by `config.listen_addr`.
    ///
    /// Fails with [`SockError::Bind`] if the address is taken or invalid.
    pub fn bind(config: Config) -> Result<Self> {
        let listener = TcpListener::bind(&config.listen_addr).map_err(|source| SockError::Bind {
            addr: config.listen_addr.clone(),
            source,
        })?;

        Ok(Self { config, listener })
    }

    /// Address actually bound (useful after binding port 0)
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept forever (blocking)
    ///
    /// Each accepted stream gets a dedicated thread; the loop goes straight
    /// back to `accept` without waiting on it. A failed accept is logged and
    /// skipped.
    pub fn run(&self) -> Result<()> {
        tracing::info!("服务器启动，监听地址: {}", self.config.listen_addr);
        tracing::info!("等待客户端连接...");

        for incoming in self.listener.incoming() {
            match incoming {
                Ok(stream) => self.dispatch(stream),
                Err(e) => {
                    tracing::warn!("{}", SockError::Accept(e));
                }
            }
        }

        // `incoming` never yields None
        Ok(())
    }

    fn dispatch(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        tracing::info!("客户端连接: {}", peer);

        let config = self.config.clone();
        let spawned = thread::Builder::new()
            .name(format!("conn-{}", peer))
            .spawn(move || serve(stream, &config));

        if let Err(e) = spawned {
            // the stream moved into the failed closure and is already closed
            tracing::error!("Failed to spawn handler for {}: {}", peer, e);
        }
    }
}

/// Run one connection to completion on the current thread
fn serve(stream: TcpStream, config: &Config) {
    let mut connection = match Connection::new(stream, config) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to set up connection: {}", e);
            return;
        }
    };

    match connection.handle() {
        Ok(CloseReason::Quit) => {
            tracing::info!("客户端 {} 已断开 (quit)", connection.peer_addr());
        }
        Ok(CloseReason::PeerClosed) => {
            tracing::info!("客户端 {} 已断开", connection.peer_addr());
        }
        Err(e) => {
            tracing::warn!("客户端 {} 断开连接: {}", connection.peer_addr(), e);
        }
    }
}
