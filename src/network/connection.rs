//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::Result;
use crate::protocol::{read_terminated_line, write_reply, Reply, Request};

/// Why a handler stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// Client sent a quit token and got the farewell
    Quit,

    /// Client went away (EOF, reset, abort, timeout)
    PeerClosed,
}

/// Handles a single client connection
///
/// The stream is closed when the `Connection` is dropped, so every exit
/// path out of [`Connection::handle`] (including a panic) releases it.
pub struct Connection {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered, flushed after every reply)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging and the greeting
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    ///
    /// Sets up buffered I/O and configures timeouts
    pub fn new(stream: TcpStream, config: &Config) -> Result<Self> {
        // Get peer address before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        stream.set_nodelay(config.nodelay)?;
        stream.set_read_timeout(config.read_timeout())?;
        stream.set_write_timeout(config.write_timeout())?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Greets the peer, then echoes lines until a quit token or the peer
    /// goes away. Returns an error only for failures that are not a
    /// plain disconnect.
    pub fn handle(&mut self) -> Result<CloseReason> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let greeting = Reply::Greeting { peer: self.peer_addr.clone() };
        if let Some(reason) = self.send(&greeting)? {
            return Ok(reason);
        }

        loop {
            // AWAIT_LINE; a tail cut off by EOF is not a line
            let line = match read_terminated_line(&mut self.reader) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(CloseReason::PeerClosed);
                }
                Err(e) if e.is_disconnect() => {
                    tracing::debug!("Client {} dropped: {}", self.peer_addr, e);
                    return Ok(CloseReason::PeerClosed);
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e);
                }
            };

            let request = Request::parse(&line);
            tracing::debug!("收到来自 {} 的消息: {:?}", self.peer_addr, request);

            match request {
                Request::Quit => {
                    // FAREWELL_SENT -> CLOSED
                    return Ok(self.send(&Reply::Farewell)?.unwrap_or(CloseReason::Quit));
                }
                Request::Text(text) => {
                    // ECHO_SENT -> AWAIT_LINE
                    if let Some(reason) = self.send(&Reply::Echo(text))? {
                        return Ok(reason);
                    }
                }
            }
        }
    }

    /// Send one reply.
    ///
    /// `Ok(Some(PeerClosed))` when the client vanished before the write
    /// landed; that is a normal ending, not a server error.
    fn send(&mut self, reply: &Reply) -> Result<Option<CloseReason>> {
        match write_reply(&mut self.writer, reply) {
            Ok(()) => Ok(None),
            Err(e) if e.is_disconnect() => {
                tracing::debug!(
                    "Client {} disconnected before reply could be sent: {}",
                    self.peer_addr, e
                );
                Ok(Some(CloseReason::PeerClosed))
            }
            Err(e) => {
                tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                Err(e)
            }
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
