//! Error types for sockecho
//!
//! Provides a unified error type for all operations.

use std::io;

use thiserror::Error;

/// Result type alias using SockError
pub type Result<T> = std::result::Result<T, SockError>;

/// Unified error type for sockecho operations
#[derive(Debug, Error)]
pub enum SockError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("监听失败 {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("连接服务器失败 {addr}: {source}")]
    Dial {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("接受连接失败: {0}")]
    Accept(#[source] io::Error),

    // -------------------------------------------------------------------------
    // Chat Errors
    // -------------------------------------------------------------------------
    #[error("Chat completion failed: {0}")]
    Chat(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SockError {
    /// Whether this error means the peer went away (or stopped talking
    /// long enough to hit a timeout) rather than something broke locally.
    pub fn is_disconnect(&self) -> bool {
        match self {
            SockError::Io(e) => is_disconnect_kind(e.kind()),
            _ => false,
        }
    }
}

/// io error kinds that end a connection normally
pub(crate) fn is_disconnect_kind(kind: io::ErrorKind) -> bool {
    matches!(
        kind,
        io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            // read timeout: unix reports WouldBlock, windows TimedOut
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_is_disconnect() {
        let err = SockError::from(io::Error::from(io::ErrorKind::ConnectionReset));
        assert!(err.is_disconnect());
    }

    #[test]
    fn test_permission_denied_is_not_disconnect() {
        let err = SockError::from(io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(!err.is_disconnect());
    }

    #[test]
    fn test_bind_error_message_names_address() {
        let err = SockError::Bind {
            addr: "localhost:8080".to_string(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        assert!(err.to_string().contains("localhost:8080"));
        assert!(!err.is_disconnect());
    }
}
