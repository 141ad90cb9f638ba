//! Reply definitions
//!
//! The three kinds of line the server sends.

use std::fmt;

pub const GREETING_PREFIX: &str = "欢迎来到Socket服务器! 你的地址: ";
pub const ECHO_PREFIX: &str = "服务器回复: ";
pub const FAREWELL: &str = "服务器: 再见!";

/// A line sent from server to client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Sent once, right after accept
    Greeting { peer: String },

    /// Sent for every non-quit line
    Echo(String),

    /// Sent in answer to a quit token, before closing
    Farewell,
}

impl Reply {
    /// Recognize a server line (terminator optional).
    ///
    /// Returns `None` for anything the server would never send.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line == FAREWELL {
            Some(Reply::Farewell)
        } else if let Some(peer) = line.strip_prefix(GREETING_PREFIX) {
            Some(Reply::Greeting { peer: peer.to_string() })
        } else {
            line.strip_prefix(ECHO_PREFIX).map(|text| Reply::Echo(text.to_string()))
        }
    }

    /// Encode as a full wire line, terminator included
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Greeting { peer } => write!(f, "{}{}", GREETING_PREFIX, peer),
            Reply::Echo(text) => write!(f, "{}{}", ECHO_PREFIX, text),
            Reply::Farewell => f.write_str(FAREWELL),
        }
    }
}
