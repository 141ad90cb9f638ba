//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (line-delimited text)
//!
//! Every message is UTF-8 text terminated by a single `\n`. There is no
//! length prefix and no escaping; a message ends at the first newline.
//!
//! ```text
//! server -> client   欢迎来到Socket服务器! 你的地址: <peer>\n     (on accept)
//! client -> server   <text>\n
//! server -> client   服务器回复: <trimmed text>\n
//! client -> server   quit\n | exit\n
//! server -> client   服务器: 再见!\n                              (then close)
//! ```

mod request;
mod reply;
mod codec;

pub use request::{Request, QUIT_TOKENS};
pub(crate) use request::is_quit;
pub use reply::{Reply, ECHO_PREFIX, FAREWELL, GREETING_PREFIX};
pub use codec::{read_line, read_terminated_line, write_line, write_reply};
