//! Client Module
//!
//! Interactive line client for the echo server.
//!
//! ## Threads
//! - Reader: owns the inbound half, prints every server line
//! - Foreground: owns the outbound half, forwards console input

mod session;

pub use session::{Client, Session, SessionEnd, PROMPT};
