//! # sockecho
//!
//! A line-oriented TCP echo server and interactive client:
//! - Newline-delimited text protocol with a greeting, echo and farewell
//! - One thread per accepted connection, no shared state between them
//! - Client with a concurrent reader and a paced console writer
//! - A narrated single-shot socket walkthrough
//! - A one-shot chat-completion helper
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌──────────────┐    line\n     ┌─────────────────────────────┐
//! │    Client    │ ────────────▶ │        Server (accept)      │
//! │ reader  │ fg │ ◀──────────── │   ┌────────┐   ┌────────┐   │
//! └──────────────┘  reply line\n │   │ conn 1 │ … │ conn N │   │
//!                                │   └────────┘   └────────┘   │
//!                                └─────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod client;
pub mod demo;
pub mod chat;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SockError};
pub use config::{ChatConfig, Config, DisconnectPolicy};
pub use network::Server;
pub use client::{Client, SessionEnd};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of sockecho
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
