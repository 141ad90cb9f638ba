//! Network Module
//!
//! TCP server and per-connection handling.
//!
//! ## Architecture
//! - Single acceptor loop
//! - One thread per accepted connection, no shared state between them
//! - Each thread owns its stream and closes it on exit

mod server;
mod connection;

pub use server::Server;
pub use connection::{CloseReason, Connection};
