//! Terminal viewer for a Tebak relay.
//!
//! Subscribes to the relay's WebSocket, prints every event, and sends the
//! usernames typed at the prompt as target changes.

pub mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
