//! Live-chat guess relay.
//!
//! Connects to one live stream at a time through an upstream bridge, turns
//! chat lines into guess words, and rebroadcasts guesses, gifts and likes to
//! every connected overlay.

pub mod app;
pub mod config;

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
