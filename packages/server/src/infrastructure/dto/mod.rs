//! Data Transfer Objects (DTOs) for the relay.
//!
//! DTOs are organized by protocol:
//! - `websocket`: frames exchanged with subscribers
//! - `upstream`: frames received from the live-stream bridge
//! - `http`: HTTP API response DTOs

pub mod conversion;
pub mod http;
pub mod upstream;
pub mod websocket;
