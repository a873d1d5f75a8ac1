//! Upstream connector implementations.

pub mod websocket;

pub use websocket::{WebSocketConnectionHandle, WebSocketLiveConnector};
