//! Request handlers.

mod http;
mod websocket;

pub use http::{health_check, index, session_snapshot};
pub use websocket::websocket_handler;
