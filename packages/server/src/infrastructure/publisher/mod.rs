//! イベント配信（通知）の実装
//!
//! ## 実装
//!
//! - `websocket`: WebSocket 購読者への配信

pub mod websocket;

pub use websocket::WebSocketEventPublisher;
