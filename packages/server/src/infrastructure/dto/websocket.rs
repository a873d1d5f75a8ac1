//! Subscriber WebSocket frames.
//!
//! Every frame is `{"event": <name>, "data": <payload>}`.

use serde::{Deserialize, Serialize};

/// Frames sent from the relay to subscribers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    Status(StatusPayload),
    NewGuess(NewGuessPayload),
    GiftEvent(GiftEventPayload),
    Like(LikePayload),
}

/// Frames sent from subscribers to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    ChangeUsername(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusType {
    Warning,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    pub r#type: StatusType,
    pub msg: String,
}

/// Guesses and forwarded commands share this payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuessPayload {
    pub unique_id: String,
    pub nickname: String,
    pub word: String,
    pub picture: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftEventPayload {
    pub unique_id: String,
    pub nickname: String,
    pub gift_name: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikePayload {
    pub unique_id: String,
    pub nickname: String,
    pub like_count: u64,
    pub total_like_count: u64,
}
