//! Frames received from the live-stream bridge.
//!
//! Field names follow the bridge's camelCase JSON. Missing fields fall back
//! to empty or zero values; a chat line without text is simply not a guess.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UpstreamFrame {
    Connected {
        #[serde(rename = "roomId", default)]
        room_id: String,
    },
    Error {
        #[serde(default)]
        message: String,
    },
    Chat(UpstreamChat),
    Gift(UpstreamGift),
    Like(UpstreamLike),
    Disconnected,
    #[serde(other)]
    Unknown,
}

impl UpstreamFrame {
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamFrame::Connected { .. } => "connected",
            UpstreamFrame::Error { .. } => "error",
            UpstreamFrame::Chat(_) => "chat",
            UpstreamFrame::Gift(_) => "gift",
            UpstreamFrame::Like(_) => "like",
            UpstreamFrame::Disconnected => "disconnected",
            UpstreamFrame::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamChat {
    pub unique_id: String,
    pub nickname: Option<String>,
    pub comment: Option<String>,
    pub profile_picture_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamGift {
    pub unique_id: String,
    pub nickname: Option<String>,
    pub gift_name: Option<String>,
    pub gift_type: i32,
    pub repeat_count: u32,
    pub repeat_end: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpstreamLike {
    pub unique_id: String,
    pub nickname: Option<String>,
    pub like_count: u64,
    pub total_like_count: u64,
}
