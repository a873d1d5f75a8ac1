//! Events flowing through the relay.
//!
//! `LiveEvent` is what an upstream connection produces; `RelayEvent` is what
//! the relay publishes to its subscribers.

/// A chat line received from the live stream
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatEvent {
    pub sender_id: String,
    pub display_name: String,
    pub raw_text: String,
    pub avatar_url: String,
}

/// A gift received from the live stream, before streak suppression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GiftEvent {
    pub sender_id: String,
    pub display_name: String,
    pub gift_name: String,
    pub gift_type: i32,
    pub repeat_count: u32,
    pub repeat_end: bool,
}

/// Likes received from the live stream
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LikeEvent {
    pub sender_id: String,
    pub display_name: String,
    pub like_count: u64,
    pub total_like_count: u64,
}

/// Everything an upstream connection can emit after it is established
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveEvent {
    Chat(ChatEvent),
    Gift(GiftEvent),
    Like(LikeEvent),
    Disconnected,
}

/// A validated guess word extracted from chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessResult {
    pub sender_id: String,
    pub display_name: String,
    /// 4 to 8 uppercase ASCII letters
    pub word: String,
    pub avatar_url: String,
}

/// A chat line starting with `!`, forwarded without validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEvent {
    pub sender_id: String,
    pub display_name: String,
    /// Trimmed, uppercased chat text including the leading `!`
    pub raw: String,
    pub avatar_url: String,
}

/// Severity of a status notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Warning,
    Success,
    Error,
}

/// Status notification shown by the overlay
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub msg: String,
}

impl Status {
    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Warning,
            msg: msg.into(),
        }
    }

    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Success,
            msg: msg.into(),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            level: StatusLevel::Error,
            msg: msg.into(),
        }
    }
}

/// Events published to every subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayEvent {
    Status(Status),
    Guess(GuessResult),
    Command(CommandEvent),
    /// Gift after streak suppression; `amount` is at least 1
    Gift {
        sender_id: String,
        display_name: String,
        gift_name: String,
        amount: u32,
    },
    Like(LikeEvent),
}

impl RelayEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            RelayEvent::Status(_) => "status",
            RelayEvent::Guess(_) => "guess",
            RelayEvent::Command(_) => "command",
            RelayEvent::Gift { .. } => "gift",
            RelayEvent::Like(_) => "like",
        }
    }
}
