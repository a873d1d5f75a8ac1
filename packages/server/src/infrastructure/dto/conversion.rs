//! Conversion logic between DTOs and domain types.

use tebak_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    ChatEvent, GiftEvent, LikeEvent, LiveEvent, RelayEvent, SessionSnapshot, Status, StatusLevel,
};
use crate::infrastructure::dto::{http, upstream, websocket as dto};

// ========================================
// Upstream DTO → Domain
// ========================================

impl From<upstream::UpstreamChat> for ChatEvent {
    fn from(dto: upstream::UpstreamChat) -> Self {
        Self {
            sender_id: dto.unique_id,
            display_name: dto.nickname.unwrap_or_default(),
            raw_text: dto.comment.unwrap_or_default(),
            avatar_url: dto.profile_picture_url.unwrap_or_default(),
        }
    }
}

impl From<upstream::UpstreamGift> for GiftEvent {
    fn from(dto: upstream::UpstreamGift) -> Self {
        Self {
            sender_id: dto.unique_id,
            display_name: dto.nickname.unwrap_or_default(),
            gift_name: dto.gift_name.unwrap_or_default(),
            gift_type: dto.gift_type,
            repeat_count: dto.repeat_count,
            repeat_end: dto.repeat_end,
        }
    }
}

impl From<upstream::UpstreamLike> for LikeEvent {
    fn from(dto: upstream::UpstreamLike) -> Self {
        Self {
            sender_id: dto.unique_id,
            display_name: dto.nickname.unwrap_or_default(),
            like_count: dto.like_count,
            total_like_count: dto.total_like_count,
        }
    }
}

impl upstream::UpstreamFrame {
    /// The live event carried by this frame.
    ///
    /// Handshake frames (`connected`, `error`) and unknown frames carry none.
    pub fn into_live_event(self) -> Option<LiveEvent> {
        match self {
            upstream::UpstreamFrame::Chat(chat) => Some(LiveEvent::Chat(chat.into())),
            upstream::UpstreamFrame::Gift(gift) => Some(LiveEvent::Gift(gift.into())),
            upstream::UpstreamFrame::Like(like) => Some(LiveEvent::Like(like.into())),
            upstream::UpstreamFrame::Disconnected => Some(LiveEvent::Disconnected),
            upstream::UpstreamFrame::Connected { .. }
            | upstream::UpstreamFrame::Error { .. }
            | upstream::UpstreamFrame::Unknown => None,
        }
    }
}

// ========================================
// Domain → Subscriber DTO
// ========================================

impl From<StatusLevel> for dto::StatusType {
    fn from(level: StatusLevel) -> Self {
        match level {
            StatusLevel::Warning => Self::Warning,
            StatusLevel::Success => Self::Success,
            StatusLevel::Error => Self::Error,
        }
    }
}

impl From<&Status> for dto::StatusPayload {
    fn from(status: &Status) -> Self {
        Self {
            r#type: status.level.into(),
            msg: status.msg.clone(),
        }
    }
}

impl From<&RelayEvent> for dto::ServerMessage {
    fn from(event: &RelayEvent) -> Self {
        match event {
            RelayEvent::Status(status) => Self::Status(status.into()),
            RelayEvent::Guess(guess) => Self::NewGuess(dto::NewGuessPayload {
                unique_id: guess.sender_id.clone(),
                nickname: guess.display_name.clone(),
                word: guess.word.clone(),
                picture: guess.avatar_url.clone(),
            }),
            RelayEvent::Command(command) => Self::NewGuess(dto::NewGuessPayload {
                unique_id: command.sender_id.clone(),
                nickname: command.display_name.clone(),
                word: command.raw.clone(),
                picture: command.avatar_url.clone(),
            }),
            RelayEvent::Gift {
                sender_id,
                display_name,
                gift_name,
                amount,
            } => Self::GiftEvent(dto::GiftEventPayload {
                unique_id: sender_id.clone(),
                nickname: display_name.clone(),
                gift_name: gift_name.clone(),
                amount: *amount,
            }),
            RelayEvent::Like(like) => Self::Like(dto::LikePayload {
                unique_id: like.sender_id.clone(),
                nickname: like.display_name.clone(),
                like_count: like.like_count,
                total_like_count: like.total_like_count,
            }),
        }
    }
}

// ========================================
// Domain → HTTP DTO
// ========================================

impl From<SessionSnapshot> for http::SessionSnapshotDto {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            target: snapshot.target.map(|target| target.to_string()),
            phase: snapshot.phase.as_str().to_string(),
            room_id: snapshot.room_id,
            generation: snapshot.generation.value(),
            since: timestamp_to_rfc3339(snapshot.since),
        }
    }
}
