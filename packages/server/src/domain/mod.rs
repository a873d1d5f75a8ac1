//! Domain layer: value objects, events, pure algorithms and the traits the
//! domain needs from the outside world.

pub mod connector;
pub mod error;
pub mod event;
pub mod gift;
pub mod guess;
pub mod moderation;
pub mod publisher;
pub mod session;
pub mod value_object;

pub use connector::{ConnectionHandle, LiveConnection, LiveConnector};
#[cfg(test)]
pub use connector::MockLiveConnector;
pub use error::{ConnectorError, PublishError, TargetUserError};
pub use event::{
    ChatEvent, CommandEvent, GiftEvent, GuessResult, LikeEvent, LiveEvent, RelayEvent, Status,
    StatusLevel,
};
pub use gift::StreakPolicy;
pub use guess::{ChatIntent, DEFAULT_MAX_RAW_LENGTH, GuessExtractor};
pub use moderation::BannedWords;
pub use publisher::{EventPublisher, SubscriberChannel};
pub use session::{Phase, SessionAction, SessionSnapshot, SessionState};
pub use value_object::{Generation, SubscriberId, TargetUser};
