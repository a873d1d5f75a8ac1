//! Upstream live-stream connector abstraction.
//!
//! The domain only needs two things from the live platform: a way to open a
//! session for a target user, and a stream of events for the lifetime of that
//! session. Concrete transports live in the infrastructure layer.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectorError, LiveEvent, TargetUser};

/// Opens upstream live sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LiveConnector: Send + Sync {
    /// Connect to the live session of `target`.
    ///
    /// Resolves once the upstream confirms the room, or fails with the reason
    /// the upstream gave.
    async fn connect(&self, target: &TargetUser) -> Result<LiveConnection, ConnectorError>;
}

/// Explicit teardown of an upstream session
pub trait ConnectionHandle: Send {
    /// Best-effort close. Calling it twice yields `AlreadyClosed`.
    fn disconnect(&mut self) -> Result<(), ConnectorError>;
}

/// An established upstream session.
///
/// `events` is a lazy, non-restartable sequence: it ends (or yields
/// `LiveEvent::Disconnected`) when the upstream goes away, and a new
/// connection is needed to receive anything else.
pub struct LiveConnection {
    pub room_id: String,
    pub events: mpsc::Receiver<LiveEvent>,
    pub handle: Box<dyn ConnectionHandle>,
}

impl LiveConnection {
    pub fn new(
        room_id: impl Into<String>,
        events: mpsc::Receiver<LiveEvent>,
        handle: Box<dyn ConnectionHandle>,
    ) -> Self {
        Self {
            room_id: room_id.into(),
            events,
            handle,
        }
    }
}

impl std::fmt::Debug for LiveConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveConnection")
            .field("room_id", &self.room_id)
            .finish_non_exhaustive()
    }
}
