//! Domain error types.

use thiserror::Error;

/// Target user validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetUserError {
    #[error("Target user is empty")]
    Empty,

    #[error("Target user is too long: {0} characters (max {max})", max = super::value_object::TargetUser::MAX_LENGTH)]
    TooLong(usize),

    #[error("Target user contains invalid character '{0}'")]
    InvalidCharacter(char),
}

/// Upstream connector errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    /// Network or socket level failure
    #[error("Upstream transport error: {0}")]
    Transport(String),

    /// The upstream refused the session (user offline, not live, ...)
    #[error("Upstream rejected the connection: {0}")]
    Rejected(String),

    #[error("Timed out waiting for the upstream to connect")]
    Timeout,

    /// The upstream sent something we could not make sense of
    #[error("Upstream protocol error: {0}")]
    Protocol(String),

    #[error("Connection is already closed")]
    AlreadyClosed,
}

/// Fan-out errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("Subscriber '{0}' not found")]
    SubscriberNotFound(String),

    #[error("Failed to push event: {0}")]
    PushFailed(String),
}
