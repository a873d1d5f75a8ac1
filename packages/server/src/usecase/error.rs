//! UseCase error types.

use thiserror::Error;

use crate::domain::{PublishError, TargetUserError};

/// Errors talking to the session actor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Session worker is not running")]
    WorkerGone,
}

/// Errors of a `change_username` request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChangeTargetError {
    #[error("Invalid target user: {0}")]
    InvalidTarget(#[from] TargetUserError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}
