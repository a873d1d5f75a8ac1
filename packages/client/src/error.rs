//! Error types for the terminal client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection could not be opened or was lost
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A frame could not be parsed or built
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}
