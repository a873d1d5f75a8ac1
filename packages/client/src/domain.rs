//! Domain logic for client-side operations.
//!
//! Pure functions without side effects, kept apart from the socket code so
//! they are easy to test.

use crate::error::ClientError;

/// What a line typed at the prompt asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    /// Switch the relay to this username
    ChangeTarget(String),
    /// Clear the relay's target
    ClearTarget,
    /// Leave the client
    Quit,
}

/// Interpret a line typed at the prompt.
///
/// Blank lines yield `None`. `/clear` and `/quit` are commands; anything
/// else is sent to the relay as the new username.
pub fn parse_prompt_line(line: &str) -> Option<PromptCommand> {
    let line = line.trim();
    match line {
        "" => None,
        "/clear" => Some(PromptCommand::ClearTarget),
        "/quit" | "/exit" => Some(PromptCommand::Quit),
        username => Some(PromptCommand::ChangeTarget(username.to_string())),
    }
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    // a malformed frame we built ourselves won't get better by reconnecting
    if matches!(error, ClientError::InvalidMessage(_)) {
        return false;
    }

    current_attempt < max_attempts
}
