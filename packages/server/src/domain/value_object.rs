//! Value objects.

use std::fmt;

use uuid::Uuid;

use super::error::TargetUserError;

/// Identifier of the live broadcaster currently relayed.
///
/// Input is trimmed and a single leading `@` is removed, so `"@alice "` and
/// `"alice"` name the same target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetUser(String);

impl TargetUser {
    pub const MAX_LENGTH: usize = 64;

    pub fn new(raw: &str) -> Result<Self, TargetUserError> {
        let trimmed = raw.trim();
        let name = trimmed.strip_prefix('@').unwrap_or(trimmed);

        if name.is_empty() {
            return Err(TargetUserError::Empty);
        }
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(TargetUserError::TooLong(length));
        }
        if let Some(c) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '.'))
        {
            return Err(TargetUserError::InvalidCharacter(c));
        }

        Ok(Self(name.to_string()))
    }

    /// Parse a `change_username` request. Blank input clears the target.
    pub fn parse_request(raw: &str) -> Result<Option<Self>, TargetUserError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        Self::new(raw).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Connection attempt counter.
///
/// Bumped on every target change and every (re)connect; async results that
/// carry an older generation are stale and must be ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl From<u64> for Generation {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Identifier of one connected browser / terminal subscriber
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(String);

impl SubscriberId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SubscriberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for SubscriberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
