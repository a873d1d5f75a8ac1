//! Relay configuration.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use thiserror::Error;

use crate::domain::{
    BannedWords, DEFAULT_MAX_RAW_LENGTH, GuessExtractor, StreakPolicy,
    gift::DEFAULT_STREAK_GIFT_TYPE,
};

pub const DEFAULT_UPSTREAM_URL: &str = "ws://127.0.0.1:8081/live";
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read banned words from '{path}': {source}")]
    BannedWordsFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything the relay needs besides the listening address
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub upstream_url: String,
    pub static_dir: PathBuf,
    pub max_raw_length: usize,
    pub retry_delay: Duration,
    pub connect_timeout: Duration,
    pub streak_gift_types: Vec<i32>,
    pub banned_words_file: Option<PathBuf>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            static_dir: PathBuf::from("public"),
            max_raw_length: DEFAULT_MAX_RAW_LENGTH,
            retry_delay: DEFAULT_RETRY_DELAY,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            streak_gift_types: vec![DEFAULT_STREAK_GIFT_TYPE],
            banned_words_file: None,
        }
    }
}

impl RelayConfig {
    pub fn extractor(&self) -> GuessExtractor {
        GuessExtractor::new(self.max_raw_length)
    }

    pub fn streak_policy(&self) -> StreakPolicy {
        StreakPolicy::new(self.streak_gift_types.iter().copied())
    }

    /// Default banned words plus the entries of `banned_words_file`, if set
    pub fn banned_words(&self) -> Result<BannedWords, ConfigError> {
        load_banned_words(self.banned_words_file.as_deref())
    }
}

/// Build the banned-word filter, extending the defaults with `path`.
pub fn load_banned_words(path: Option<&Path>) -> Result<BannedWords, ConfigError> {
    let mut banned_words = BannedWords::default();
    let Some(path) = path else {
        return Ok(banned_words);
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::BannedWordsFile {
        path: path.to_path_buf(),
        source,
    })?;
    let before = banned_words.len();
    banned_words.extend(BannedWords::parse_list(&content));
    tracing::info!(
        "Loaded {} extra banned word(s) from {}",
        banned_words.len() - before,
        path.display()
    );

    Ok(banned_words)
}
