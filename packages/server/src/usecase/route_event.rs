//! UseCase: route upstream events to subscribers
//!
//! Chat lines go through guess extraction and moderation, gifts through
//! streak suppression, likes straight through. Every upstream event yields at
//! most one published event.

use std::sync::Arc;

use crate::domain::{
    BannedWords, ChatEvent, ChatIntent, CommandEvent, EventPublisher, GiftEvent, GuessExtractor,
    GuessResult, LiveEvent, PublishError, RelayEvent, StreakPolicy,
};

pub struct RouteLiveEventUseCase {
    publisher: Arc<dyn EventPublisher>,
    extractor: GuessExtractor,
    banned_words: BannedWords,
    streak_policy: StreakPolicy,
}

impl RouteLiveEventUseCase {
    pub fn new(
        publisher: Arc<dyn EventPublisher>,
        extractor: GuessExtractor,
        banned_words: BannedWords,
        streak_policy: StreakPolicy,
    ) -> Self {
        Self {
            publisher,
            extractor,
            banned_words,
            streak_policy,
        }
    }

    /// Route one upstream event and publish the result, if any.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(event))` - the event that was broadcast
    /// * `Ok(None)` - the upstream event was dropped
    pub async fn execute(&self, event: LiveEvent) -> Result<Option<RelayEvent>, PublishError> {
        let Some(relay_event) = self.route(event) else {
            return Ok(None);
        };
        self.publisher.broadcast(&relay_event).await?;
        Ok(Some(relay_event))
    }

    /// Decide what, if anything, an upstream event turns into.
    pub fn route(&self, event: LiveEvent) -> Option<RelayEvent> {
        match event {
            LiveEvent::Chat(chat) => self.route_chat(chat),
            LiveEvent::Gift(gift) => self.route_gift(gift),
            LiveEvent::Like(like) => Some(RelayEvent::Like(like)),
            LiveEvent::Disconnected => None,
        }
    }

    fn route_chat(&self, chat: ChatEvent) -> Option<RelayEvent> {
        match self.extractor.classify(&chat.raw_text) {
            ChatIntent::Command(raw) => {
                tracing::info!("[COMMAND] {}: {}", chat.sender_id, raw);
                Some(RelayEvent::Command(CommandEvent {
                    sender_id: chat.sender_id,
                    display_name: chat.display_name,
                    raw,
                    avatar_url: chat.avatar_url,
                }))
            }
            ChatIntent::Guess(word) => {
                if !self.banned_words.is_allowed(&word) {
                    tracing::debug!("Dropped banned guess from '{}'", chat.sender_id);
                    return None;
                }
                tracing::info!(
                    "[GUESS] {} ({}): {}",
                    chat.sender_id,
                    chat.display_name,
                    word
                );
                Some(RelayEvent::Guess(GuessResult {
                    sender_id: chat.sender_id,
                    display_name: chat.display_name,
                    word,
                    avatar_url: chat.avatar_url,
                }))
            }
            ChatIntent::Nothing => None,
        }
    }

    fn route_gift(&self, gift: GiftEvent) -> Option<RelayEvent> {
        if self.streak_policy.is_mid_streak(gift.gift_type, gift.repeat_end) {
            return None;
        }
        Some(RelayEvent::Gift {
            sender_id: gift.sender_id,
            display_name: gift.display_name,
            gift_name: gift.gift_name,
            amount: gift.repeat_count.max(1),
        })
    }
}
