//! Fan-out abstraction towards subscribers.
//!
//! The domain defines what it needs from the delivery mechanism; the
//! infrastructure layer provides the concrete transport (dependency
//! inversion).

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{PublishError, RelayEvent, SubscriberId};

/// Outbound channel of one subscriber, carrying serialized frames
pub type SubscriberChannel = mpsc::UnboundedSender<String>;

/// Publishes relay events to connected subscribers
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Register a subscriber so it receives broadcasts
    async fn register_subscriber(&self, subscriber_id: SubscriberId, channel: SubscriberChannel);

    /// Stop delivering to a subscriber
    async fn unregister_subscriber(&self, subscriber_id: &SubscriberId);

    /// Deliver an event to a single subscriber
    async fn push_to(
        &self,
        subscriber_id: &SubscriberId,
        event: &RelayEvent,
    ) -> Result<(), PublishError>;

    /// Deliver an event to every subscriber.
    ///
    /// Fire-and-forget: a subscriber whose channel is gone is skipped.
    async fn broadcast(&self, event: &RelayEvent) -> Result<(), PublishError>;

    /// Number of registered subscribers
    async fn count_subscribers(&self) -> usize;
}
