//! WebSocket を使った EventPublisher 実装
//!
//! ## 責務
//!
//! - 購読者ごとの `UnboundedSender` を管理
//! - `RelayEvent` を `{"event": ..., "data": ...}` フレームに変換して送信
//!
//! WebSocket の受付と sender の生成は UI 層（`ui/handler/websocket.rs`）が行い、
//! この実装は受け取った sender を使って配信だけを行います。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{EventPublisher, PublishError, RelayEvent, SubscriberChannel, SubscriberId},
    infrastructure::dto::websocket::ServerMessage,
};

/// WebSocket を使った EventPublisher 実装
///
/// ```ignore
/// let subscribers = Arc::new(Mutex::new(HashMap::new()));
/// let publisher = WebSocketEventPublisher::new(subscribers.clone());
/// publisher.broadcast(&RelayEvent::Status(Status::success("LIVE: @alice"))).await?;
/// ```
pub struct WebSocketEventPublisher {
    /// Key: subscriber id
    subscribers: Arc<Mutex<HashMap<String, SubscriberChannel>>>,
}

impl WebSocketEventPublisher {
    pub fn new(subscribers: Arc<Mutex<HashMap<String, SubscriberChannel>>>) -> Self {
        Self { subscribers }
    }

    fn encode(event: &RelayEvent) -> Result<String, PublishError> {
        serde_json::to_string(&ServerMessage::from(event))
            .map_err(|e| PublishError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl EventPublisher for WebSocketEventPublisher {
    async fn register_subscriber(&self, subscriber_id: SubscriberId, channel: SubscriberChannel) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.insert(subscriber_id.as_str().to_string(), channel);
        tracing::debug!("Subscriber '{}' registered", subscriber_id);
    }

    async fn unregister_subscriber(&self, subscriber_id: &SubscriberId) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.remove(subscriber_id.as_str());
        tracing::debug!("Subscriber '{}' unregistered", subscriber_id);
    }

    async fn push_to(
        &self,
        subscriber_id: &SubscriberId,
        event: &RelayEvent,
    ) -> Result<(), PublishError> {
        let frame = Self::encode(event)?;
        let subscribers = self.subscribers.lock().await;

        let Some(sender) = subscribers.get(subscriber_id.as_str()) else {
            return Err(PublishError::SubscriberNotFound(
                subscriber_id.as_str().to_string(),
            ));
        };
        sender
            .send(frame)
            .map_err(|e| PublishError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed '{}' to subscriber '{}'", event.kind(), subscriber_id);
        Ok(())
    }

    async fn broadcast(&self, event: &RelayEvent) -> Result<(), PublishError> {
        let frame = Self::encode(event)?;
        let subscribers = self.subscribers.lock().await;

        for (subscriber_id, sender) in subscribers.iter() {
            // 一部の送信失敗は許容する
            if let Err(e) = sender.send(frame.clone()) {
                tracing::warn!(
                    "Failed to push '{}' to subscriber '{}': {}",
                    event.kind(),
                    subscriber_id,
                    e
                );
            }
        }
        tracing::debug!(
            "Broadcasted '{}' to {} subscriber(s)",
            event.kind(),
            subscribers.len()
        );

        Ok(())
    }

    async fn count_subscribers(&self) -> usize {
        self.subscribers.lock().await.len()
    }
}
