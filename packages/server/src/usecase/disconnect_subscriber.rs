//! UseCase: unregister a departed subscriber

use std::sync::Arc;

use crate::domain::{EventPublisher, SubscriberId};

/// 購読者切断のユースケース
pub struct DisconnectSubscriberUseCase {
    publisher: Arc<dyn EventPublisher>,
}

impl DisconnectSubscriberUseCase {
    pub fn new(publisher: Arc<dyn EventPublisher>) -> Self {
        Self { publisher }
    }

    /// Stop delivering to the subscriber.
    ///
    /// # Returns
    ///
    /// The number of subscribers still connected
    pub async fn execute(&self, subscriber_id: &SubscriberId) -> usize {
        self.publisher.unregister_subscriber(subscriber_id).await;
        self.publisher.count_subscribers().await
    }
}
