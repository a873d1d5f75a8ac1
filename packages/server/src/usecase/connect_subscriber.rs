//! UseCase: register a subscriber and greet it with the current target
//!
//! A subscriber joining while a target is set gets one `warning` status,
//! sent to it alone. Nobody else is notified.

use std::sync::Arc;

use crate::domain::{EventPublisher, RelayEvent, Status, SubscriberChannel, SubscriberId};

use super::{SessionManager, error::SessionError};

/// 購読者接続のユースケース
pub struct ConnectSubscriberUseCase {
    publisher: Arc<dyn EventPublisher>,
    session: SessionManager,
}

impl ConnectSubscriberUseCase {
    pub fn new(publisher: Arc<dyn EventPublisher>, session: SessionManager) -> Self {
        Self { publisher, session }
    }

    /// Register a subscriber and greet it with the current target, if any.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - a greeting status was sent
    /// * `Ok(false)` - no target is active
    /// * `Err(SessionError)` - the session worker is gone
    pub async fn execute(
        &self,
        subscriber_id: SubscriberId,
        channel: SubscriberChannel,
    ) -> Result<bool, SessionError> {
        self.publisher
            .register_subscriber(subscriber_id.clone(), channel)
            .await;

        let snapshot = self.session.snapshot().await?;
        let Some(target) = snapshot.target else {
            return Ok(false);
        };

        let greeting = RelayEvent::Status(Status::warning(format!("Reconnecting: @{}", target)));
        if let Err(e) = self.publisher.push_to(&subscriber_id, &greeting).await {
            tracing::warn!("Failed to greet subscriber '{}': {}", subscriber_id, e);
            return Ok(false);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{BannedWords, GuessExtractor, MockLiveConnector, StreakPolicy, TargetUser},
        infrastructure::publisher::WebSocketEventPublisher,
        usecase::RouteLiveEventUseCase,
    };
    use std::{collections::HashMap, time::Duration};
    use tebak_shared::time::SystemClock;
    use tokio::sync::{Mutex, mpsc};

    fn create_usecase(connector: MockLiveConnector) -> (ConnectSubscriberUseCase, SessionManager) {
        let publisher = Arc::new(WebSocketEventPublisher::new(Arc::new(Mutex::new(
            HashMap::new(),
        ))));
        let router = Arc::new(RouteLiveEventUseCase::new(
            publisher.clone(),
            GuessExtractor::default(),
            BannedWords::default(),
            StreakPolicy::default(),
        ));
        let (session, _join) = SessionManager::spawn(
            Arc::new(connector),
            router,
            publisher.clone(),
            Duration::from_secs(5),
            Arc::new(SystemClock),
        );
        (
            ConnectSubscriberUseCase::new(publisher, session.clone()),
            session,
        )
    }

    #[tokio::test]
    async fn test_connect_without_target_sends_nothing() {
        // テスト項目: ターゲット未設定なら接続時に何も送らない
        // given (前提条件):
        let (usecase, _session) = create_usecase(MockLiveConnector::new());
        let (tx, mut rx) = mpsc::unbounded_channel();

        // when (操作):
        let result = usecase.execute(SubscriberId::from("viewer"), tx).await;

        // then (期待する結果):
        assert_eq!(result, Ok(false));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_with_target_sends_warning() {
        // テスト項目: ターゲット設定済みなら新しい購読者にだけ warning を送る
        // given (前提条件):
        let mut connector = MockLiveConnector::new();
        connector
            .expect_connect()
            .returning(|_| Err(crate::domain::ConnectorError::Timeout));
        let (usecase, session) = create_usecase(connector);
        session
            .set_target(Some(TargetUser::new("alice").unwrap()))
            .unwrap();

        // when (操作):
        let (tx, mut rx) = mpsc::unbounded_channel();
        let result = usecase.execute(SubscriberId::from("viewer"), tx).await;

        // then (期待する結果):
        assert_eq!(result, Ok(true));
        let mut frames = Vec::new();
        while let Ok(frame) = rx.try_recv() {
            frames.push(serde_json::from_str::<serde_json::Value>(&frame).unwrap());
        }
        let greeting = frames
            .iter()
            .find(|value| value["data"]["msg"] == "Reconnecting: @alice")
            .expect("greeting should be delivered");
        assert_eq!(greeting["event"], "status");
        assert_eq!(greeting["data"]["type"], "warning");
    }
}
