//! Dependency wiring shared by the binary and the integration tests.

use std::{collections::HashMap, sync::Arc};

use tebak_shared::time::Clock;
use tokio::sync::Mutex;

use crate::{
    config::{ConfigError, RelayConfig},
    domain::LiveConnector,
    infrastructure::publisher::WebSocketEventPublisher,
    ui::Server,
    usecase::{
        ChangeTargetUseCase, ConnectSubscriberUseCase, DisconnectSubscriberUseCase,
        RouteLiveEventUseCase, SessionManager,
    },
};

/// Build a ready-to-run server around `connector`.
///
/// Must be called inside a tokio runtime: the session worker is spawned here
/// and lives as long as the returned server.
pub fn build_server(
    config: &RelayConfig,
    connector: Arc<dyn LiveConnector>,
    clock: Arc<dyn Clock>,
) -> Result<Server, ConfigError> {
    // Initialize dependencies in order:
    // 1. EventPublisher
    // 2. Event routing
    // 3. Session worker
    // 4. Subscriber UseCases
    // 5. Server

    // 1. Create EventPublisher (WebSocket implementation)
    let subscribers = Arc::new(Mutex::new(HashMap::new()));
    let publisher = Arc::new(WebSocketEventPublisher::new(subscribers));

    // 2. Create the router from the configured filters
    let banned_words = config.banned_words()?;
    tracing::info!("{} banned word(s) active", banned_words.len());
    let router = Arc::new(RouteLiveEventUseCase::new(
        publisher.clone(),
        config.extractor(),
        banned_words,
        config.streak_policy(),
    ));

    // 3. Spawn the session worker
    let (session, _worker) = SessionManager::spawn(
        connector,
        router,
        publisher.clone(),
        config.retry_delay,
        clock,
    );

    // 4. Create UseCases
    let connect_subscriber_usecase = Arc::new(ConnectSubscriberUseCase::new(
        publisher.clone(),
        session.clone(),
    ));
    let disconnect_subscriber_usecase =
        Arc::new(DisconnectSubscriberUseCase::new(publisher.clone()));
    let change_target_usecase = Arc::new(ChangeTargetUseCase::new(publisher, session.clone()));

    // 5. Create the server
    Ok(Server::new(
        connect_subscriber_usecase,
        disconnect_subscriber_usecase,
        change_target_usecase,
        session,
        config.static_dir.clone(),
    ))
}
