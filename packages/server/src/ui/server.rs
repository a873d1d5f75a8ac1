//! Server execution logic.

use std::{path::PathBuf, sync::Arc};

use axum::{Router, http::Method, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::usecase::{
    ChangeTargetUseCase, ConnectSubscriberUseCase, DisconnectSubscriberUseCase, SessionManager,
};

use super::{
    handler::{health_check, index, session_snapshot, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     connect_subscriber_usecase,
///     disconnect_subscriber_usecase,
///     change_target_usecase,
///     session,
///     "public".into(),
/// );
/// server.run("0.0.0.0".to_string(), 3000).await?;
/// ```
pub struct Server {
    connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
    disconnect_subscriber_usecase: Arc<DisconnectSubscriberUseCase>,
    change_target_usecase: Arc<ChangeTargetUseCase>,
    session: SessionManager,
    static_dir: PathBuf,
}

impl Server {
    pub fn new(
        connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
        disconnect_subscriber_usecase: Arc<DisconnectSubscriberUseCase>,
        change_target_usecase: Arc<ChangeTargetUseCase>,
        session: SessionManager,
        static_dir: PathBuf,
    ) -> Self {
        Self {
            connect_subscriber_usecase,
            disconnect_subscriber_usecase,
            change_target_usecase,
            session,
            static_dir,
        }
    }

    /// Build the router with every route and layer
    pub fn router(self) -> Router {
        let static_files = ServeDir::new(&self.static_dir);
        let app_state = Arc::new(AppState {
            connect_subscriber_usecase: self.connect_subscriber_usecase,
            disconnect_subscriber_usecase: self.disconnect_subscriber_usecase,
            change_target_usecase: self.change_target_usecase,
            session: self.session,
            static_dir: self.static_dir,
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST]);

        Router::new()
            .route("/", get(index))
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/session", get(session_snapshot))
            .fallback_service(static_files)
            .with_state(app_state)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Bind `host:port` and serve until a shutdown signal arrives
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self, host: String, port: u16) -> std::io::Result<()> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Overlay: http://{}/", bind_addr);
        tracing::info!("Subscribe: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve(self, listener: TcpListener) -> std::io::Result<()> {
        tracing::info!("Relay server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
