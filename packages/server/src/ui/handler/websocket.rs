//! Subscriber WebSocket handler.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::SubscriberId, infrastructure::dto::websocket::ClientMessage, ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Forward frames queued for this subscriber to its socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let subscriber_id = SubscriberId::generate();
    let (sender, mut receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel();

    match state
        .connect_subscriber_usecase
        .execute(subscriber_id.clone(), tx)
        .await
    {
        Ok(greeted) => tracing::info!(
            "Subscriber '{}' connected (greeted: {})",
            subscriber_id,
            greeted
        ),
        Err(e) => tracing::warn!(
            "Subscriber '{}' connected without greeting: {}",
            subscriber_id,
            e
        ),
    }

    let state_for_recv = state.clone();
    let id_for_recv = subscriber_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error from '{}': {}", id_for_recv, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(ClientMessage::ChangeUsername(username)) => {
                        tracing::info!(
                            "Subscriber '{}' requested target '{}'",
                            id_for_recv,
                            username
                        );
                        if let Err(e) = state_for_recv
                            .change_target_usecase
                            .execute(&id_for_recv, &username)
                            .await
                        {
                            tracing::warn!("Failed to change target: {}", e);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring unparsable frame from '{}': {}", id_for_recv, e);
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Subscriber '{}' requested close", id_for_recv);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let remaining = state
        .disconnect_subscriber_usecase
        .execute(&subscriber_id)
        .await;
    tracing::info!(
        "Subscriber '{}' disconnected ({} remaining)",
        subscriber_id,
        remaining
    );
}
