//! `LiveConnector` over a WebSocket bridge.
//!
//! The bridge speaks JSON text frames tagged by `type`. The first frame
//! decides the outcome of `connect()`: `connected` succeeds, `error` is a
//! rejection, anything else is a protocol error. After that a reader task
//! turns frames into `LiveEvent`s until the socket goes away.

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::{net::TcpStream, sync::mpsc, task::JoinHandle};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};

use crate::{
    domain::{ConnectionHandle, ConnectorError, LiveConnection, LiveConnector, LiveEvent, TargetUser},
    infrastructure::dto::upstream::UpstreamFrame,
};

type UpstreamStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const DEFAULT_EVENT_BUFFER: usize = 256;

pub struct WebSocketLiveConnector {
    upstream_url: String,
    connect_timeout: Duration,
    event_buffer: usize,
}

impl WebSocketLiveConnector {
    pub fn new(upstream_url: impl Into<String>, connect_timeout: Duration, event_buffer: usize) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            connect_timeout,
            event_buffer: event_buffer.max(1),
        }
    }

    /// URL of the bridge session for `target`
    pub fn session_url(&self, target: &TargetUser) -> String {
        let separator = if self.upstream_url.contains('?') { '&' } else { '?' };
        format!("{}{}uniqueId={}", self.upstream_url, separator, target)
    }

    async fn handshake(&self, url: &str) -> Result<(String, UpstreamStream), ConnectorError> {
        let (mut stream, _) = connect_async(url)
            .await
            .map_err(|e| ConnectorError::Transport(e.to_string()))?;
        let room_id = wait_for_room(&mut stream).await?;
        Ok((room_id, stream))
    }
}

#[async_trait]
impl LiveConnector for WebSocketLiveConnector {
    async fn connect(&self, target: &TargetUser) -> Result<LiveConnection, ConnectorError> {
        let url = self.session_url(target);
        tracing::debug!("Opening upstream session {}", url);

        let (room_id, stream) = tokio::time::timeout(self.connect_timeout, self.handshake(&url))
            .await
            .map_err(|_| ConnectorError::Timeout)??;

        let (tx, rx) = mpsc::channel(self.event_buffer);
        let reader = tokio::spawn(read_loop(stream, tx, target.to_string()));

        Ok(LiveConnection::new(
            room_id,
            rx,
            Box::new(WebSocketConnectionHandle::new(reader)),
        ))
    }
}

async fn wait_for_room(stream: &mut UpstreamStream) -> Result<String, ConnectorError> {
    while let Some(message) = stream.next().await {
        let message = message.map_err(|e| ConnectorError::Transport(e.to_string()))?;
        match message {
            Message::Text(text) => {
                let frame: UpstreamFrame = serde_json::from_str(&text)
                    .map_err(|e| ConnectorError::Protocol(e.to_string()))?;
                return match frame {
                    UpstreamFrame::Connected { room_id } => Ok(room_id),
                    UpstreamFrame::Error { message } => Err(ConnectorError::Rejected(message)),
                    other => Err(ConnectorError::Protocol(format!(
                        "expected 'connected', got '{}'",
                        other.kind()
                    ))),
                };
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    Err(ConnectorError::Transport(
        "upstream closed before connecting".to_string(),
    ))
}

async fn read_loop(mut stream: UpstreamStream, events: mpsc::Sender<LiveEvent>, target: String) {
    while let Some(message) = stream.next().await {
        match message {
            Ok(Message::Text(text)) => {
                let frame = match serde_json::from_str::<UpstreamFrame>(&text) {
                    Ok(frame) => frame,
                    Err(e) => {
                        tracing::warn!("Malformed upstream frame for @{}: {}", target, e);
                        continue;
                    }
                };
                let kind = frame.kind();
                let Some(event) = frame.into_live_event() else {
                    tracing::debug!("Ignoring upstream '{}' frame for @{}", kind, target);
                    continue;
                };
                let ended = matches!(event, LiveEvent::Disconnected);
                if events.send(event).await.is_err() || ended {
                    return;
                }
            }
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::warn!("Upstream read error for @{}: {}", target, e);
                break;
            }
            _ => {}
        }
    }

    tracing::debug!("Upstream socket for @{} closed", target);
    let _ = events.send(LiveEvent::Disconnected).await;
}

/// Owns the reader task of one upstream session
pub struct WebSocketConnectionHandle {
    reader: Option<JoinHandle<()>>,
}

impl WebSocketConnectionHandle {
    pub fn new(reader: JoinHandle<()>) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl ConnectionHandle for WebSocketConnectionHandle {
    fn disconnect(&mut self) -> Result<(), ConnectorError> {
        // aborting the reader drops the socket
        let reader = self.reader.take().ok_or(ConnectorError::AlreadyClosed)?;
        reader.abort();
        Ok(())
    }
}

impl Drop for WebSocketConnectionHandle {
    fn drop(&mut self) {
        if let Some(reader) = self.reader.take() {
            reader.abort();
        }
    }
}
