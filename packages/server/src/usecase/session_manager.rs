//! UseCase: own the single upstream live connection
//!
//! `SessionManager` is a cheap, cloneable handle. All state lives in one
//! `SessionWorker` task that applies commands one at a time, so at most one
//! upstream connection exists at any moment. Connection attempts, retry
//! timers and event forwarding run in their own tasks and report back to the
//! worker with the generation they were started for.

use std::{sync::Arc, time::Duration};

use tebak_shared::time::Clock;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{
    ConnectionHandle, ConnectorError, EventPublisher, Generation, LiveConnection, LiveConnector,
    LiveEvent, Phase, RelayEvent, SessionAction, SessionSnapshot, SessionState, Status,
    TargetUser,
};

use super::{RouteLiveEventUseCase, error::SessionError};

enum SessionCommand {
    SetTarget(Option<TargetUser>),
    ConnectSucceeded {
        generation: Generation,
        connection: LiveConnection,
    },
    ConnectFailed {
        generation: Generation,
        error: ConnectorError,
    },
    Disconnected {
        generation: Generation,
    },
    RetryDue {
        generation: Generation,
    },
    Snapshot(oneshot::Sender<SessionSnapshot>),
}

/// Handle to the session worker
#[derive(Clone)]
pub struct SessionManager {
    commands: mpsc::UnboundedSender<SessionCommand>,
}

impl SessionManager {
    /// Spawn the session worker.
    ///
    /// The worker stops once every `SessionManager` clone is dropped.
    ///
    /// # Arguments
    ///
    /// * `connector` - Opens upstream live sessions
    /// * `router` - Routes upstream events to subscribers
    /// * `publisher` - Receives status notifications
    /// * `retry_delay` - Delay before reconnecting after a failure or disconnect
    /// * `clock` - Time source for snapshots
    pub fn spawn(
        connector: Arc<dyn LiveConnector>,
        router: Arc<RouteLiveEventUseCase>,
        publisher: Arc<dyn EventPublisher>,
        retry_delay: Duration,
        clock: Arc<dyn Clock>,
    ) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let since = clock.now_millis();
        let worker = SessionWorker {
            state: SessionState::new(),
            since,
            connector,
            router,
            publisher,
            retry_delay,
            clock,
            commands: rx,
            notifier: tx.downgrade(),
            active: None,
            pending_connect: None,
            pending_retry: None,
        };
        let join = tokio::spawn(worker.run());
        (Self { commands: tx }, join)
    }

    /// Request a new target. `None` clears the target.
    pub fn set_target(&self, target: Option<TargetUser>) -> Result<(), SessionError> {
        self.commands
            .send(SessionCommand::SetTarget(target))
            .map_err(|_| SessionError::WorkerGone)
    }

    /// Current session state, after every previously sent command is applied.
    pub async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.commands
            .send(SessionCommand::Snapshot(reply))
            .map_err(|_| SessionError::WorkerGone)?;
        rx.await.map_err(|_| SessionError::WorkerGone)
    }
}

struct ActiveConnection {
    generation: Generation,
    handle: Box<dyn ConnectionHandle>,
    forwarder: JoinHandle<()>,
}

struct SessionWorker {
    state: SessionState,
    since: i64,
    connector: Arc<dyn LiveConnector>,
    router: Arc<RouteLiveEventUseCase>,
    publisher: Arc<dyn EventPublisher>,
    retry_delay: Duration,
    clock: Arc<dyn Clock>,
    commands: mpsc::UnboundedReceiver<SessionCommand>,
    /// Weak so that spawned tasks do not keep the worker alive
    notifier: mpsc::WeakUnboundedSender<SessionCommand>,
    active: Option<ActiveConnection>,
    /// In-flight `connect()`; aborting it drops the half-open session
    pending_connect: Option<JoinHandle<()>>,
    pending_retry: Option<JoinHandle<()>>,
}

impl SessionWorker {
    async fn run(mut self) {
        tracing::debug!("Session worker started");

        while let Some(command) = self.commands.recv().await {
            self.handle(command).await;
        }

        self.cancel_retry();
        self.teardown();
        tracing::info!("Session worker stopped");
    }

    async fn handle(&mut self, command: SessionCommand) {
        let phase_before = self.state.phase();

        match command {
            SessionCommand::SetTarget(target) => {
                let actions = self.state.set_target(target);
                self.apply(actions, None).await;
            }
            SessionCommand::ConnectSucceeded {
                generation,
                connection,
            } => {
                let actions = self.state.on_connected(generation, &connection.room_id);
                if self.state.phase() == Phase::Live && phase_before != Phase::Live {
                    tracing::info!(
                        "Connected to @{} (room id: {})",
                        self.target_name(),
                        connection.room_id
                    );
                }
                self.apply(actions, Some(connection)).await;
            }
            SessionCommand::ConnectFailed { generation, error } => {
                tracing::error!(
                    "Failed to connect to @{} (generation {}): {}",
                    self.target_name(),
                    generation.value(),
                    error
                );
                let actions = self.state.on_connect_failed(generation);
                self.apply(actions, None).await;
            }
            SessionCommand::Disconnected { generation } => {
                let actions = self.state.on_disconnected(generation);
                if !actions.is_empty() {
                    tracing::warn!("Upstream for @{} disconnected", self.target_name());
                }
                self.apply(actions, None).await;
            }
            SessionCommand::RetryDue { generation } => {
                self.pending_retry = None;
                let actions = self.state.on_retry_due(generation);
                if actions.is_empty() {
                    tracing::debug!("Ignoring stale retry (generation {})", generation.value());
                }
                self.apply(actions, None).await;
            }
            SessionCommand::Snapshot(reply) => {
                let _ = reply.send(self.state.snapshot(self.since));
            }
        }

        if self.state.phase() != phase_before {
            self.since = self.clock.now_millis();
            tracing::debug!(
                "Session phase {} -> {}",
                phase_before.as_str(),
                self.state.phase().as_str()
            );
        }
    }

    async fn apply(&mut self, actions: Vec<SessionAction>, mut connection: Option<LiveConnection>) {
        for action in actions {
            match action {
                SessionAction::Announce(status) => announce(self.publisher.as_ref(), status).await,
                SessionAction::Teardown => self.teardown(),
                SessionAction::Connect { target, generation } => {
                    self.spawn_connect(target, generation)
                }
                SessionAction::ScheduleRetry { generation } => self.schedule_retry(generation),
                SessionAction::CancelRetry => self.cancel_retry(),
                SessionAction::Activate => {
                    if let Some(connection) = connection.take() {
                        self.activate(connection);
                    }
                }
                SessionAction::Discard => {
                    if let Some(connection) = connection.take() {
                        discard(connection);
                    }
                }
            }
        }
    }

    /// Close the active connection and abort any attempt still in flight.
    /// Errors are swallowed.
    fn teardown(&mut self) {
        if let Some(attempt) = self.pending_connect.take() {
            attempt.abort();
        }
        if let Some(mut active) = self.active.take() {
            active.forwarder.abort();
            if let Err(e) = active.handle.disconnect() {
                tracing::debug!(
                    "Ignoring teardown error (generation {}): {}",
                    active.generation.value(),
                    e
                );
            }
        }
    }

    fn activate(&mut self, connection: LiveConnection) {
        self.teardown();

        let generation = self.state.generation();
        let LiveConnection { events, handle, .. } = connection;
        let forwarder = tokio::spawn(forward_events(
            events,
            self.router.clone(),
            self.notifier.clone(),
            generation,
        ));
        self.active = Some(ActiveConnection {
            generation,
            handle,
            forwarder,
        });
    }

    fn spawn_connect(&mut self, target: TargetUser, generation: Generation) {
        tracing::info!("Connecting to @{}...", target);
        let connector = self.connector.clone();
        let notifier = self.notifier.clone();
        self.pending_connect = Some(tokio::spawn(async move {
            let command = match connector.connect(&target).await {
                Ok(connection) => SessionCommand::ConnectSucceeded {
                    generation,
                    connection,
                },
                Err(error) => SessionCommand::ConnectFailed { generation, error },
            };
            if let Some(tx) = notifier.upgrade() {
                let _ = tx.send(command);
            }
        }));
    }

    fn schedule_retry(&mut self, generation: Generation) {
        self.cancel_retry();
        let delay = self.retry_delay;
        let notifier = self.notifier.clone();
        self.pending_retry = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(tx) = notifier.upgrade() {
                let _ = tx.send(SessionCommand::RetryDue { generation });
            }
        }));
    }

    fn cancel_retry(&mut self) {
        if let Some(timer) = self.pending_retry.take() {
            timer.abort();
        }
    }

    fn target_name(&self) -> String {
        self.state
            .target()
            .map(|target| target.to_string())
            .unwrap_or_default()
    }
}

/// Close a connection whose result arrived after its target was superseded
fn discard(mut connection: LiveConnection) {
    tracing::debug!("Discarding stale connection to room {}", connection.room_id);
    if let Err(e) = connection.handle.disconnect() {
        tracing::debug!(
            "Ignoring teardown error for stale room {}: {}",
            connection.room_id,
            e
        );
    }
}

async fn announce(publisher: &dyn EventPublisher, status: Status) {
    tracing::info!("[STATUS] {:?}: {}", status.level, status.msg);
    if let Err(e) = publisher.broadcast(&RelayEvent::Status(status)).await {
        tracing::warn!("Failed to broadcast status: {}", e);
    }
}

/// Drain one connection's event stream into the router until it ends.
async fn forward_events(
    mut events: mpsc::Receiver<LiveEvent>,
    router: Arc<RouteLiveEventUseCase>,
    notifier: mpsc::WeakUnboundedSender<SessionCommand>,
    generation: Generation,
) {
    while let Some(event) = events.recv().await {
        if matches!(event, LiveEvent::Disconnected) {
            break;
        }
        if let Err(e) = router.execute(event).await {
            tracing::warn!("Failed to publish live event: {}", e);
        }
    }

    if let Some(tx) = notifier.upgrade() {
        let _ = tx.send(SessionCommand::Disconnected { generation });
    }
}
