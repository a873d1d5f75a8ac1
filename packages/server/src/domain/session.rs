//! Session state machine for the single upstream connection.
//!
//! ```text
//!            set_target(user)                 connected
//!   IDLE ─────────────────────▶ CONNECTING ─────────────▶ LIVE
//!     ▲                          ▲      │ failed            │ disconnected
//!     │ set_target(None)         │      ▼                   │
//!     └──────── (any) ───────────┴── RECONNECT_WAIT ◀───────┘
//!                         retry due (same generation)
//! ```
//!
//! The state is pure: every transition returns the side effects the caller
//! must execute, in order. Each target change and each (re)connect bumps the
//! generation; results tagged with an older generation are stale.

use super::{Generation, Status, TargetUser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Connecting,
    Live,
    ReconnectWait,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Connecting => "connecting",
            Phase::Live => "live",
            Phase::ReconnectWait => "reconnect_wait",
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Publish a status notification to every subscriber
    Announce(Status),
    /// Close the current upstream connection, if any, swallowing errors
    Teardown,
    /// Start a connection attempt tagged with `generation`
    Connect {
        target: TargetUser,
        generation: Generation,
    },
    /// Post a retry for `generation` after the retry delay
    ScheduleRetry { generation: Generation },
    /// Drop any pending retry timer
    CancelRetry,
    /// Install the connection that just came up and start forwarding
    Activate,
    /// Close the connection that just came up; nobody wants it anymore
    Discard,
}

/// Read-only view of the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub target: Option<TargetUser>,
    pub phase: Phase,
    pub room_id: Option<String>,
    pub generation: Generation,
    /// Unix millis of the last phase change
    pub since: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    target: Option<TargetUser>,
    phase: Phase,
    generation: Generation,
    room_id: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            target: None,
            phase: Phase::Idle,
            generation: Generation::default(),
            room_id: None,
        }
    }

    pub fn target(&self) -> Option<&TargetUser> {
        self.target.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn room_id(&self) -> Option<&str> {
        self.room_id.as_deref()
    }

    pub fn snapshot(&self, since: i64) -> SessionSnapshot {
        SessionSnapshot {
            target: self.target.clone(),
            phase: self.phase,
            room_id: self.room_id.clone(),
            generation: self.generation,
            since,
        }
    }

    /// Switch to a new target, or clear it with `None`.
    ///
    /// Re-requesting the target that is already connecting or live does
    /// nothing, so no second connection is opened for it.
    pub fn set_target(&mut self, target: Option<TargetUser>) -> Vec<SessionAction> {
        match target {
            None => {
                if self.target.is_none() && self.phase == Phase::Idle {
                    return Vec::new();
                }
                self.generation = self.generation.next();
                self.target = None;
                self.phase = Phase::Idle;
                self.room_id = None;
                vec![
                    SessionAction::CancelRetry,
                    SessionAction::Teardown,
                    SessionAction::Announce(Status::warning("Target cleared")),
                ]
            }
            Some(user) => {
                let unchanged = self.target.as_ref() == Some(&user);
                if unchanged && matches!(self.phase, Phase::Connecting | Phase::Live) {
                    return Vec::new();
                }
                let mut actions = vec![SessionAction::CancelRetry, SessionAction::Teardown];
                actions.extend(self.begin_connect(user));
                actions
            }
        }
    }

    /// A connection attempt succeeded.
    pub fn on_connected(&mut self, generation: Generation, room_id: &str) -> Vec<SessionAction> {
        if generation != self.generation || self.phase != Phase::Connecting {
            return vec![SessionAction::Discard];
        }
        let Some(target) = self.target.as_ref() else {
            return vec![SessionAction::Discard];
        };
        let msg = format!("LIVE: @{}", target);
        self.phase = Phase::Live;
        self.room_id = Some(room_id.to_string());
        vec![
            SessionAction::Activate,
            SessionAction::Announce(Status::success(msg)),
        ]
    }

    /// A connection attempt failed.
    pub fn on_connect_failed(&mut self, generation: Generation) -> Vec<SessionAction> {
        if generation != self.generation || self.phase != Phase::Connecting {
            return Vec::new();
        }
        self.enter_reconnect_wait("Connection failed (retrying...)")
    }

    /// The live connection of `generation` went away.
    pub fn on_disconnected(&mut self, generation: Generation) -> Vec<SessionAction> {
        if generation != self.generation || self.phase != Phase::Live {
            return Vec::new();
        }
        self.enter_reconnect_wait("Disconnected (reconnecting...)")
    }

    /// The retry timer scheduled for `generation` fired.
    pub fn on_retry_due(&mut self, generation: Generation) -> Vec<SessionAction> {
        if generation != self.generation || self.phase != Phase::ReconnectWait {
            return Vec::new();
        }
        match self.target.clone() {
            Some(target) => self.begin_connect(target),
            None => Vec::new(),
        }
    }

    fn begin_connect(&mut self, target: TargetUser) -> Vec<SessionAction> {
        self.generation = self.generation.next();
        self.phase = Phase::Connecting;
        self.room_id = None;
        let msg = format!("Connecting to @{}...", target);
        self.target = Some(target.clone());
        vec![
            SessionAction::Announce(Status::warning(msg)),
            SessionAction::Connect {
                target,
                generation: self.generation,
            },
        ]
    }

    fn enter_reconnect_wait(&mut self, msg: &str) -> Vec<SessionAction> {
        self.phase = Phase::ReconnectWait;
        self.room_id = None;
        vec![
            SessionAction::Teardown,
            SessionAction::Announce(Status::error(msg)),
            SessionAction::ScheduleRetry {
                generation: self.generation,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> TargetUser {
        TargetUser::new(name).unwrap()
    }

    fn connect_generation(actions: &[SessionAction]) -> Option<Generation> {
        actions.iter().find_map(|action| match action {
            SessionAction::Connect { generation, .. } => Some(*generation),
            _ => None,
        })
    }

    fn live_session(name: &str) -> (SessionState, Generation) {
        let mut state = SessionState::new();
        let generation = connect_generation(&state.set_target(Some(user(name)))).unwrap();
        state.on_connected(generation, "room-1");
        (state, generation)
    }

    #[test]
    fn test_initial_state_is_idle() {
        // テスト項目: 初期状態は IDLE でターゲットなし
        // given (前提条件) / when (操作):
        let state = SessionState::new();

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.target().is_none());
        assert!(state.room_id().is_none());
    }

    #[test]
    fn test_set_target_from_idle_starts_connecting() {
        // テスト項目: IDLE からターゲットを設定すると CONNECTING になり接続が要求される
        // given (前提条件):
        let mut state = SessionState::new();

        // when (操作):
        let actions = state.set_target(Some(user("alice")));

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::Connecting);
        assert_eq!(
            actions,
            vec![
                SessionAction::CancelRetry,
                SessionAction::Teardown,
                SessionAction::Announce(Status::warning("Connecting to @alice...")),
                SessionAction::Connect {
                    target: user("alice"),
                    generation: Generation::from(1),
                },
            ]
        );
    }

    #[test]
    fn test_same_target_while_connecting_is_noop() {
        // テスト項目: 接続中に同じターゲットを再設定しても二重接続しない
        // given (前提条件):
        let mut state = SessionState::new();
        state.set_target(Some(user("alice")));

        // when (操作):
        let actions = state.set_target(Some(user("@alice")));

        // then (期待する結果):
        assert!(actions.is_empty());
        assert_eq!(state.generation(), Generation::from(1));
    }

    #[test]
    fn test_same_target_while_live_is_noop() {
        // テスト項目: LIVE 中に同じターゲットを再設定しても何も起きない
        // given (前提条件):
        let (mut state, generation) = live_session("alice");

        // when (操作):
        let actions = state.set_target(Some(user("alice")));

        // then (期待する結果):
        assert!(actions.is_empty());
        assert_eq!(state.phase(), Phase::Live);
        assert_eq!(state.generation(), generation);
    }

    #[test]
    fn test_connected_moves_to_live() {
        // テスト項目: 接続成功で LIVE になり、成功ステータスとルーム ID が記録される
        // given (前提条件):
        let mut state = SessionState::new();
        let generation = connect_generation(&state.set_target(Some(user("alice")))).unwrap();

        // when (操作):
        let actions = state.on_connected(generation, "7300000000000000001");

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::Live);
        assert_eq!(state.room_id(), Some("7300000000000000001"));
        assert_eq!(
            actions,
            vec![
                SessionAction::Activate,
                SessionAction::Announce(Status::success("LIVE: @alice")),
            ]
        );
    }

    #[test]
    fn test_stale_connected_is_discarded() {
        // テスト項目: ターゲット変更後に届いた古い接続成功は破棄される
        // given (前提条件):
        let mut state = SessionState::new();
        let old = connect_generation(&state.set_target(Some(user("alice")))).unwrap();
        state.set_target(Some(user("bob")));

        // when (操作):
        let actions = state.on_connected(old, "room-alice");

        // then (期待する結果):
        assert_eq!(actions, vec![SessionAction::Discard]);
        assert_eq!(state.phase(), Phase::Connecting);
        assert_eq!(state.target(), Some(&user("bob")));
    }

    #[test]
    fn test_connect_failure_schedules_retry() {
        // テスト項目: 接続失敗で RECONNECT_WAIT になりリトライが 1 回予約される
        // given (前提条件):
        let mut state = SessionState::new();
        let generation = connect_generation(&state.set_target(Some(user("alice")))).unwrap();

        // when (操作):
        let actions = state.on_connect_failed(generation);

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::ReconnectWait);
        assert_eq!(
            actions,
            vec![
                SessionAction::Teardown,
                SessionAction::Announce(Status::error("Connection failed (retrying...)")),
                SessionAction::ScheduleRetry { generation },
            ]
        );
    }

    #[test]
    fn test_disconnect_while_live_schedules_retry() {
        // テスト項目: LIVE 中の切断で RECONNECT_WAIT になりリトライが予約される
        // given (前提条件):
        let (mut state, generation) = live_session("alice");

        // when (操作):
        let actions = state.on_disconnected(generation);

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::ReconnectWait);
        assert!(state.room_id().is_none());
        assert!(actions.contains(&SessionAction::ScheduleRetry { generation }));
        assert!(actions.contains(&SessionAction::Announce(Status::error(
            "Disconnected (reconnecting...)"
        ))));
    }

    #[test]
    fn test_stale_disconnect_is_ignored() {
        // テスト項目: 古い接続からの切断通知は無視される
        // given (前提条件):
        let (mut state, old) = live_session("alice");
        let new = connect_generation(&state.set_target(Some(user("bob")))).unwrap();
        state.on_connected(new, "room-bob");

        // when (操作):
        let actions = state.on_disconnected(old);

        // then (期待する結果):
        assert!(actions.is_empty());
        assert_eq!(state.phase(), Phase::Live);
    }

    #[test]
    fn test_retry_due_reconnects_same_target() {
        // テスト項目: リトライ時刻に世代が一致していれば同じターゲットに再接続する
        // given (前提条件):
        let (mut state, generation) = live_session("alice");
        state.on_disconnected(generation);

        // when (操作):
        let actions = state.on_retry_due(generation);

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::Connecting);
        assert_eq!(
            actions.last(),
            Some(&SessionAction::Connect {
                target: user("alice"),
                generation: generation.next(),
            })
        );
    }

    #[test]
    fn test_retry_after_target_switch_is_noop() {
        // テスト項目: 切断後リトライ前に別ターゲットへ切り替えた場合、古いリトライは何もしない
        // given (前提条件):
        let (mut state, generation) = live_session("alice");
        state.on_disconnected(generation);
        state.set_target(Some(user("bob")));

        // when (操作):
        let actions = state.on_retry_due(generation);

        // then (期待する結果):
        assert!(actions.is_empty());
        assert_eq!(state.target(), Some(&user("bob")));
        assert_eq!(state.phase(), Phase::Connecting);
    }

    #[test]
    fn test_same_target_during_wait_reconnects_immediately() {
        // テスト項目: RECONNECT_WAIT 中に同じターゲットを設定すると即座に再接続する
        // given (前提条件):
        let (mut state, generation) = live_session("alice");
        state.on_disconnected(generation);

        // when (操作):
        let actions = state.set_target(Some(user("alice")));

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::Connecting);
        assert!(actions.contains(&SessionAction::CancelRetry));
        assert!(connect_generation(&actions).is_some());
    }

    #[test]
    fn test_clear_target_goes_idle() {
        // テスト項目: ターゲット解除で IDLE に戻り、接続が破棄される
        // given (前提条件):
        let (mut state, generation) = live_session("alice");

        // when (操作):
        let actions = state.set_target(None);

        // then (期待する結果):
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.target().is_none());
        assert!(actions.contains(&SessionAction::Teardown));
        assert!(state.on_disconnected(generation).is_empty());
    }

    #[test]
    fn test_clear_target_when_idle_is_noop() {
        // テスト項目: IDLE でターゲット解除しても何も起きない
        // given (前提条件):
        let mut state = SessionState::new();

        // when (操作):
        let actions = state.set_target(None);

        // then (期待する結果):
        assert!(actions.is_empty());
        assert_eq!(state.generation(), Generation::default());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        // テスト項目: スナップショットが現在の状態を反映する
        // given (前提条件):
        let (state, generation) = live_session("alice");

        // when (操作):
        let snapshot = state.snapshot(1000);

        // then (期待する結果):
        assert_eq!(snapshot.target, Some(user("alice")));
        assert_eq!(snapshot.phase, Phase::Live);
        assert_eq!(snapshot.room_id.as_deref(), Some("room-1"));
        assert_eq!(snapshot.generation, generation);
        assert_eq!(snapshot.since, 1000);
    }
}
