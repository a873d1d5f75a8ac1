//! Shared application state.

use std::{path::PathBuf, sync::Arc};

use crate::usecase::{
    ChangeTargetUseCase, ConnectSubscriberUseCase, DisconnectSubscriberUseCase, SessionManager,
};

pub struct AppState {
    /// ConnectSubscriberUseCase（購読者接続のユースケース）
    pub connect_subscriber_usecase: Arc<ConnectSubscriberUseCase>,
    /// DisconnectSubscriberUseCase（購読者切断のユースケース）
    pub disconnect_subscriber_usecase: Arc<DisconnectSubscriberUseCase>,
    /// ChangeTargetUseCase（ターゲット変更のユースケース）
    pub change_target_usecase: Arc<ChangeTargetUseCase>,
    /// Session handle, used for the snapshot endpoint
    pub session: SessionManager,
    /// Directory holding the overlay page and its assets
    pub static_dir: PathBuf,
}
