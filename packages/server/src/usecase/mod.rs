//! UseCase layer
//!
//! Application logic built on the domain traits. Each use case owns the
//! collaborators it needs through `Arc<dyn Trait>` so the concrete
//! transports can be swapped in tests.

mod change_target;
mod connect_subscriber;
mod disconnect_subscriber;
pub mod error;
mod route_event;
mod session_manager;

pub use change_target::ChangeTargetUseCase;
pub use connect_subscriber::ConnectSubscriberUseCase;
pub use disconnect_subscriber::DisconnectSubscriberUseCase;
pub use error::{ChangeTargetError, SessionError};
pub use route_event::RouteLiveEventUseCase;
pub use session_manager::SessionManager;
