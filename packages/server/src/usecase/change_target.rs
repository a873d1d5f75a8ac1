//! UseCase: handle a subscriber's `change_username` request

use std::sync::Arc;

use crate::domain::{EventPublisher, RelayEvent, Status, SubscriberId, TargetUser};

use super::{SessionManager, error::ChangeTargetError};

pub struct ChangeTargetUseCase {
    publisher: Arc<dyn EventPublisher>,
    session: SessionManager,
}

impl ChangeTargetUseCase {
    pub fn new(publisher: Arc<dyn EventPublisher>, session: SessionManager) -> Self {
        Self { publisher, session }
    }

    /// Validate the requested username and hand it to the session.
    ///
    /// A blank username clears the target. An invalid one is reported back
    /// to the requesting subscriber only.
    pub async fn execute(
        &self,
        requested_by: &SubscriberId,
        username: &str,
    ) -> Result<Option<TargetUser>, ChangeTargetError> {
        let target = match TargetUser::parse_request(username) {
            Ok(target) => target,
            Err(e) => {
                tracing::warn!("Subscriber '{}' sent invalid username: {}", requested_by, e);
                let status = RelayEvent::Status(Status::error(format!("Invalid username: {}", e)));
                self.publisher.push_to(requested_by, &status).await?;
                return Err(e.into());
            }
        };

        tracing::info!(
            "Subscriber '{}' requested target {}",
            requested_by,
            target
                .as_ref()
                .map(|t| format!("@{}", t))
                .unwrap_or_else(|| "(none)".to_string())
        );
        self.session.set_target(target.clone())?;
        Ok(target)
    }
}
