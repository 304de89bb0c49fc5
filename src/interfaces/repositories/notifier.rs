use async_trait::async_trait;

use crate::errors::AppError;

/// Outbound chat-notification transport. One text message per call; no retry
/// policy, failures surface to the invoking request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, message: &str) -> Result<(), AppError>;
}
