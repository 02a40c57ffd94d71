//! Notification ports
//!
//! Interfaces subscribers use to reach the outside world. All of them are
//! fire-and-forget from the booking flow's perspective: failures are
//! logged at the subscriber boundary, never surfaced to the caller of
//! `create_booking`/`confirm_booking`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Email transport error: {0}")]
    Email(String),

    #[error("Realtime delivery error: {0}")]
    Realtime(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// An outgoing plain-text email
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Sends email notifications
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError>;
}

/// Pushes a payload to a connected user over the realtime channel
#[async_trait]
pub trait RealtimeSender: Send + Sync {
    async fn send_to_user(
        &self,
        user_id: Uuid,
        payload: serde_json::Value,
    ) -> Result<(), NotifyError>;
}

/// Records login activity in the shared cache
#[async_trait]
pub trait LastLoginStore: Send + Sync {
    async fn record_login(&self, user_id: Uuid) -> Result<(), NotifyError>;
}
