//! Email delivery
//!
//! SMTP via lettre when configured; otherwise a no-op mailer that logs
//! what would have been sent, so development environments work without a
//! mail relay.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use crate::config::SmtpConfig;
use crate::notifications::ports::{EmailMessage, EmailSender, NotifyError};

/// SMTP mailer backed by lettre
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(cfg: &SmtpConfig) -> Result<Self, NotifyError> {
        let from = cfg
            .from_address
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::Email(format!("Invalid from address: {}", e)))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.host)
            .map_err(|e| NotifyError::Email(e.to_string()))?
            .port(cfg.port)
            .credentials(Credentials::new(
                cfg.username.clone(),
                cfg.password.clone(),
            ))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl EmailSender for SmtpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| NotifyError::Email(format!("Invalid recipient: {}", e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.body)
            .map_err(|e| NotifyError::Email(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| NotifyError::Email(e.to_string()))?;

        debug!(to = message.to, subject = message.subject, "Email sent");
        Ok(())
    }
}

/// Mailer used when SMTP is not configured: logs and succeeds.
pub struct NoopMailer;

#[async_trait]
impl EmailSender for NoopMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        info!(
            to = message.to,
            subject = message.subject,
            "Email suppressed (SMTP not configured)"
        );
        Ok(())
    }
}

/// Pick the mailer implied by the configuration.
pub fn mailer_from_config(cfg: &SmtpConfig) -> Result<Arc<dyn EmailSender>, NotifyError> {
    if cfg.is_configured() {
        Ok(Arc::new(SmtpMailer::new(cfg)?))
    } else {
        Ok(Arc::new(NoopMailer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_mailer_always_succeeds() {
        let mailer = NoopMailer;
        mailer
            .send(EmailMessage::new("a@b.test", "subject", "body"))
            .await
            .expect("noop send");
    }

    #[test]
    fn unconfigured_smtp_yields_noop() {
        let cfg = SmtpConfig::default();
        assert!(mailer_from_config(&cfg).is_ok());
    }
}
