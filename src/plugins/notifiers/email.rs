use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;

use crate::config::{SmtpConfig, SmtpCredentials};
use crate::plugins::traits::{Notification, NotificationChannel};
use crate::utils::error::{AppError, Result};

/// Bounds the whole SMTP exchange.
const SMTP_TIMEOUT: Duration = Duration::from_secs(20);

/// Plain-text email over an authenticated STARTTLS relay.
pub struct EmailNotifier {
    config: SmtpConfig,
}

impl EmailNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        EmailNotifier { config }
    }

    fn build_message(
        &self,
        creds: &SmtpCredentials<'_>,
        notification: &Notification,
    ) -> Result<Message> {
        let from: Mailbox = creds
            .from_address
            .parse()
            .map_err(|e| AppError::notify(self.name(), format!("invalid from address: {}", e)))?;
        let to: Mailbox = creds
            .to_address
            .parse()
            .map_err(|e| AppError::notify(self.name(), format!("invalid to address: {}", e)))?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(notification.title.as_str())
            .date_now()
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| AppError::notify(self.name(), e.to_string()))
    }

    fn build_transport(
        &self,
        creds: &SmtpCredentials<'_>,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let credentials = Credentials::new(creds.username.to_string(), creds.password.to_string());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(creds.host)
            .map_err(|e| AppError::notify(self.name(), e.to_string()))?
            .port(creds.port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(transport)
    }
}

#[async_trait]
impl NotificationChannel for EmailNotifier {
    fn name(&self) -> &str {
        "email"
    }

    fn is_enabled(&self) -> bool {
        self.config.is_complete()
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let Some(creds) = self.config.credentials() else {
            return Ok(());
        };

        let email = self.build_message(&creds, notification)?;
        let mailer = self.build_transport(&creds)?;

        mailer
            .send(email)
            .await
            .map_err(|e| AppError::notify(self.name(), e.to_string()))?;

        Ok(())
    }
}
