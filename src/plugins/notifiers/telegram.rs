use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::time::Duration;

use crate::config::TelegramConfig;
use crate::plugins::traits::{Notification, NotificationChannel};
use crate::utils::error::{AppError, Result};

const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Push notifications through the Telegram Bot API `sendMessage` method.
pub struct TelegramNotifier {
    config: TelegramConfig,
    client: Client,
}

impl TelegramNotifier {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder().timeout(SEND_TIMEOUT).build()?;
        Ok(TelegramNotifier { config, client })
    }

    fn endpoint(&self, token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.config.api_base, token)
    }

    fn create_payload(chat_id: &str, text: &str) -> serde_json::Value {
        json!({
            "chat_id": chat_id,
            "text": text,
            "disable_web_page_preview": true
        })
    }
}

#[async_trait]
impl NotificationChannel for TelegramNotifier {
    fn name(&self) -> &str {
        "telegram"
    }

    fn is_enabled(&self) -> bool {
        self.config.is_complete()
    }

    async fn send(&self, notification: &Notification) -> Result<()> {
        let Some((token, chat_id)) = self.config.credentials() else {
            return Ok(());
        };

        let payload = Self::create_payload(chat_id, &notification.push_text());
        let response = self
            .client
            .post(self.endpoint(token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::notify(self.name(), e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::notify(
                self.name(),
                format!("sendMessage returned {}: {}", status, detail.trim()),
            ));
        }

        Ok(())
    }
}
