use tracing::{debug, info, warn};

use super::notifiers::{EmailNotifier, TelegramNotifier};
use super::traits::{Notification, NotificationChannel};
use crate::config::NotificationsConfig;
use crate::utils::error::Result;

pub type ChannelBox = Box<dyn NotificationChannel>;

/// Outcome of one dispatch, by channel name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

impl DispatchReport {
    pub fn any_delivered(&self) -> bool {
        !self.delivered.is_empty()
    }
}

/// Fans a notification out to every registered channel, one after another.
///
/// Disabled channels are skipped and a failing channel never prevents the
/// remaining ones from being tried.
pub struct NotifierManager {
    channels: Vec<ChannelBox>,
}

impl NotifierManager {
    pub fn new() -> Self {
        Self {
            channels: Vec::new(),
        }
    }

    /// Telegram first, then email.
    pub fn from_config(config: &NotificationsConfig) -> Result<Self> {
        let mut manager = Self::new();
        manager.register(Box::new(TelegramNotifier::new(config.telegram.clone())?));
        manager.register(Box::new(EmailNotifier::new(config.smtp.clone())));
        Ok(manager)
    }

    pub fn register(&mut self, channel: ChannelBox) {
        self.channels.push(channel);
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.name()).collect()
    }

    pub fn enabled_channels(&self) -> Vec<&str> {
        self.channels
            .iter()
            .filter(|c| c.is_enabled())
            .map(|c| c.name())
            .collect()
    }

    pub async fn dispatch(&self, notification: &Notification) -> DispatchReport {
        let mut report = DispatchReport::default();

        for channel in &self.channels {
            let name = channel.name().to_string();
            if !channel.is_enabled() {
                debug!("Channel {} is not configured, skipping", name);
                report.skipped.push(name);
                continue;
            }

            match channel.send(notification).await {
                Ok(()) => {
                    info!("Notification delivered via {}", name);
                    report.delivered.push(name);
                }
                Err(e) => {
                    warn!("Notification via {} failed: {}", name, e);
                    report.failed.push(name);
                }
            }
        }

        report
    }
}

impl Default for NotifierManager {
    fn default() -> Self {
        Self::new()
    }
}
