use async_trait::async_trait;

use crate::models::ClassificationResult;
use crate::utils::error::Result;

/// Message sent when the product becomes available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub url: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            url: url.into(),
        }
    }

    /// Restock alert for `url`, citing the signal the classifier matched.
    pub fn product_available(url: &url::Url, result: &ClassificationResult) -> Self {
        let site = url.host_str().unwrap_or("Watcher");
        let title = format!("🎉 {}: product AVAILABLE!", site);
        let body = format!(
            "The product is available: {}\n\nSource: {}",
            url,
            result.reason
        );
        Self::new(title, body, url.as_str())
    }

    /// Short push-style text: title and link.
    pub fn push_text(&self) -> String {
        format!("{}\n{}", self.title, self.url)
    }
}

/// A delivery channel (chat bot, email, ...).
///
/// `is_enabled` is a pure configuration check: a channel whose settings are
/// incomplete is disabled and never attempted.
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Plugin metadata
    fn name(&self) -> &str;
    fn is_enabled(&self) -> bool;

    async fn send(&self, notification: &Notification) -> Result<()>;
}
