use tracing::{debug, error, info};
use url::Url;

use crate::classifier::AvailabilityClassifier;
use crate::config::AppConfig;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::models::{AvailabilityStatus, ClassificationResult};
use crate::plugins::{DispatchReport, Notification, NotifierManager};
use crate::state::StateStore;
use crate::utils::error::Result;

/// Summary of one completed check.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub url: String,
    pub status: AvailabilityStatus,
    pub reason: String,
    pub previous: Option<AvailabilityStatus>,
    pub notified: bool,
    pub channels_delivered: Vec<String>,
    pub state_saved: bool,
    pub response_time_ms: u64,
}

impl CheckReport {
    pub fn exit_code(&self) -> u8 {
        self.status.exit_code()
    }
}

/// Edge trigger: alert only when the product becomes available.
pub fn should_notify(current: AvailabilityStatus, previous: Option<AvailabilityStatus>) -> bool {
    current == AvailabilityStatus::Available && previous != Some(AvailabilityStatus::Available)
}

/// Runs one fetch, classify, notify, persist cycle for the configured page.
pub struct Watcher {
    target_url: Url,
    fetcher: Box<dyn PageFetcher>,
    classifier: AvailabilityClassifier,
    store: StateStore,
    notifier: NotifierManager,
}

impl Watcher {
    pub fn new(
        target_url: Url,
        fetcher: Box<dyn PageFetcher>,
        classifier: AvailabilityClassifier,
        store: StateStore,
        notifier: NotifierManager,
    ) -> Self {
        Self {
            target_url,
            fetcher,
            classifier,
            store,
            notifier,
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(
            config.target_url.clone(),
            Box::new(HttpFetcher::new(&config.fetch)?),
            AvailabilityClassifier::with_keywords(config.keywords.clone()),
            StateStore::new(&config.state_file),
            NotifierManager::from_config(&config.notifications)?,
        ))
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn notifier(&self) -> &NotifierManager {
        &self.notifier
    }

    /// A fetch failure ends the run before classification and leaves the
    /// state file untouched. Everything after the fetch is best effort.
    pub async fn run(&self) -> Result<CheckReport> {
        info!("Checking {}", self.target_url);

        let previous = self.store.load().map(|record| record.status);

        let page = match self.fetcher.fetch(&self.target_url).await {
            Ok(page) => page,
            Err(e) => {
                error!("Page fetch failed: {}", e);
                return Err(e);
            }
        };
        debug!(
            "Fetched {} (HTTP {}, {} ms)",
            page.final_url,
            page.status,
            page.response_time_ms
        );

        let result = self.classifier.classify_html(&page.body);
        info!(
            "Status: {} ({}). Previous: {}",
            result.status,
            result.reason,
            previous.map_or("none", |s| s.as_str())
        );

        let notified = should_notify(result.status, previous);
        let dispatch = if notified {
            self.notify_available(&result).await
        } else {
            match result.status {
                AvailabilityStatus::Available => {
                    info!("Product still available, already notified")
                }
                AvailabilityStatus::Unavailable => info!("Product unavailable"),
                AvailabilityStatus::Indeterminate => info!("Availability is ambiguous"),
            }
            DispatchReport::default()
        };

        let state_saved = self.store.save_or_warn(result.status).is_some();

        Ok(CheckReport {
            url: self.target_url.to_string(),
            status: result.status,
            reason: result.reason,
            previous,
            notified,
            channels_delivered: dispatch.delivered,
            state_saved,
            response_time_ms: page.response_time_ms,
        })
    }

    async fn notify_available(&self, result: &ClassificationResult) -> DispatchReport {
        let notification = Notification::product_available(&self.target_url, result);
        let report = self.notifier.dispatch(&notification).await;
        info!(
            "Notifications sent: {} delivered, {} failed, {} not configured",
            report.delivered.len(),
            report.failed.len(),
            report.skipped.len()
        );
        report
    }

    /// Sends a test message through every configured channel.
    pub async fn send_test_notification(&self) -> DispatchReport {
        let notification = Notification::new(
            "🧪 Restock watcher test notification",
            format!(
                "Notifications for {} are configured correctly.",
                self.target_url
            ),
            self.target_url.as_str(),
        );
        self.notifier.dispatch(&notification).await
    }
}
