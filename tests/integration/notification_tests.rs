use restock_watcher::Watcher;
use restock_watcher::classifier::AvailabilityClassifier;
use restock_watcher::config::AppConfig;
use restock_watcher::fetcher::HttpFetcher;
use restock_watcher::plugins::NotifierManager;
use restock_watcher::plugins::notifiers::TelegramNotifier;
use restock_watcher::state::StateStore;
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use super::*;

/// Real Telegram channel from `config`, plus a recording stand-in for email.
fn watcher_with_recording_email(
    config: &AppConfig,
) -> anyhow::Result<(Watcher, Arc<Mutex<Vec<String>>>)> {
    let (email, sent) = RecordingChannel::new("email", true);

    let mut notifier = NotifierManager::new();
    notifier.register(Box::new(TelegramNotifier::new(config.notifications.telegram.clone())?));
    notifier.register(Box::new(email));

    let watcher = Watcher::new(
        config.target_url.clone(),
        Box::new(HttpFetcher::new(&config.fetch)?),
        AvailabilityClassifier::with_keywords(config.keywords.clone()),
        StateStore::new(&config.state_file),
        notifier,
    );
    Ok((watcher, sent))
}

#[tokio::test]
async fn test_incomplete_telegram_config_is_silent_noop() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.serve_page(IN_STOCK_LD_PAGE).await;
    env.expect_telegram(0).await;

    // Token without a chat id leaves the push channel disabled.
    let config = env.config(&[("TG_BOT_TOKEN", BOT_TOKEN)]);
    let (watcher, sent) = watcher_with_recording_email(&config)?;

    assert_eq!(watcher.notifier().enabled_channels(), vec!["email"]);

    let report = watcher.run().await?;
    assert!(report.notified);
    assert_eq!(report.channels_delivered, vec!["email"]);

    let titles = sent.lock().unwrap().clone();
    assert_eq!(titles.len(), 1);
    assert!(titles[0].contains("product AVAILABLE!"));
    Ok(())
}

#[tokio::test]
async fn test_telegram_failure_does_not_block_email() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.serve_page(IN_STOCK_LD_PAGE).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&env.server)
        .await;

    let config = env.config(&TestEnv::telegram_vars());
    let (watcher, sent) = watcher_with_recording_email(&config)?;

    let report = watcher.run().await?;

    assert!(report.notified);
    assert_eq!(report.channels_delivered, vec!["email"]);
    assert_eq!(sent.lock().unwrap().len(), 1);
    assert_eq!(report.exit_code(), 0);
    assert!(report.state_saved);
    Ok(())
}

#[tokio::test]
async fn test_send_test_notification_uses_enabled_channels() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.expect_telegram(1).await;

    let config = env.config(&TestEnv::telegram_vars());
    let (watcher, sent) = watcher_with_recording_email(&config)?;

    let report = watcher.send_test_notification().await;

    assert_eq!(report.delivered, vec!["telegram", "email"]);
    assert!(sent.lock().unwrap()[0].contains("test notification"));
    Ok(())
}
