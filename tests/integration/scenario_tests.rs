use std::time::Duration;

use restock_watcher::{AppError, AvailabilityStatus, Watcher};
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use super::*;

#[tokio::test]
async fn test_first_restock_notifies_and_persists() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.serve_page(IN_STOCK_LD_PAGE).await;
    env.expect_telegram(1).await;

    let watcher = Watcher::from_config(&env.config(&TestEnv::telegram_vars()))?;
    let report = watcher.run().await?;

    assert_eq!(report.status, AvailabilityStatus::Available);
    assert!(report.reason.starts_with("schema.org structured data"));
    assert_eq!(report.previous, None);
    assert!(report.notified);
    assert_eq!(report.channels_delivered, vec!["telegram"]);
    assert_eq!(report.exit_code(), 0);
    assert!(report.state_saved);
    assert_eq!(env.read_state().unwrap()["status"], "in_stock");
    Ok(())
}

#[tokio::test]
async fn test_sold_out_after_in_stock_is_silent() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.write_prior(AvailabilityStatus::Available);
    env.serve_page(SOLD_OUT_PAGE).await;
    env.expect_telegram(0).await;

    let watcher = Watcher::from_config(&env.config(&TestEnv::telegram_vars()))?;
    let report = watcher.run().await?;

    assert_eq!(report.status, AvailabilityStatus::Unavailable);
    assert_eq!(report.reason, "keyword match: 'sold out'");
    assert_eq!(report.previous, Some(AvailabilityStatus::Available));
    assert!(!report.notified);
    assert_eq!(report.exit_code(), 1);
    assert_eq!(env.read_state().unwrap()["status"], "out_of_stock");
    Ok(())
}

#[tokio::test]
async fn test_fetch_timeout_aborts_and_keeps_state() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.write_prior(AvailabilityStatus::Unavailable);
    let before = std::fs::read_to_string(env.state_path())?;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(IN_STOCK_LD_PAGE)
                .set_delay(Duration::from_secs(4)),
        )
        .mount(&env.server)
        .await;
    env.expect_telegram(0).await;

    let watcher = Watcher::from_config(&env.config(&[("TIMEOUT", "1")]))?;
    let err = watcher.run().await.unwrap_err();

    assert!(matches!(err, AppError::Fetch { .. }));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(std::fs::read_to_string(env.state_path())?, before);
    Ok(())
}

#[tokio::test]
async fn test_http_error_status_aborts() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&env.server)
        .await;

    let watcher = Watcher::from_config(&env.config(&[]))?;
    let err = watcher.run().await.unwrap_err();

    assert_eq!(err.exit_code(), 2);
    assert!(env.read_state().is_none());
    Ok(())
}

#[tokio::test]
async fn test_repeated_availability_notifies_once() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.write_prior(AvailabilityStatus::Available);
    env.serve_page(IN_STOCK_LD_PAGE).await;
    env.expect_telegram(0).await;

    let watcher = Watcher::from_config(&env.config(&TestEnv::telegram_vars()))?;
    let report = watcher.run().await?;

    assert_eq!(report.status, AvailabilityStatus::Available);
    assert!(!report.notified);
    assert!(report.channels_delivered.is_empty());
    assert_eq!(report.exit_code(), 0);
    Ok(())
}

#[tokio::test]
async fn test_two_consecutive_runs_send_one_alert() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.serve_page(IN_STOCK_LD_PAGE).await;
    env.expect_telegram(1).await;

    let config = env.config(&TestEnv::telegram_vars());
    let first = Watcher::from_config(&config)?.run().await?;
    let second = Watcher::from_config(&config)?.run().await?;

    assert!(first.notified);
    assert!(!second.notified);
    assert_eq!(second.previous, Some(AvailabilityStatus::Available));
    Ok(())
}

#[tokio::test]
async fn test_corrupt_state_counts_as_no_prior() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    std::fs::write(env.state_path(), "{\"status\": ")?;
    env.serve_page(IN_STOCK_LD_PAGE).await;
    env.expect_telegram(1).await;

    let report = Watcher::from_config(&env.config(&TestEnv::telegram_vars()))?
        .run()
        .await?;

    assert_eq!(report.previous, None);
    assert!(report.notified);
    assert_eq!(env.read_state().unwrap()["status"], "in_stock");
    Ok(())
}

#[tokio::test]
async fn test_unwritable_state_does_not_abort() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.serve_page(SOLD_OUT_PAGE).await;

    // Pointing the state file at a directory makes every write fail.
    let state_dir = env.state_dir.path().display().to_string();
    let watcher = Watcher::from_config(&env.config(&[("STATE_FILE", state_dir.as_str())]))?;
    let report = watcher.run().await?;

    assert_eq!(report.status, AvailabilityStatus::Unavailable);
    assert!(!report.state_saved);
    assert_eq!(report.exit_code(), 1);
    Ok(())
}

#[tokio::test]
async fn test_custom_keywords_are_used() -> anyhow::Result<()> {
    let env = TestEnv::new().await;
    env.serve_page("<html><body><p>Ausverkauft</p></body></html>").await;

    let config = env.config(&[
        ("KEYWORDS_OUT", "ausverkauft"),
        ("KEYWORDS_IN", "auf lager"),
    ]);
    let report = Watcher::from_config(&config)?.run().await?;

    assert_eq!(report.status, AvailabilityStatus::Unavailable);
    assert_eq!(report.reason, "keyword match: 'ausverkauft'");
    Ok(())
}
