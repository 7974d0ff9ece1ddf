//! Integration tests for warning dismissal across restarts.

mod helpers;

use gigboard_entity::status::{AccountStatus, StatusSeverity};

use helpers::TestApp;

#[tokio::test]
async fn test_dismissal_survives_restart() {
    let first = TestApp::new().await;
    let warning = AccountStatus::warning("Repeated late arrival", 1_700_000_000_000);

    assert!(first.feed.should_show_banner(&warning));
    first.feed.dismiss_warning(&warning).await.unwrap();
    first.feed.dismiss_warning(&warning).await.unwrap();
    assert!(first.feed.is_warning_dismissed(&warning));

    let restarted = TestApp::with_data_dir(first.data_dir.clone()).await;
    assert!(restarted.feed.is_warning_dismissed(&warning));
    assert!(!restarted.feed.should_show_banner(&warning));

    let reworded = AccountStatus::warning("Repeated late arrival", 1_700_000_000_001);
    assert!(restarted.feed.should_show_banner(&reworded));
}

#[tokio::test]
async fn test_high_severity_returns_after_restart() {
    let first = TestApp::new().await;
    let suspension = AccountStatus::new(StatusSeverity::Suspension, "Chargeback dispute", 42);

    first.feed.dismiss_warning(&suspension).await.unwrap();
    assert!(!first.feed.should_show_banner(&suspension));
    assert!(!first.feed.is_warning_dismissed(&suspension));

    let restarted = TestApp::with_data_dir(first.data_dir.clone()).await;
    assert!(restarted.feed.should_show_banner(&suspension));
}

#[tokio::test]
async fn test_unreadable_blob_starts_empty() {
    let first = TestApp::new().await;
    let warning = AccountStatus::warning("Spam", 7);
    first.feed.dismiss_warning(&warning).await.unwrap();

    for entry in std::fs::read_dir(&first.data_dir).unwrap() {
        std::fs::write(entry.unwrap().path(), b"{\"version\": 99}").unwrap();
    }

    let restarted = TestApp::with_data_dir(first.data_dir.clone()).await;
    assert!(!restarted.feed.is_warning_dismissed(&warning));
}

#[tokio::test]
async fn test_data_dir_removed_with_app() {
    let app = TestApp::new().await;
    let dir = app.data_dir.clone();
    app.feed.dismiss_warning(&AccountStatus::warning("Spam", 7)).await.unwrap();
    assert!(dir.join("gigboard%3Adismissals%3Amusician_1.json").exists());

    drop(app);
    assert!(!dir.exists());
}
