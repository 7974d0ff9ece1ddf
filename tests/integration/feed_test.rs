//! Integration tests for the grouped feed and read state.

mod helpers;

use gigboard_core::types::NotificationId;
use gigboard_entity::notification::NotificationType;
use gigboard_notify::feed::FeedFilter;
use gigboard_notify::grouping::DisplayItem;
use gigboard_notify::read_state::OpenOutcome;

use helpers::{TestApp, record};

const HOUR_MS: i64 = 3_600_000;

#[tokio::test]
async fn test_feed_groups_and_orders() {
    let app = TestApp::new().await;
    let base = 1_700_000_000_000;
    app.seed(vec![
        record("pv1", NotificationType::ProfileView, base + 100_000),
        record("pv2", NotificationType::ProfileView, base + 101_000),
        record("pv3", NotificationType::ProfileView, base + 2 * HOUR_MS),
        record("nf1", NotificationType::NewFollower, base + 50_000),
    ])
    .await;

    let items = app.feed.get_display_feed(FeedFilter::All);
    let ids: Vec<String> = items.iter().map(|i| i.id().to_string()).collect();
    assert_eq!(
        ids,
        vec![
            "pv3".to_string(),
            format!("profile_view_group_{}", base + 101_000),
            "nf1".to_string(),
        ]
    );

    let DisplayItem::Group(group) = &items[1] else {
        panic!("expected a group");
    };
    assert_eq!(group.count, 2);
    assert_eq!(group.group_type, "profile_view_group");
    let order: Vec<&str> = group.notifications.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(order, vec!["pv2", "pv1"]);
}

#[tokio::test]
async fn test_open_group_then_record() {
    let app = TestApp::new().await;
    app.seed(vec![
        record("m1", NotificationType::NewMessage, 1_000),
        record("m2", NotificationType::NewMessage, 2_000),
        record("r1", NotificationType::NewReview, 5 * HOUR_MS),
    ])
    .await;

    let items = app.feed.get_display_feed(FeedFilter::All);
    assert_eq!(items.len(), 2);

    let outcome = app.feed.open_item(&items[1]).await.unwrap();
    assert!(matches!(outcome, OpenOutcome::ShowGroup(ref records) if records.len() == 2));
    assert_eq!(app.feed.get_unread_count(), 3);

    let outcome = app.feed.open_item(&items[0]).await.unwrap();
    assert_eq!(outcome, OpenOutcome::MarkedRead(NotificationId::from("r1")));
    assert_eq!(app.feed.get_unread_count(), 2);
}

#[tokio::test]
async fn test_mark_all_then_refresh() {
    let app = TestApp::new().await;
    app.seed(vec![
        record("a", NotificationType::GigInvite, 1),
        record("b", NotificationType::GigReminder, 2),
        record("c", NotificationType::SystemUpdates, 3),
    ])
    .await;
    let mut rx = app.feed.subscribe();
    rx.mark_unchanged();

    app.feed.request_mark_all_read().await.unwrap();
    assert_eq!(app.feed.get_unread_count(), 0);
    assert!(rx.has_changed().unwrap());

    let snapshot = app.feed.refresh().await.unwrap();
    assert_eq!(snapshot.unread_count, 0);
    assert!(snapshot.records.iter().all(|r| r.is_read));
    assert!(app.feed.get_display_feed(FeedFilter::Unread).is_empty());
}

#[tokio::test]
async fn test_transient_mark_read_is_retried() {
    let app = TestApp::new().await;
    app.seed(vec![record("a", NotificationType::NewFollower, 1)]).await;
    app.platform.fail_mark_read(app.config.read_state.max_retries);

    app.feed
        .request_mark_read(&NotificationId::from("a"))
        .await
        .unwrap();
    assert_eq!(app.feed.get_unread_count(), 0);
}

#[tokio::test]
async fn test_by_type_filter() {
    let app = TestApp::new().await;
    app.seed(vec![
        record("a", NotificationType::GigApproved, 1),
        record("b", NotificationType::NewMessage, 2),
    ])
    .await;

    let items = app
        .feed
        .get_display_feed(FeedFilter::ByType(NotificationType::GigApproved));
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id(), "a");
}
