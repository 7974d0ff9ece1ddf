//! Integration tests for bulk accept/decline of follow requests.

mod helpers;

use gigboard_core::error::ErrorKind;
use gigboard_core::types::RequesterId;
use gigboard_notify::bulk::{FailureCause, SelectionState};

use helpers::TestApp;

fn ids(raw: &[&str]) -> Vec<RequesterId> {
    raw.iter().map(|s| RequesterId::from(*s)).collect()
}

#[tokio::test]
async fn test_bulk_accept_partial_failure() {
    let app = TestApp::new().await;
    app.seed_requests(&["a", "b", "c"]).await;
    app.platform.fail_requester("b", ErrorKind::TransientNetwork);

    app.feed.selection().select_all(ids(&["a", "b", "c"])).unwrap();
    let summary = app.feed.accept_selected().await.unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.failed_ids(), vec![&RequesterId::from("b")]);
    assert_eq!(
        summary.results[1].error().map(|e| e.cause),
        Some(FailureCause::TransientNetwork)
    );
    assert_eq!(app.feed.selection().state(), SelectionState::Idle);

    let followers = app.platform.followers(&TestApp::user()).await;
    assert_eq!(followers, ids(&["a", "c"]));

    let pending: Vec<RequesterId> = app
        .feed
        .pending_requests()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.requester_id)
        .collect();
    assert_eq!(pending, ids(&["b"]));
}

#[tokio::test]
async fn test_bulk_decline_already_resolved() {
    let app = TestApp::new().await;
    app.seed_requests(&["x", "y"]).await;

    let summary = app
        .feed
        .request_bulk_decline(ids(&["x", "gone", "y"]))
        .await
        .unwrap();

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.succeeded, 2);
    assert_eq!(
        summary.results[1].error().map(|e| e.cause),
        Some(FailureCause::NotFound)
    );
    assert!(app.feed.pending_requests().await.unwrap().is_empty());
    assert!(app.platform.followers(&TestApp::user()).await.is_empty());
}

#[tokio::test]
async fn test_bulk_with_empty_selection() {
    let app = TestApp::new().await;
    let summary = app.feed.accept_selected().await.unwrap();
    assert_eq!(summary.total(), 0);
    assert!(app.platform.calls().is_empty());
}
