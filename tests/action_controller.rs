//! Integration tests for the trigger action controller and its
//! reconciliation of roster and channel state.

use std::sync::Arc;

use modwatch::{
    actions::{
        ActionError, AlwaysConfirm, NeverConfirm, RecordingSink, Severity,
        TriggerActionController, TriggerRoster,
    },
    client::{ApiClient, CredentialProvider, StaticCredential},
    config::HttpRetryConfig,
    http_client::build_default_client,
    models::Trigger,
    stream::ChannelRegistry,
};
use serde_json::json;
use url::Url;

fn api_for(server_url: &str) -> Arc<ApiClient> {
    let http = build_default_client(&HttpRetryConfig::no_retries()).unwrap();
    let credentials: Arc<dyn CredentialProvider> = Arc::new(StaticCredential::new("twa-init-data t"));
    Arc::new(ApiClient::new(
        http,
        Url::parse(server_url).unwrap(),
        credentials,
    ))
}

fn trigger_json(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "chat_id": -100200,
        "key_phrase": "hello",
        "content": {"type": "text", "text": "hi there"},
        "match_type": "exact",
        "is_case_sensitive": false,
        "access_level": "all",
        "usage_count": 3,
        "created_by": 555,
        "moderation_status": status,
        "moderation_reason": null,
        "is_template": false
    })
}

fn seeded_roster(id: i64, status: &str) -> TriggerRoster {
    let trigger: Trigger = serde_json::from_value(trigger_json(id, status)).unwrap();
    let roster = TriggerRoster::new();
    roster.reset(vec![trigger]);
    roster
}

#[tokio::test]
async fn approve_replaces_the_roster_copy_with_the_server_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/triggers/5/approve")
        .match_header("authorization", "twa-init-data t")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(trigger_json(5, "safe").to_string())
        .create_async()
        .await;

    let roster = seeded_roster(5, "flagged");
    let sink = Arc::new(RecordingSink::new());
    let controller = TriggerActionController::new(
        api_for(&server.url()),
        roster.clone(),
        ChannelRegistry::new(),
        sink.clone(),
        Arc::new(AlwaysConfirm),
    );

    let updated = controller.approve(5).await.unwrap();
    assert_eq!(updated.moderation_status.as_str(), "safe");
    assert_eq!(roster.get(5).unwrap().moderation_status.as_str(), "safe");
    assert_eq!(roster.len(), 1);

    let notices = sink.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].0, Severity::Success);
    mock.assert_async().await;
}

#[tokio::test]
async fn failed_approve_leaves_local_state_untouched() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/triggers/5/approve")
        .with_status(500)
        .create_async()
        .await;

    let roster = seeded_roster(5, "flagged");
    let sink = Arc::new(RecordingSink::new());
    let controller = TriggerActionController::new(
        api_for(&server.url()),
        roster.clone(),
        ChannelRegistry::new(),
        sink.clone(),
        Arc::new(AlwaysConfirm),
    );

    let err = controller.approve(5).await.unwrap_err();
    assert!(matches!(err, ActionError::Api(_)));
    // No optimistic update: the flagged copy is still there.
    assert_eq!(roster.get(5).unwrap().moderation_status.as_str(), "flagged");
    assert_eq!(sink.notices()[0].0, Severity::Error);
}

#[tokio::test]
async fn requeue_updates_the_roster_copy() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/triggers/5/requeue")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(trigger_json(5, "pending").to_string())
        .create_async()
        .await;

    let roster = seeded_roster(5, "flagged");
    let controller = TriggerActionController::new(
        api_for(&server.url()),
        roster.clone(),
        ChannelRegistry::new(),
        Arc::new(RecordingSink::new()),
        Arc::new(AlwaysConfirm),
    );

    controller.requeue(5).await.unwrap();
    assert_eq!(roster.get(5).unwrap().moderation_status.as_str(), "pending");
}

#[tokio::test]
async fn delete_removes_the_record_and_closes_its_channel() {
    let mut server = mockito::Server::new_async().await;
    let delete_mock = server
        .mock("DELETE", "/triggers/5")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status": "ok"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/triggers/5/moderation-history/stream")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(": heartbeat\n\n")
        .create_async()
        .await;

    let api = api_for(&server.url());
    let registry = ChannelRegistry::new();

    // A reviewer is watching the trigger when it gets deleted.
    let channel = modwatch::stream::LiveHistoryChannel::new(api.clone());
    let subscription = channel.open(5, |_| {}).await.unwrap();
    registry.register(5, subscription.handle());

    let roster = seeded_roster(5, "flagged");
    let controller = TriggerActionController::new(
        api,
        roster.clone(),
        registry.clone(),
        Arc::new(RecordingSink::new()),
        Arc::new(AlwaysConfirm),
    );

    controller.delete(5).await.unwrap();
    assert!(roster.get(5).is_none());
    assert!(roster.is_empty());
    assert!(subscription.is_closed());
    assert!(!registry.contains(5));
    delete_mock.assert_async().await;
}

#[tokio::test]
async fn declined_confirmation_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let delete_mock = server
        .mock("DELETE", "/triggers/5")
        .expect(0)
        .create_async()
        .await;

    let roster = seeded_roster(5, "flagged");
    let sink = Arc::new(RecordingSink::new());
    let controller = TriggerActionController::new(
        api_for(&server.url()),
        roster.clone(),
        ChannelRegistry::new(),
        sink.clone(),
        Arc::new(NeverConfirm),
    );

    let err = controller.delete(5).await.unwrap_err();
    assert!(matches!(err, ActionError::Unconfirmed));
    assert_eq!(roster.len(), 1);
    assert_eq!(sink.notices()[0].0, Severity::Info);
    delete_mock.assert_async().await;
}

#[tokio::test]
async fn failed_delete_keeps_record_and_channel() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("DELETE", "/triggers/5")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/triggers/5/moderation-history/stream")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(": heartbeat\n\n")
        .create_async()
        .await;

    let api = api_for(&server.url());
    let registry = ChannelRegistry::new();
    let channel = modwatch::stream::LiveHistoryChannel::new(api.clone());
    let subscription = channel.open(5, |_| {}).await.unwrap();
    registry.register(5, subscription.handle());

    let roster = seeded_roster(5, "flagged");
    let controller = TriggerActionController::new(
        api,
        roster.clone(),
        registry.clone(),
        Arc::new(RecordingSink::new()),
        Arc::new(AlwaysConfirm),
    );

    let err = controller.delete(5).await.unwrap_err();
    assert!(matches!(err, ActionError::Api(_)));
    assert_eq!(roster.len(), 1);
    assert!(registry.contains(5));
}
