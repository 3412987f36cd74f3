//! End-to-end integration tests for the interceptor pipeline.
//!
//! These tests drive the shared client against a local mock server and
//! verify the full capture path: scope decisions, entry ordering,
//! redaction, truncation, capacity, and failure transparency.

use api_inspector::interceptor::{ApiClient, ApiError};
use api_inspector::models::{LogEntry, LogKind};
use api_inspector::sanitize::{REDACTED_VALUE, TRUNCATION_MARKER};
use api_inspector::store::{LogStore, MemoryBackend};
use api_inspector::ApiRequest;
use httpmock::prelude::*;
use serde_json::json;
use std::sync::{Arc, Mutex};

fn memory_store(capacity: usize) -> Arc<LogStore> {
    Arc::new(LogStore::with_capacity(
        Box::new(MemoryBackend::new()),
        capacity,
    ))
}

fn client_for(server: &MockServer, store: &Arc<LogStore>) -> ApiClient {
    ApiClient::with_store(&server.base_url(), Arc::clone(store)).unwrap()
}

/// Oldest-first view of the store, for asserting call ordering.
fn chronological(store: &LogStore) -> Vec<LogEntry> {
    let mut entries = store.get_all();
    entries.reverse();
    entries
}

#[tokio::test]
async fn successful_get_produces_request_then_response() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/doctors");
            then.status(200).json_body(json!([{"id": 1, "name": "Dr. Ames"}]));
        })
        .await;

    let store = memory_store(100);
    let client = client_for(&server, &store);

    let response = client.get("/doctors").await.unwrap();
    mock.assert_async().await;
    assert_eq!(response.status, 200);
    assert_eq!(response.data, json!([{"id": 1, "name": "Dr. Ames"}]));

    let entries = chronological(&store);
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].kind, LogKind::Request);
    assert_eq!(entries[0].method.as_deref(), Some("GET"));
    assert!(entries[0].url.ends_with("/doctors"));

    assert_eq!(entries[1].kind, LogKind::Response);
    assert_eq!(entries[1].status, Some(200));
    assert!(entries[1].duration.is_some());
}

#[tokio::test]
async fn rejected_post_produces_request_then_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/invoices");
            then.status(404).json_body(json!({"detail": "no such patient"}));
        })
        .await;

    let store = memory_store(100);
    let client = client_for(&server, &store);

    let result = client.post("/invoices", json!({"patient": 99})).await;
    let err = result.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 404, .. }));

    let entries = chronological(&store);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, LogKind::Request);
    assert_eq!(entries[1].kind, LogKind::Error);
    assert_eq!(entries[1].status, Some(404));
    assert!(entries[1].message.as_deref().unwrap().contains("404"));
}

#[tokio::test]
async fn cross_origin_call_is_not_logged() {
    let own_api = MockServer::start_async().await;
    let third_party = MockServer::start_async().await;
    let mock = third_party
        .mock_async(|when, then| {
            when.method(GET).path("/track");
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    let store = memory_store(100);
    let client = client_for(&own_api, &store);

    let response = client
        .get(&format!("{}/track", third_party.base_url()))
        .await
        .unwrap();
    mock.assert_async().await;
    assert_eq!(response.status, 200);

    assert!(store.get_all().is_empty());
}

#[tokio::test]
async fn sensitive_headers_are_redacted_in_storage_but_sent_intact() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/profile")
                .header("authorization", "Bearer secret-token");
            then.status(200).json_body(json!({"name": "R. Osei"}));
        })
        .await;

    let store = memory_store(100);
    let client = client_for(&server, &store);

    let mut request = ApiRequest::get("/profile");
    request.add_header("Authorization", "Bearer secret-token");
    client.execute(request).await.unwrap();

    // The mock only matches if the real header value went over the wire.
    mock.assert_async().await;

    let entries = chronological(&store);
    let logged_headers = entries[0].headers.as_ref().unwrap();
    assert_eq!(logged_headers.get("Authorization").unwrap(), REDACTED_VALUE);
    // Normalized headers are captured too.
    assert_eq!(logged_headers.get("Accept").unwrap(), "application/json");

    let serialized = serde_json::to_string(&store.get_all()).unwrap();
    assert!(!serialized.contains("secret-token"));
}

#[tokio::test]
async fn oversized_response_payload_is_truncated() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/report");
            then.status(200).json_body(json!({"blob": "x".repeat(5000)}));
        })
        .await;

    let store = memory_store(100);
    let client = client_for(&server, &store);

    let response = client.get("/report").await.unwrap();
    // The caller still receives the full payload.
    assert_eq!(response.data["blob"].as_str().unwrap().len(), 5000);

    let entries = chronological(&store);
    let stored = entries[1].data.as_ref().unwrap().as_str().unwrap();
    assert!(stored.ends_with(TRUNCATION_MARKER));
    assert!(stored.len() < 5000);
}

#[tokio::test]
async fn capacity_bounds_the_store_across_calls() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200).json_body(json!({"ok": true}));
        })
        .await;

    let store = memory_store(4);
    let client = client_for(&server, &store);

    // Four calls produce eight entries against a capacity of four.
    for i in 0..4 {
        client.get(&format!("/items/{}", i)).await.unwrap();
    }

    let entries = store.get_all();
    assert_eq!(entries.len(), 4);
    // Only the newest survive; the first call's entries are gone.
    assert!(!entries.iter().any(|e| e.url.ends_with("/items/0")));
}

#[tokio::test]
async fn transport_failure_is_logged_and_re_raised() {
    // A base origin nothing listens on: connection refused.
    let store = memory_store(100);
    let client = ApiClient::with_store("http://127.0.0.1:1", Arc::clone(&store)).unwrap();

    let result = client.get("/unreachable").await;
    assert!(matches!(result, Err(ApiError::Network(_))));

    let entries = chronological(&store);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, LogKind::Request);
    assert_eq!(entries[1].kind, LogKind::Error);
    assert!(entries[1].status.is_none());
    assert!(entries[1].message.is_some());
}

#[tokio::test]
async fn subscribers_see_the_persisted_entries() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/plans");
            then.status(200).json_body(json!([]));
        })
        .await;

    let store = memory_store(100);
    let client = client_for(&server, &store);

    let seen: Arc<Mutex<Vec<LogEntry>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let subscription = client.subscribe(move |entry| {
        sink.lock().unwrap().push(entry.clone());
    });

    client.get("/plans").await.unwrap();

    let published = seen.lock().unwrap().clone();
    assert_eq!(published.len(), 2);
    // What subscribers saw is exactly what the store persisted.
    assert_eq!(published, chronological(&store));

    // After disposal the callback no longer fires.
    subscription.unsubscribe();
    client.get("/plans").await.unwrap();
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn clear_empties_the_store_between_calls() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/tests");
            then.status(200).json_body(json!([]));
        })
        .await;

    let store = memory_store(100);
    let client = client_for(&server, &store);

    client.get("/tests").await.unwrap();
    assert_eq!(store.get_all().len(), 2);

    store.clear();
    assert!(store.get_all().is_empty());

    client.get("/tests").await.unwrap();
    assert_eq!(store.get_all().len(), 2);
}
