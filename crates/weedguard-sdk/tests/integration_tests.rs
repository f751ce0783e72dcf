//! Integration tests for the Weed Guard SDK
//!
//! Exercises the full token lifecycle against a mock backend:
//! bearer rotation, single-flight refresh under concurrency, and
//! session teardown when authorization cannot be restored.

use std::time::Duration;

use serde_json::json;
use weedguard_sdk::types::PredictionUpload;
use weedguard_sdk::{ApiError, ClientBuilder, TokenPair, WeedGuardClient};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn authenticated_client(server: &MockServer) -> WeedGuardClient {
    let client = ClientBuilder::new()
        .base_url(server.uri())
        .with_memory_storage()
        .build()
        .unwrap();
    client
        .token_store()
        .set(&TokenPair::new("A1", "R1"))
        .await
        .unwrap();
    client
}

fn analytics_body() -> serde_json::Value {
    json!({
        "overview": {
            "total_predictions": 12,
            "recent_predictions": 3,
            "unique_locations": 4,
            "unique_sites": 2,
        },
        "weed_statistics": [{ "result": "blackjack", "count": 7 }],
        "monthly_trends": [{ "month": "2026-07", "count": 3 }],
        "recent_activity": [],
    })
}

/// The full rotation scenario: login issues A1/R1, the server rejects
/// A1, refresh with R1 yields A2/R2, and the original call is replayed
/// with A2 and its result returned to the caller.
#[tokio::test]
async fn expired_token_is_rotated_and_request_replayed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/login/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A1",
            "refresh_token": "R1",
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/predictions-list/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token/"))
        .and(body_json(json!({ "refresh_token": "R1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "refresh_token": "R2",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/predictions-list/"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{
                "id": "p1",
                "site_name": "north-field",
                "location": "-1.29,36.82",
                "result": "blackjack",
                "timestamp": "2026-08-01T07:30:00Z",
            }],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ClientBuilder::new()
        .base_url(server.uri())
        .with_memory_storage()
        .build()
        .unwrap();

    client.login("farmer@example.com", "secret").await.unwrap();
    assert_eq!(
        client.token_store().get().await,
        Some(TokenPair::new("A1", "R1"))
    );

    let predictions = client.list_predictions().await.unwrap();
    assert_eq!(predictions.len(), 1);
    assert_eq!(predictions[0].result, "blackjack");

    // The rotated pair replaced the rejected one.
    assert_eq!(
        client.token_store().get().await,
        Some(TokenPair::new("A2", "R2"))
    );
}

/// N concurrent requests all rejected with the same stale token are
/// serviced by exactly one refresh call, and every request is replayed
/// with the same rotated token.
#[tokio::test]
async fn concurrent_401s_share_a_single_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired",
        })))
        .mount(&server)
        .await;

    // The delay keeps the refresh in flight long enough for every
    // rejected request to queue behind it.
    Mock::given(method("POST"))
        .and(path("/refresh-token/"))
        .and(body_json(json!({ "refresh_token": "R1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({
                    "access_token": "A2",
                    "refresh_token": "R2",
                }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/analytics/"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analytics_body()))
        .expect(5)
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;

    let (a, b, c, d, e) = tokio::join!(
        client.analytics_summary(),
        client.analytics_summary(),
        client.analytics_summary(),
        client.analytics_summary(),
        client.analytics_summary(),
    );

    for outcome in [a, b, c, d, e] {
        assert_eq!(outcome.unwrap().overview.total_predictions, 12);
    }
    assert_eq!(
        client.token_store().get().await,
        Some(TokenPair::new("A2", "R2"))
    );
}

/// A failed refresh rejects the whole queued batch and empties the
/// token store.
#[tokio::test]
async fn failed_refresh_rejects_batch_and_clears_store() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predictions-list/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired",
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "detail": "Refresh token revoked" }))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;

    let (a, b, c) = tokio::join!(
        client.list_predictions(),
        client.list_predictions(),
        client.list_predictions(),
    );

    for outcome in [a, b, c] {
        assert!(matches!(outcome.unwrap_err(), ApiError::AuthExpired));
    }
    assert_eq!(client.token_store().get().await, None);
}

/// A request replayed after a successful refresh that is rejected
/// again resolves AuthExpired instead of triggering a second refresh.
#[tokio::test]
async fn second_401_after_refresh_does_not_loop() {
    let server = MockServer::start().await;

    // Rejects both the original token and the rotated one.
    Mock::given(method("GET"))
        .and(path("/analytics/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired",
        })))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "refresh_token": "R2",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;

    let err = client.analytics_summary().await.unwrap_err();
    assert!(matches!(err, ApiError::AuthExpired));
    assert!(err.is_auth_expired());
}

/// Refresh responses that omit a rotated refresh token keep the
/// previous one.
#[tokio::test]
async fn refresh_without_rotated_refresh_token_keeps_old_one() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired",
        })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/analytics/"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(analytics_body()))
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    client.analytics_summary().await.unwrap();

    assert_eq!(
        client.token_store().get().await,
        Some(TokenPair::new("A2", "R1"))
    );
}

/// The multipart upload replays cleanly after a refresh: the form is
/// rebuilt for the second attempt.
#[tokio::test]
async fn prediction_upload_survives_token_rotation() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Token expired",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/refresh-token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "A2",
            "refresh_token": "R2",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/predict/"))
        .and(header("Authorization", "Bearer A2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "weed detected",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    let outcome = client
        .upload_prediction(&PredictionUpload {
            image: vec![0xFF, 0xD8, 0xFF, 0xE0],
            file_name: "prediction.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            site_name: "north-field".to_string(),
            location: "-1.29,36.82".to_string(),
            farmer_id: "f42".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(outcome.result, "weed detected");
}

/// Requests that exceed the fixed timeout surface as network errors.
#[tokio::test]
async fn slow_responses_surface_as_network_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/analytics/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(analytics_body())
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = ClientBuilder::new()
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .with_memory_storage()
        .build()
        .unwrap();

    let err = client.analytics_summary().await.unwrap_err();
    assert!(matches!(&err, ApiError::Network(e) if e.is_timeout()));
}

/// Prediction detail fetch decodes the record shape.
#[tokio::test]
async fn prediction_detail_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/predictions/p7/"))
        .and(header("Authorization", "Bearer A1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p7",
            "site_name": "south-field",
            "location": "Nakuru",
            "result": "clean",
            "timestamp": "2026-08-02T10:00:00Z",
        })))
        .mount(&server)
        .await;

    let client = authenticated_client(&server).await;
    let prediction = client.get_prediction("p7").await.unwrap();

    assert_eq!(prediction.id, "p7");
    assert_eq!(prediction.result, "clean");
}
