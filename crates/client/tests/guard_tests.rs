//! Refresh-protocol tests: single-flight, replay, and teardown semantics

use backoffice_client::{BackofficeClient, ClientError};
use backoffice_core::{Session, UserInfo};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn envelope(data: Value) -> Value {
    json!({ "code": "200", "message": "OK", "data": data })
}

fn user_json() -> Value {
    json!({
        "id": 1,
        "username": "admin",
        "email": "admin@example.com",
        "role": "ADMIN"
    })
}

fn sample_user() -> UserInfo {
    UserInfo {
        id: 1,
        username: "admin".into(),
        email: "admin@example.com".into(),
        role: "ADMIN".into(),
        created_at: None,
        last_login_at: None,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("backoffice_client=debug")
        .try_init();
}

async fn seed(client: &BackofficeClient, token: &str) {
    client
        .session()
        .save(&Session {
            access_token: token.into(),
            refresh_token: Some("r-1".into()),
            user: sample_user(),
        })
        .await
        .unwrap();
}

/// Mount a resource that rejects the stale token and accepts the fresh one.
async fn mount_rotating_resource(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(route))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(envelope(json!({ "route": route }))),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn concurrent_401s_trigger_exactly_one_refresh() {
    init_tracing();
    let mock_server = MockServer::start().await;

    for route in ["/api/v1/user/users/a", "/api/v1/user/users/b", "/api/v1/user/users/c"] {
        mount_rotating_resource(&mock_server, route).await;
    }

    // The delay keeps the flight open long enough for all three 401s to join.
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "r-1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({
                    "token": "fresh",
                    "refreshToken": "r-2",
                    "user": user_json()
                })))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackofficeClient::new(mock_server.uri()).unwrap();
    seed(&client, "stale").await;

    let (a, b, c) = tokio::join!(
        client.get::<Value>("/api/v1/user/users/a"),
        client.get::<Value>("/api/v1/user/users/b"),
        client.get::<Value>("/api/v1/user/users/c"),
    );

    // Each request replayed once with the fresh token and succeeded.
    assert_eq!(a.unwrap()["route"], "/api/v1/user/users/a");
    assert_eq!(b.unwrap()["route"], "/api/v1/user/users/b");
    assert_eq!(c.unwrap()["route"], "/api/v1/user/users/c");

    let session = client.session();
    assert_eq!(
        session.access_token().await.unwrap().as_deref(),
        Some("fresh")
    );
    // The backend rotated the refresh token and the rotation was persisted.
    assert_eq!(
        session.refresh_token().await.unwrap().as_deref(),
        Some("r-2")
    );
}

#[tokio::test]
async fn retried_request_is_never_retried_twice() {
    init_tracing();
    let mock_server = MockServer::start().await;

    // The resource rejects every token, fresh or not.
    Mock::given(method("GET"))
        .and(path("/api/v1/user/users/u-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("still unauthorized"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "token": "fresh",
            "user": user_json()
        }))))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackofficeClient::new(mock_server.uri()).unwrap();
    seed(&client, "stale").await;

    let result = client.get::<Value>("/api/v1/user/users/u-1").await;
    // The second 401 surfaces as a final error instead of looping.
    assert!(matches!(result, Err(ClientError::AuthenticationFailed(_))));
}

#[tokio::test]
async fn failed_refresh_tears_down_session_once() {
    init_tracing();
    let mock_server = MockServer::start().await;

    for route in ["/api/v1/user/users/a", "/api/v1/user/users/b", "/api/v1/user/users/c"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
            .mount(&mock_server)
            .await;
    }

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("refresh token revoked")
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let expired = Arc::new(AtomicUsize::new(0));
    let hook_calls = expired.clone();
    let client = BackofficeClient::builder()
        .base_url(mock_server.uri())
        .on_session_expired(Arc::new(move || {
            hook_calls.fetch_add(1, Ordering::SeqCst);
        }))
        .build()
        .unwrap();
    seed(&client, "stale").await;

    let (a, b, c) = tokio::join!(
        client.get::<Value>("/api/v1/user/users/a"),
        client.get::<Value>("/api/v1/user/users/b"),
        client.get::<Value>("/api/v1/user/users/c"),
    );

    for result in [a, b, c] {
        assert!(matches!(result, Err(ClientError::SessionExpired(_))));
    }

    // Teardown ran exactly once, not once per queued request.
    assert_eq!(expired.load(Ordering::SeqCst), 1);

    let session = client.session();
    assert_eq!(session.access_token().await.unwrap(), None);
    assert_eq!(session.refresh_token().await.unwrap(), None);
    assert_eq!(session.user().await.unwrap(), None);
}

#[tokio::test]
async fn missing_refresh_token_fails_without_network_call() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/user/users/u-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthenticated"))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!(null))))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Never logged in: no token of any kind stored.
    let client = BackofficeClient::new(mock_server.uri()).unwrap();
    assert_eq!(client.session().access_token().await.unwrap(), None);

    let result = client.get::<Value>("/api/v1/user/users/u-1").await;
    assert!(matches!(result, Err(ClientError::SessionExpired(_))));
}

#[tokio::test]
async fn refresh_works_again_after_an_earlier_flight() {
    init_tracing();
    let mock_server = MockServer::start().await;

    mount_rotating_resource(&mock_server, "/api/v1/user/users/u-1").await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "token": "fresh",
            "user": user_json()
        }))))
        .expect(2)
        .mount(&mock_server)
        .await;

    let client = BackofficeClient::new(mock_server.uri()).unwrap();

    seed(&client, "stale").await;
    client
        .get::<Value>("/api/v1/user/users/u-1")
        .await
        .unwrap();

    // A later session going stale starts a brand-new flight.
    seed(&client, "stale").await;
    client
        .get::<Value>("/api/v1/user/users/u-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn forced_refresh_joins_in_flight_refresh() {
    init_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope(json!({
                    "token": "fresh",
                    "user": user_json()
                })))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = BackofficeClient::new(mock_server.uri()).unwrap();
    seed(&client, "stale").await;

    let (a, b) = tokio::join!(client.refresh_session(), client.refresh_session());
    assert_eq!(a.unwrap(), "fresh");
    assert_eq!(b.unwrap(), "fresh");
}
