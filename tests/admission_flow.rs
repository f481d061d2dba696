//! End-to-end admission flow tests against the full router.
//!
//! The router runs with the in-memory session store, a stubbed identity
//! verifier, and the mock credential issuer, so no external services are
//! needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use netgate_api::{AppState, build_router};
use netgate_auth::{
    AdmissionEngine, IdentityVerifier, MemorySessionStore, MockCredentialIssuer, SessionStore,
};
use netgate_core::config::app::{CorsConfig, ServerConfig};
use netgate_core::config::controller::ControllerConfig;
use netgate_core::config::identity::IdentityConfig;
use netgate_core::config::logging::LoggingConfig;
use netgate_core::config::session::SessionConfig;
use netgate_core::config::{AppConfig, DatabaseConfig};
use netgate_core::error::AppError;
use netgate_core::result::AppResult;
use netgate_entity::identity::Identity;

/// Accepts `"token:<email>"` and rejects everything else.
struct StubVerifier;

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, token: &str) -> AppResult<Identity> {
        match token.strip_prefix("token:") {
            Some(email) => Ok(Identity::new(email, "Test Guest", None)),
            None => Err(AppError::invalid_identity("Invalid identity token")),
        }
    }
}

fn test_config(session: SessionConfig) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            shutdown_grace_seconds: 1,
            cors: CorsConfig::default(),
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_seconds: 1,
            idle_timeout_seconds: 1,
        },
        identity: IdentityConfig {
            client_id: "test-client".to_string(),
            tokeninfo_url: "http://127.0.0.1:1/tokeninfo".to_string(),
            request_timeout_seconds: 1,
        },
        controller: ControllerConfig {
            provider: netgate_core::config::controller::IssuerProvider::Mock,
            api_url: String::new(),
            username: String::new(),
            password: String::new(),
            wlan_id: String::new(),
            portal_port: 9997,
            request_timeout_seconds: 1,
        },
        session,
        logging: LoggingConfig::default(),
    }
}

fn test_app(session: SessionConfig) -> (Router, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let engine = Arc::new(AdmissionEngine::new(
        Arc::new(StubVerifier),
        Arc::new(MockCredentialIssuer::new()),
        store.clone() as Arc<dyn SessionStore>,
        &session,
    ));
    let state = AppState::new(
        Arc::new(test_config(session)),
        engine,
        store.clone() as Arc<dyn SessionStore>,
    );
    (build_router(state), store)
}

async fn post_admission(app: &Router, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/admission")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn admission_grants_with_credential_and_portal_handoff() {
    let (app, _store) = test_app(SessionConfig::default());

    let (status, body) = post_admission(
        &app,
        json!({
            "token": "token:guest@example.edu",
            "device_address": "aa:bb:cc:dd:ee:ff",
            "controller_host": "192.168.1.10",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "granted");
    assert_eq!(body["user"]["email"], "guest@example.edu");
    assert_eq!(body["role"], "standard");
    assert!(body["credential"].as_str().unwrap().starts_with("PASS-"));
    assert_eq!(body["session_seconds"], 600);
    assert_eq!(
        body["portal"]["submit_url"],
        "http://192.168.1.10:9997/login"
    );
    assert_eq!(body["portal"]["username"], body["credential"]);
    assert_eq!(body["portal"]["password"], body["credential"]);
    assert_eq!(body["portal"]["client_mac"], "aa:bb:cc:dd:ee:ff");
}

#[tokio::test]
async fn admission_without_device_address_grants_without_credential() {
    let (app, _store) = test_app(SessionConfig::default());

    let (status, body) =
        post_admission(&app, json!({ "token": "token:guest@example.edu" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "granted");
    assert!(body.get("credential").is_none());
    assert!(body.get("portal").is_none());
}

#[tokio::test]
async fn cooldown_denial_is_a_business_payload_not_an_error() {
    let (app, _store) = test_app(SessionConfig::default());

    let request = json!({
        "token": "token:guest@example.edu",
        "device_address": "aa:bb:cc:dd:ee:ff",
    });
    post_admission(&app, request.clone()).await;
    let (status, body) = post_admission(&app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "denied");
    assert_eq!(body["reason"], "cooldown");
    assert!(body["retry_after_seconds"].as_u64().unwrap() <= 600);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Try again in")
    );
}

#[tokio::test]
async fn daily_limit_denial_after_quota_exhausted() {
    let session = SessionConfig {
        cooldown_minutes: 0,
        daily_limit: 2,
        ..SessionConfig::default()
    };
    let (app, _store) = test_app(session);

    let request = json!({
        "token": "token:guest@example.edu",
        "device_address": "aa:bb:cc:dd:ee:ff",
    });
    for _ in 0..2 {
        let (_, body) = post_admission(&app, request.clone()).await;
        assert_eq!(body["status"], "granted");
    }

    let (status, body) = post_admission(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "denied");
    assert_eq!(body["reason"], "daily-limit");
    assert!(body.get("retry_after_seconds").is_none());
}

#[tokio::test]
async fn privileged_identity_is_never_rate_limited() {
    let (app, store) = test_app(SessionConfig::default());
    store.add_privileged("admin@example.edu");

    let request = json!({
        "token": "token:admin@example.edu",
        "device_address": "aa:bb:cc:dd:ee:ff",
    });
    for _ in 0..4 {
        let (status, body) = post_admission(&app, request.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "granted");
        assert_eq!(body["role"], "admin");
    }
}

#[tokio::test]
async fn invalid_token_maps_to_unauthorized() {
    let (app, _store) = test_app(SessionConfig::default());

    let (status, body) = post_admission(&app, json!({ "token": "garbage" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "INVALID_IDENTITY");
}

#[tokio::test]
async fn empty_token_maps_to_validation_error() {
    let (app, _store) = test_app(SessionConfig::default());

    let (status, body) = post_admission(&app, json!({ "token": "  " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn admin_grant_listing_merges_streams_newest_first() {
    let session = SessionConfig {
        cooldown_minutes: 0,
        ..SessionConfig::default()
    };
    let (app, store) = test_app(session);
    store.add_privileged("admin@example.edu");

    post_admission(
        &app,
        json!({ "token": "token:guest@example.edu", "device_address": "aa:bb:cc:dd:ee:ff" }),
    )
    .await;
    post_admission(
        &app,
        json!({ "token": "token:admin@example.edu", "device_address": "11:22:33:44:55:66" }),
    )
    .await;

    let (status, body) = get_json(&app, "/api/admin/grants").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first: the admin grant happened second.
    assert_eq!(rows[0]["email"], "admin@example.edu");
    assert_eq!(rows[0]["role"], "admin");
    assert_eq!(rows[0]["active"], true);
    assert_eq!(rows[1]["email"], "guest@example.edu");
    assert_eq!(rows[1]["role"], "standard");
}

#[tokio::test]
async fn health_check_reports_ok() {
    let (app, _store) = test_app(SessionConfig::default());

    let (status, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
