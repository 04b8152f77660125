//! End-to-end tests for the gateway API: login, refresh, logout, the
//! protected-route gate, and store-outage behavior.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{json, Value};

use keygate_auth::{JwkSet, SigningKeyPair, TokenIssuer, TokenVerifier};
use keygate_gateway::{create_router, GatewayConfig, GatewayState};
use keygate_session::{AuthService, SessionConfig, StaticIdentityVerifier};
use keygate_store::{KeyValueStore, MemoryStore, RefreshTokenStore, StoreError};

/// A gateway instance over an in-memory store, plus an issuer sharing the
/// same key pair for crafting tokens directly.
struct TestApp {
    server: TestServer,
    issuer: TokenIssuer,
}

fn test_app_with<S>(kv: Arc<S>, session_config: SessionConfig) -> TestApp
where
    S: KeyValueStore + 'static,
{
    let keys = Arc::new(SigningKeyPair::generate().unwrap());
    let issuer = TokenIssuer::new(Arc::clone(&keys));

    let flow = Arc::new(AuthService::new(
        StaticIdentityVerifier::default(),
        issuer.clone(),
        RefreshTokenStore::new(kv, Duration::from_secs(60)),
        session_config,
    ));
    let verifier = Arc::new(TokenVerifier::for_key_pair(&keys));

    let state = GatewayState::new(flow, verifier, keys.jwk_set(), GatewayConfig::default());
    let server = TestServer::new(create_router(state)).unwrap();

    TestApp { server, issuer }
}

fn test_app() -> TestApp {
    test_app_with(Arc::new(MemoryStore::new()), SessionConfig::default())
}

fn bearer(token: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}

async fn login(server: &TestServer) -> Value {
    let response = server
        .post("/auth/login")
        .json(&json!({"username": "admin", "password": "password"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    response.json::<Value>()
}

#[tokio::test]
async fn login_returns_credential_pair() {
    let app = test_app();

    let body = login(&app.server).await;
    let access = body["access_token"].as_str().unwrap();
    let refresh = body["refresh_token"].as_str().unwrap();

    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app();

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({"username": "admin", "password": "wrong"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn login_with_unknown_user_is_indistinguishable() {
    let app = test_app();

    let wrong_password = app
        .server
        .post("/auth/login")
        .json(&json!({"username": "admin", "password": "nope"}))
        .await;
    let unknown_user = app
        .server
        .post("/auth/login")
        .json(&json!({"username": "nobody", "password": "password"}))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<Value>()["error"],
        unknown_user.json::<Value>()["error"]
    );
}

#[tokio::test]
async fn protected_route_accepts_valid_token() {
    let app = test_app();

    let body = login(&app.server).await;
    let access = body["access_token"].as_str().unwrap();

    let (name, value) = bearer(access);
    let response = app
        .server
        .get("/user/profile")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["message"], "Welcome admin");
}

#[tokio::test]
async fn protected_route_without_token_is_rejected() {
    let app = test_app();

    let response = app.server.get("/user/profile").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_malformed_header_is_rejected() {
    let app = test_app();

    let response = app
        .server
        .get("/user/profile")
        .add_header(
            HeaderName::from_static("authorization"),
            HeaderValue::from_static("Basic abc123"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_expired_token_is_rejected() {
    let app = test_app();

    // A zero-TTL token is expired from the moment it is minted.
    let expired = app
        .issuer
        .issue(
            &"admin".parse().unwrap(),
            &std::collections::BTreeMap::new(),
            Duration::ZERO,
        )
        .unwrap();

    let (name, value) = bearer(&expired);
    let response = app
        .server
        .get("/user/profile")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_route_with_tampered_token_is_rejected() {
    let app = test_app();

    let body = login(&app.server).await;
    let mut access = body["access_token"].as_str().unwrap().to_string();
    let last = access.pop().unwrap();
    access.push(if last == 'A' { 'B' } else { 'A' });

    let (name, value) = bearer(&access);
    let response = app
        .server
        .get("/user/profile")
        .add_header(name, value)
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_echoes_same_refresh_token() {
    let app = test_app();

    let body = login(&app.server).await;
    let refresh = body["refresh_token"].as_str().unwrap();

    let response = app
        .server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let renewed = response.json::<Value>();
    assert_eq!(renewed["refresh_token"].as_str().unwrap(), refresh);
    assert!(!renewed["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn refresh_with_unknown_token_is_unauthorized() {
    let app = test_app();

    let response = app
        .server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": "never-issued"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_after_logout_is_unauthorized() {
    let app = test_app();

    let body = login(&app.server).await;
    let refresh = body["refresh_token"].as_str().unwrap();

    let logout = app
        .server
        .post("/auth/logout")
        .json(&json!({"refresh_token": refresh}))
        .await;
    assert_eq!(logout.status_code(), StatusCode::OK);

    let response = app
        .server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_is_idempotent_and_unprobeable() {
    let app = test_app();

    let body = login(&app.server).await;
    let refresh = body["refresh_token"].as_str().unwrap();

    for token in [refresh, "never-issued"] {
        for _ in 0..2 {
            let response = app
                .server
                .post("/auth/logout")
                .json(&json!({"refresh_token": token}))
                .await;
            assert_eq!(response.status_code(), StatusCode::OK);
            assert_eq!(
                response.json::<Value>()["message"],
                "Logged out successfully"
            );
        }
    }
}

#[tokio::test]
async fn access_token_outlives_logout() {
    let app = test_app();

    let body = login(&app.server).await;
    let access = body["access_token"].as_str().unwrap().to_string();
    let refresh = body["refresh_token"].as_str().unwrap();

    app.server
        .post("/auth/logout")
        .json(&json!({"refresh_token": refresh}))
        .await;

    // Logout revokes the refresh token only; the signed access token
    // stays valid until its own expiry.
    let (name, value) = bearer(&access);
    let response = app
        .server
        .get("/user/profile")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn rotation_returns_fresh_refresh_token() {
    let config = SessionConfig {
        rotate_refresh_on_use: true,
        ..SessionConfig::default()
    };
    let app = test_app_with(Arc::new(MemoryStore::new()), config);

    let body = login(&app.server).await;
    let refresh = body["refresh_token"].as_str().unwrap();

    let response = app
        .server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": refresh}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_ne!(response.json::<Value>()["refresh_token"].as_str().unwrap(), refresh);
}

#[tokio::test]
async fn jwks_endpoint_supports_decentralized_verification() {
    let app = test_app();

    let response = app.server.get("/.well-known/jwks.json").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let jwks = response.json::<JwkSet>();
    assert_eq!(jwks.keys.len(), 1);
    assert_eq!(jwks.keys[0].kty, "OKP");
    assert_eq!(jwks.keys[0].alg, "EdDSA");

    // A verifier built from the published key alone accepts real tokens.
    let verifier = TokenVerifier::from_jwk(&jwks.keys[0]).unwrap();
    let body = login(&app.server).await;
    let verified = verifier
        .verify(body["access_token"].as_str().unwrap())
        .unwrap();
    assert_eq!(verified.subject.as_str(), "admin");
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app();

    let response = app.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "healthy");
}

/// A store that fails every operation, simulating a Redis outage.
struct UnreachableKv;

#[async_trait]
impl KeyValueStore for UnreachableKv {
    async fn put_if_absent(
        &self,
        _: &str,
        _: &str,
        _: Duration,
    ) -> keygate_store::Result<bool> {
        Err(StoreError::Unavailable("connection timed out".into()))
    }

    async fn get(&self, _: &str) -> keygate_store::Result<Option<String>> {
        Err(StoreError::Unavailable("connection timed out".into()))
    }

    async fn delete(&self, _: &str) -> keygate_store::Result<()> {
        Err(StoreError::Unavailable("connection timed out".into()))
    }
}

#[tokio::test]
async fn store_outage_is_503_not_401() {
    let app = test_app_with(Arc::new(UnreachableKv), SessionConfig::default());

    let refresh = app
        .server
        .post("/auth/refresh")
        .json(&json!({"refresh_token": "whatever"}))
        .await;
    assert_eq!(refresh.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let logout = app
        .server
        .post("/auth/logout")
        .json(&json!({"refresh_token": "whatever"}))
        .await;
    assert_eq!(logout.status_code(), StatusCode::SERVICE_UNAVAILABLE);

    let login = app
        .server
        .post("/auth/login")
        .json(&json!({"username": "admin", "password": "password"}))
        .await;
    assert_eq!(login.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn store_outage_does_not_affect_protected_routes() {
    // The gate does no store lookups, so a valid access token keeps
    // working even while the refresh-token store is down.
    let app = test_app_with(Arc::new(UnreachableKv), SessionConfig::default());

    let access = app
        .issuer
        .issue(
            &"admin".parse().unwrap(),
            &std::collections::BTreeMap::from([("role".to_string(), "ADMIN".to_string())]),
            Duration::from_secs(60),
        )
        .unwrap();

    let (name, value) = bearer(&access);
    let response = app
        .server
        .get("/user/profile")
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}
