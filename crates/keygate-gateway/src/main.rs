//! Keygate Gateway - token issuance and refresh lifecycle service
//!
//! This is the main entry point for the gateway service. It wires the
//! signing key material, the refresh-token store, and the session service
//! into the HTTP router.
//!
//! # Dev Mode
//!
//! Build with `--features dev-mode` to swap Redis for an in-process store,
//! so the service runs with no external dependencies. Refresh tokens then
//! die with the process.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use keygate_auth::{SigningKeyPair, TokenIssuer, TokenVerifier};
use keygate_gateway::{create_router, GatewayConfig, GatewayState};
use keygate_session::{AuthService, SessionConfig, StaticIdentityVerifier};
#[cfg(feature = "dev-mode")]
use keygate_store::MemoryStore;
#[cfg(not(feature = "dev-mode"))]
use keygate_store::RedisStore;
use keygate_store::{RefreshTokenStore, DEFAULT_REFRESH_TTL};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,keygate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Keygate Gateway");

    // Load configuration from environment
    let listen_addr = std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into());
    let redis_url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1/".into());
    let access_ttl_seconds = env_u64("ACCESS_TTL_SECONDS", 300);
    let refresh_ttl =
        Duration::from_secs(env_u64("REFRESH_TTL_SECONDS", DEFAULT_REFRESH_TTL.as_secs()));
    let rotate_refresh_on_use = std::env::var("ROTATE_REFRESH_ON_USE")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);
    let login_username = std::env::var("LOGIN_USERNAME").unwrap_or_else(|_| "admin".into());
    let login_password = std::env::var("LOGIN_PASSWORD").unwrap_or_else(|_| "password".into());

    tracing::info!(
        listen_addr = %listen_addr,
        redis_url = %redis_url,
        access_ttl_seconds,
        refresh_ttl_seconds = refresh_ttl.as_secs(),
        rotate_refresh_on_use,
        "Gateway configuration loaded"
    );

    // Generate the process key pair. Failure here is fatal: a process
    // that cannot sign or verify must not accept traffic.
    let keys = Arc::new(SigningKeyPair::generate()?);
    tracing::info!(kid = %keys.kid(), "Signing key material ready");

    // Initialize the refresh-token store backend
    #[cfg(feature = "dev-mode")]
    let kv = {
        tracing::warn!("DEV MODE ENABLED - refresh tokens stored in process memory");
        Arc::new(MemoryStore::new())
    };

    #[cfg(not(feature = "dev-mode"))]
    let kv = Arc::new(RedisStore::connect(&redis_url).await?);

    // Assemble the session service
    let session_config = SessionConfig {
        access_ttl_seconds,
        role: std::env::var("ACCESS_ROLE").unwrap_or_else(|_| "ADMIN".into()),
        rotate_refresh_on_use,
    };
    let flow = Arc::new(AuthService::new(
        StaticIdentityVerifier::new(login_username, login_password),
        TokenIssuer::new(Arc::clone(&keys)),
        RefreshTokenStore::new(kv, refresh_ttl),
        session_config,
    ));
    tracing::info!("Session service initialized");

    // Build gateway state and configuration
    let verifier = Arc::new(TokenVerifier::for_key_pair(&keys));
    let gateway_config = GatewayConfig {
        listen_addr: listen_addr.clone(),
        ..GatewayConfig::default()
    };
    let state = GatewayState::new(flow, verifier, keys.jwk_set(), gateway_config);

    // Create the full router with all API endpoints
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
