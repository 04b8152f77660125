//! HTTP gateway for the keygate authentication service.
//!
//! This crate provides the public-facing API for the token lifecycle. It
//! handles:
//!
//! - Login, refresh, and logout endpoints
//! - Inline bearer-token verification on protected routes
//! - Publication of the verification key set
//! - Request tracing, CORS, body limits, and timeouts
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     keygate-gateway                         │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐   │
//! │  │   AuthUser  │ │   Router    │ │    JWK set          │   │
//! │  │  Extractor  │ │  + Handlers │ │    endpoint         │   │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               ┌──────────────┼──────────────┐
//!               ▼              ▼              ▼
//!        ┌──────────┐   ┌──────────┐   ┌──────────┐
//!        │ Session  │   │  Auth    │   │  Store   │
//!        │ Service  │   │ (JWT)    │   │ (Redis)  │
//!        └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use keygate_auth::{SigningKeyPair, TokenIssuer, TokenVerifier};
//! use keygate_gateway::{create_router, GatewayConfig, GatewayState};
//! use keygate_session::{AuthService, SessionConfig, StaticIdentityVerifier};
//! use keygate_store::{RedisStore, RefreshTokenStore, DEFAULT_REFRESH_TTL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Key material is fatal-on-failure and owned for the process lifetime
//! let keys = Arc::new(SigningKeyPair::generate()?);
//! let kv = Arc::new(RedisStore::connect("redis://127.0.0.1/").await?);
//!
//! let flow = Arc::new(AuthService::new(
//!     StaticIdentityVerifier::default(),
//!     TokenIssuer::new(Arc::clone(&keys)),
//!     RefreshTokenStore::new(kv, DEFAULT_REFRESH_TTL),
//!     SessionConfig::default(),
//! ));
//! let verifier = Arc::new(TokenVerifier::for_key_pair(&keys));
//!
//! let state = GatewayState::new(flow, verifier, keys.jwk_set(), GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::GatewayState;

// Re-export key types for convenience
pub use auth::AuthUser;
