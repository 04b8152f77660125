//! Login, refresh, and logout orchestration for keygate.
//!
//! This crate ties the stateless token issuer to the refresh-token store.
//! The service itself is stateless: key material lives in `keygate-auth`,
//! refresh-token state lives in the external store, and any number of
//! replicas can serve the same sessions concurrently.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Gateway (HTTP)                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       AuthService                           │
//! │  ┌─────────────┐ ┌──────────────┐ ┌─────────────────────┐  │
//! │  │  Identity   │ │   Access     │ │   Refresh token     │  │
//! │  │  predicate  │ │   issuance   │ │   lifecycle         │  │
//! │  └─────────────┘ └──────────────┘ └─────────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                        │
//!                 ▼                        ▼
//!          ┌──────────────┐        ┌──────────────┐
//!          │ TokenIssuer  │        │  Store       │
//!          │ (Ed25519)    │        │  (Redis)     │
//!          └──────────────┘        └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use keygate_auth::{SigningKeyPair, TokenIssuer};
//! use keygate_session::{AuthFlow, AuthService, SessionConfig, StaticIdentityVerifier};
//! use keygate_store::{RedisStore, RefreshTokenStore, DEFAULT_REFRESH_TTL};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let keys = Arc::new(SigningKeyPair::generate()?);
//! let kv = Arc::new(RedisStore::connect("redis://127.0.0.1/").await?);
//!
//! let service = AuthService::new(
//!     StaticIdentityVerifier::default(),
//!     TokenIssuer::new(Arc::clone(&keys)),
//!     RefreshTokenStore::new(kv, DEFAULT_REFRESH_TTL),
//!     SessionConfig::default(),
//! );
//!
//! let pair = service.login("admin", "password").await?;
//! let renewed = service.refresh(&pair.refresh_token).await?;
//! service.logout(&renewed.refresh_token).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod identity;
pub mod service;
pub mod types;

pub use error::{Result, SessionError};
pub use identity::{IdentityVerifier, StaticIdentityVerifier};
pub use service::{AuthFlow, AuthService};
pub use types::{SessionConfig, TokenPair};

// Re-export commonly used types from dependencies for convenience
pub use keygate_core::{RefreshToken, Subject};
