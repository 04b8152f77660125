//! Token issuance and verification for keygate.
//!
//! This crate provides the stateless half of the credential lifecycle:
//!
//! - Ed25519 (`EdDSA`) key-pair generation and JWK export
//! - Access-token signing with registered + caller-supplied claims
//! - Pure, in-memory token verification keyed by `kid`
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   Gateway        │────▶│  TokenVerifier   │
//! │   (HTTP)         │     │  (public half)   │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//! ┌──────────────────┐     ┌────────▼─────────┐
//! │   AuthService    │────▶│  SigningKeyPair  │
//! │   (login/refresh)│     │  (owned, Arc'd)  │
//! └────────┬─────────┘     └──────────────────┘
//!          │
//! ┌────────▼─────────┐
//! │   TokenIssuer    │
//! │   (private half) │
//! └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use std::sync::Arc;
//! use std::time::Duration;
//! use keygate_auth::{SigningKeyPair, TokenIssuer, TokenVerifier};
//!
//! # fn example() -> keygate_auth::Result<()> {
//! let keys = Arc::new(SigningKeyPair::generate()?);
//! let issuer = TokenIssuer::new(Arc::clone(&keys));
//! let verifier = TokenVerifier::for_key_pair(&keys);
//!
//! let subject = "admin".parse().expect("valid subject");
//! let claims = BTreeMap::from([("role".to_string(), "ADMIN".to_string())]);
//!
//! let token = issuer.issue(&subject, &claims, Duration::from_secs(300))?;
//! let verified = verifier.verify(&token)?;
//! assert_eq!(verified.subject, subject);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod jwt;
pub mod keys;

pub use error::{AuthError, Result};
pub use jwt::{TokenIssuer, TokenVerifier, VerifiedClaims};
pub use keys::{Jwk, JwkSet, SigningKeyPair};
