//! Access token issuance and verification.
//!
//! Issuance signs a claim set with the private half of the process key
//! pair; verification checks the signature and timestamps against the
//! public half. Verification is pure — no I/O, no store access — which is
//! what keeps per-request authentication O(1).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::time::Duration;

use base64::prelude::*;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use keygate_core::Subject;

use crate::error::{AuthError, Result};
use crate::keys::{Jwk, SigningKeyPair};

/// Claim names written by the issuer itself; caller-supplied claims may
/// not collide with these.
const REGISTERED_CLAIMS: [&str; 3] = ["sub", "iat", "exp"];

/// Raw claim set as serialized into the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct RawClaims {
    /// Subject (the authenticated principal).
    sub: String,
    /// Issued-at, seconds since the Unix epoch.
    iat: u64,
    /// Expiry, seconds since the Unix epoch.
    exp: u64,
    /// Caller-supplied string claims (e.g. `role`).
    #[serde(flatten)]
    extra: BTreeMap<String, String>,
}

/// Validated claims extracted from a verified access token.
#[derive(Debug, Clone)]
pub struct VerifiedClaims {
    /// The authenticated principal from the `sub` claim.
    pub subject: Subject,
    /// The caller-supplied claims carried alongside the registered ones.
    pub claims: BTreeMap<String, String>,
    /// When the token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the token expires.
    pub expires_at: DateTime<Utc>,
}

/// Signs claim sets into access tokens.
///
/// Stateless per call: safe to share and invoke concurrently without
/// synchronization.
#[derive(Clone)]
pub struct TokenIssuer {
    keys: Arc<SigningKeyPair>,
}

impl TokenIssuer {
    /// Create an issuer over the given key pair.
    #[must_use]
    pub fn new(keys: Arc<SigningKeyPair>) -> Self {
        Self { keys }
    }

    /// The key pair backing this issuer.
    #[must_use]
    pub fn keys(&self) -> &SigningKeyPair {
        &self.keys
    }

    /// Issue a signed access token for `subject`, valid for `ttl` from now.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ReservedClaim` if `claims` collides with a
    /// registered claim name, or `AuthError::Signing` if encoding fails.
    pub fn issue(
        &self,
        subject: &Subject,
        claims: &BTreeMap<String, String>,
        ttl: Duration,
    ) -> Result<String> {
        let iat = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
        let exp = iat.saturating_add(ttl.as_secs());
        self.issue_at(subject, claims, iat, exp)
    }

    /// Issue with explicit timestamps. Split out so tests can mint
    /// not-yet-valid and already-expired tokens without sleeping.
    fn issue_at(
        &self,
        subject: &Subject,
        claims: &BTreeMap<String, String>,
        iat: u64,
        exp: u64,
    ) -> Result<String> {
        for name in REGISTERED_CLAIMS {
            if claims.contains_key(name) {
                return Err(AuthError::ReservedClaim(name.to_string()));
            }
        }

        let raw = RawClaims {
            sub: subject.as_str().to_string(),
            iat,
            exp,
            extra: claims.clone(),
        };

        let mut header = Header::new(Algorithm::EdDSA);
        header.kid = Some(self.keys.kid().to_string());

        encode(&header, &raw, self.keys.encoding_key())
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}

/// Verifies access tokens against known public keys.
///
/// Keyed by `kid` so additional key epochs can coexist during a future
/// rotation without changing callers.
pub struct TokenVerifier {
    keys: HashMap<String, DecodingKey>,
}

impl TokenVerifier {
    /// Build a verifier for a locally held key pair.
    #[must_use]
    pub fn for_key_pair(pair: &SigningKeyPair) -> Self {
        let mut keys = HashMap::new();
        keys.insert(pair.kid().to_string(), pair.decoding_key().clone());
        Self { keys }
    }

    /// Build a verifier from a published JWK, for services that verify
    /// tokens without holding the private half.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UnsupportedKey` for anything other than an
    /// Ed25519 signing key, or `AuthError::InvalidToken` if the public
    /// key bytes do not decode.
    pub fn from_jwk(jwk: &Jwk) -> Result<Self> {
        if jwk.kty != "OKP" || jwk.crv != "Ed25519" {
            return Err(AuthError::UnsupportedKey(format!(
                "{}/{}",
                jwk.kty, jwk.crv
            )));
        }

        let public_key = BASE64_URL_SAFE_NO_PAD
            .decode(&jwk.x)
            .map_err(|e| AuthError::InvalidToken(format!("invalid base64: {e}")))?;

        let mut keys = HashMap::new();
        keys.insert(jwk.kid.clone(), DecodingKey::from_ed_der(&public_key));
        Ok(Self { keys })
    }

    /// Verify a token and extract its claims.
    ///
    /// Checks, in order: header well-formedness and `kid`, signature,
    /// and `iat <= now < exp` with zero leeway.
    ///
    /// # Errors
    ///
    /// Returns an `AuthError` describing the first check that failed.
    /// All variants map to the same 401 at the HTTP edge.
    pub fn verify(&self, token: &str) -> Result<VerifiedClaims> {
        let header = decode_header(token).map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        let kid = header
            .kid
            .ok_or_else(|| AuthError::MissingClaim("kid".to_string()))?;

        let key = self
            .keys
            .get(&kid)
            .ok_or_else(|| AuthError::KeyNotFound(kid.clone()))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.validate_aud = false;
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<RawClaims>(token, key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::InvalidToken(e.to_string()),
            })?;

        let claims = token_data.claims;
        let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);

        // jsonwebtoken treats exp == now as live; the contract here is
        // iat <= now < exp, so re-check both bounds explicitly.
        if now >= claims.exp {
            return Err(AuthError::TokenExpired);
        }
        if claims.iat > now {
            return Err(AuthError::TokenNotYetValid);
        }

        let subject: Subject = claims.sub.parse().map_err(|_| AuthError::InvalidSubject)?;

        let issued_at = timestamp(claims.iat)?;
        let expires_at = timestamp(claims.exp)?;

        Ok(VerifiedClaims {
            subject,
            claims: claims.extra,
            issued_at,
            expires_at,
        })
    }
}

fn timestamp(secs: u64) -> Result<DateTime<Utc>> {
    let secs = i64::try_from(secs).unwrap_or(i64::MAX);
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| AuthError::InvalidToken("timestamp out of range".to_string()))
}
