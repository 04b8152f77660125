//! Signing key material.
//!
//! This module owns the process's asymmetric key pair. The private half
//! signs access tokens and never leaves this struct; the public half is
//! exported as a JWK so downstream services can verify tokens without
//! talking to this process.

use base64::prelude::*;
use ed25519_dalek::SigningKey;
use jsonwebtoken::{DecodingKey, EncodingKey};
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::{AuthError, Result};

/// PKCS#8 v1 DER prefix for an Ed25519 private key (RFC 8410).
///
/// `jsonwebtoken` wants the private key as PKCS#8 DER; prepending this
/// fixed header to the 32 raw key bytes produces exactly that.
const PKCS8_ED25519_PREFIX: [u8; 16] = [
    0x30, 0x2e, // SEQUENCE, 46 bytes
    0x02, 0x01, 0x00, // INTEGER version 0
    0x30, 0x05, // SEQUENCE, 5 bytes (algorithm identifier)
    0x06, 0x03, 0x2b, 0x65, 0x70, // OID 1.3.101.112 (Ed25519)
    0x04, 0x22, // OCTET STRING, 34 bytes
    0x04, 0x20, // OCTET STRING, 32 bytes (the raw key)
];

/// A single JWK (JSON Web Key) as published to verifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type ("OKP" for Ed25519).
    pub kty: String,
    /// Curve ("Ed25519").
    pub crv: String,
    /// Public key, base64url encoded without padding.
    pub x: String,
    /// Key ID, echoed in every token header.
    pub kid: String,
    /// Key use ("sig").
    #[serde(rename = "use")]
    pub key_use: String,
    /// Signing algorithm ("EdDSA").
    pub alg: String,
}

/// A JWK set, the body of the published key-set endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwkSet {
    /// The list of keys.
    pub keys: Vec<Jwk>,
}

/// The process-lifetime Ed25519 signing key pair.
///
/// Generated once at startup and immutable afterwards, so it can be shared
/// behind an `Arc` across any number of concurrent issuance and
/// verification calls without locking.
pub struct SigningKeyPair {
    kid: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
    public_key: [u8; 32],
}

impl SigningKeyPair {
    /// Generate a fresh key pair from the OS secure-random source.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::KeyGeneration` if the entropy source cannot be
    /// read. Callers at startup must treat this as fatal: a process that
    /// cannot sign or verify must not serve traffic.
    pub fn generate() -> Result<Self> {
        let mut secret = Zeroizing::new([0u8; 32]);
        OsRng
            .try_fill_bytes(secret.as_mut_slice())
            .map_err(|e| AuthError::KeyGeneration(e.to_string()))?;

        let signing_key = SigningKey::from_bytes(&secret);
        let public_key = signing_key.verifying_key().to_bytes();

        let mut pkcs8_der = Zeroizing::new(Vec::with_capacity(48));
        pkcs8_der.extend_from_slice(&PKCS8_ED25519_PREFIX);
        pkcs8_der.extend_from_slice(secret.as_ref());

        let kid = uuid::Uuid::new_v4().to_string();
        tracing::info!(kid = %kid, "Generated signing key pair");

        Ok(Self {
            kid,
            encoding: EncodingKey::from_ed_der(&pkcs8_der),
            decoding: DecodingKey::from_ed_der(&public_key),
            public_key,
        })
    }

    /// The key identifier embedded in every token header.
    #[must_use]
    pub fn kid(&self) -> &str {
        &self.kid
    }

    /// The signing half, for the token issuer.
    #[must_use]
    pub const fn encoding_key(&self) -> &EncodingKey {
        &self.encoding
    }

    /// The verification half, for local verifiers.
    #[must_use]
    pub const fn decoding_key(&self) -> &DecodingKey {
        &self.decoding
    }

    /// The raw 32-byte public key.
    #[must_use]
    pub const fn public_key_bytes(&self) -> &[u8; 32] {
        &self.public_key
    }

    /// Export the verification half as a JWK.
    #[must_use]
    pub fn public_jwk(&self) -> Jwk {
        Jwk {
            kty: "OKP".to_string(),
            crv: "Ed25519".to_string(),
            x: BASE64_URL_SAFE_NO_PAD.encode(self.public_key),
            kid: self.kid.clone(),
            key_use: "sig".to_string(),
            alg: "EdDSA".to_string(),
        }
    }

    /// Export the verification half as a single-key JWK set.
    #[must_use]
    pub fn jwk_set(&self) -> JwkSet {
        JwkSet {
            keys: vec![self.public_jwk()],
        }
    }
}

impl std::fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Private half intentionally omitted.
        f.debug_struct("SigningKeyPair")
            .field("kid", &self.kid)
            .finish_non_exhaustive()
    }
}
