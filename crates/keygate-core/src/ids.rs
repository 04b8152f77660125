//! Core identifier types for keygate.
//!
//! This module provides strongly-typed values for authenticated principals
//! and refresh credentials. Both are string-shaped on the wire but carry
//! different invariants, so they get distinct types.

use base64::prelude::*;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum accepted length of a subject identifier, in bytes.
pub const MAX_SUBJECT_LEN: usize = 255;

/// Number of random bytes backing a freshly generated refresh token.
///
/// 32 bytes gives 256 bits of entropy, comfortably above the 128-bit
/// floor required for collision resistance across all live sessions.
pub const REFRESH_TOKEN_BYTES: usize = 32;

/// An authenticated principal, as carried in the `sub` claim.
///
/// Subjects come from the identity verifier at login and from verified
/// access tokens afterwards.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Subject(String);

impl Subject {
    /// View the subject as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Subject {
    type Err = IdError;

    /// Parse a `Subject`, rejecting empty, oversized, or non-printable input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::EmptySubject);
        }
        if s.len() > MAX_SUBJECT_LEN {
            return Err(IdError::SubjectTooLong {
                max: MAX_SUBJECT_LEN,
                got: s.len(),
            });
        }
        if s.chars().any(char::is_control) {
            return Err(IdError::InvalidSubject);
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subject({})", self.0)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Subject {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Subject> for String {
    fn from(subject: Subject) -> Self {
        subject.0
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// An opaque refresh credential.
///
/// The token string has no embedded structure; its only property is
/// unguessability. Callers must not parse it, and inbound values are
/// accepted verbatim so that revoking an unknown token stays a no-op
/// rather than a validation error.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RefreshToken(String);

impl RefreshToken {
    /// Generate a new refresh token from the OS secure-random source.
    ///
    /// # Errors
    ///
    /// Returns `IdError::EntropyUnavailable` if the OS random source
    /// cannot be read.
    pub fn generate() -> Result<Self, IdError> {
        let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| IdError::EntropyUnavailable)?;
        Ok(Self(BASE64_URL_SAFE_NO_PAD.encode(bytes)))
    }

    /// View the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Debug intentionally redacts: refresh tokens are bearer secrets and must
// never end up in logs.
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefreshToken(..)")
    }
}

impl From<String> for RefreshToken {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RefreshToken {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<RefreshToken> for String {
    fn from(token: RefreshToken) -> Self {
        token.0
    }
}

impl AsRef<str> for RefreshToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing or generating identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The subject string is empty.
    #[error("subject must not be empty")]
    EmptySubject,

    /// The subject string exceeds the maximum length.
    #[error("subject too long: maximum {max} bytes, got {got}")]
    SubjectTooLong {
        /// The maximum number of bytes.
        max: usize,
        /// The actual number of bytes.
        got: usize,
    },

    /// The subject string contains control characters.
    #[error("subject contains invalid characters")]
    InvalidSubject,

    /// The OS secure-random source could not be read.
    #[error("secure random source unavailable")]
    EntropyUnavailable,
}
