//! The injected identity-check capability.
//!
//! The session service depends only on the [`IdentityVerifier`] trait, so
//! a real user directory can replace the static check without touching any
//! token logic.

use async_trait::async_trait;

use keygate_core::Subject;

/// Verifies login credentials and resolves them to a subject.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Check a username/password pair.
    ///
    /// Returns the authenticated subject on success, `None` on rejection.
    /// Implementations must not distinguish "unknown user" from "wrong
    /// password" in their return value.
    async fn check(&self, username: &str, password: &str) -> Option<Subject>;
}

/// A single hardcoded credential pair.
///
/// Stand-in for a real identity directory; suitable for demos and tests
/// only.
pub struct StaticIdentityVerifier {
    username: String,
    password: String,
}

impl StaticIdentityVerifier {
    /// Create a verifier accepting exactly this credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl Default for StaticIdentityVerifier {
    fn default() -> Self {
        Self::new("admin", "password")
    }
}

#[async_trait]
impl IdentityVerifier for StaticIdentityVerifier {
    async fn check(&self, username: &str, password: &str) -> Option<Subject> {
        if username != self.username || password != self.password {
            return None;
        }
        username.parse().ok()
    }
}
