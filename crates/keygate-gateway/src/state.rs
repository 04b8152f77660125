//! Gateway application state.
//!
//! This module defines the shared state that is available to all request
//! handlers.

use std::sync::Arc;

use keygate_auth::{JwkSet, TokenVerifier};
use keygate_session::AuthFlow;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
///
/// Holds the session flow, the pure token verifier, and the published JWK
/// set. Everything here is immutable after startup, so cloning is cheap
/// and handlers need no locks.
pub struct GatewayState<F>
where
    F: AuthFlow,
{
    /// The session flow for login/refresh/logout.
    pub flow: Arc<F>,
    /// The access-token verifier used by the request gate.
    pub verifier: Arc<TokenVerifier>,
    /// The published verification keys.
    pub jwks: JwkSet,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<F> GatewayState<F>
where
    F: AuthFlow,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(
        flow: Arc<F>,
        verifier: Arc<TokenVerifier>,
        jwks: JwkSet,
        config: GatewayConfig,
    ) -> Self {
        Self {
            flow,
            verifier,
            jwks,
            config,
        }
    }
}

impl<F> Clone for GatewayState<F>
where
    F: AuthFlow,
{
    fn clone(&self) -> Self {
        Self {
            flow: Arc::clone(&self.flow),
            verifier: Arc::clone(&self.verifier),
            jwks: self.jwks.clone(),
            config: self.config.clone(),
        }
    }
}
