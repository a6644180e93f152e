//! Per-request authentication.
//!
//! The gate turns an `Authorization` header into an optional [`Identity`].
//! It never rejects a request: every failure leaves the request
//! unauthenticated, and handlers that need an identity decide what to do.

use tracing::debug;

use crate::auth::{Identity, IdentityResolver, TokenCodec};

const BEARER_PREFIX: &str = "Bearer ";

/// Authentication state of a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    /// No valid identity was established.
    #[default]
    Unauthenticated,
    /// The request acts as this identity.
    Authenticated(Identity),
}

impl AuthState {
    /// The authenticated identity, if any.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            AuthState::Authenticated(identity) => Some(identity),
            AuthState::Unauthenticated => None,
        }
    }

    /// Check if an identity has been installed.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

impl From<Option<Identity>> for AuthState {
    fn from(identity: Option<Identity>) -> Self {
        identity.map_or(AuthState::Unauthenticated, AuthState::Authenticated)
    }
}

/// Verifies bearer tokens and resolves their subjects.
#[derive(Clone)]
pub struct AuthenticationGate {
    codec: TokenCodec,
    resolver: IdentityResolver,
}

impl AuthenticationGate {
    /// Create a gate.
    pub fn new(codec: TokenCodec, resolver: IdentityResolver) -> Self {
        Self { codec, resolver }
    }

    /// The codec this gate verifies with.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Establish the identity for a raw `Authorization` header value.
    ///
    /// Returns `None` for a missing header, a non-Bearer scheme, an empty,
    /// invalid or expired token, an unknown subject, or a directory failure.
    pub async fn authenticate(&self, raw_header: Option<&str>) -> Option<Identity> {
        let token = bearer_token(raw_header?)?;

        let subject = match self.codec.verify(token) {
            Ok(subject) => subject,
            Err(e) => {
                debug!("Bearer token rejected: {}", e);
                return None;
            }
        };

        match self.resolver.resolve(&subject).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!("Token subject could not be resolved: {}", e);
                None
            }
        }
    }

    /// Run authentication into `state` unless it is already authenticated.
    ///
    /// An installed identity is never replaced.
    pub async fn apply(&self, state: &mut AuthState, raw_header: Option<&str>) {
        if state.is_authenticated() {
            return;
        }
        *state = self.authenticate(raw_header).await.into();
    }
}

impl std::fmt::Debug for AuthenticationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate").finish_non_exhaustive()
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}
