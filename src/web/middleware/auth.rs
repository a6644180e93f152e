//! Bearer token authentication middleware.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{AuthState, Identity};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;

/// Run the authentication gate for every request.
///
/// The resulting [`AuthState`] is stored in the request extensions. The
/// middleware never rejects; handlers pick an extractor to decide.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let raw_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mut auth_state = request
        .extensions_mut()
        .remove::<AuthState>()
        .unwrap_or_default();
    state
        .gate
        .apply(&mut auth_state, raw_header.as_deref())
        .await;

    request.extensions_mut().insert(auth_state);
    next.run(request).await
}

fn auth_state(parts: &Parts) -> Option<&Identity> {
    parts
        .extensions
        .get::<AuthState>()
        .and_then(AuthState::identity)
}

/// Extractor for handlers that require an authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        auth_state(parts)
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}

/// Optional identity extractor.
///
/// Mutation handlers use this so the service layer decides the order of
/// authentication, existence and ownership checks.
#[derive(Debug, Clone)]
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    /// Borrow the identity, if any.
    pub fn as_ref(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MaybeIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(auth_state(parts).cloned()))
    }
}
