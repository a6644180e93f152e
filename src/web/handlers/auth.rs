//! Authentication handlers.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::{self, IdentityDirectory, RegistrationRequest};
use crate::web::dto::{
    ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentIdentity;

/// POST /api/auth/register - Register a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    let request = RegistrationRequest::new(req.email, req.password, req.display_name)
        .with_confirm_password(req.confirm_password);
    let user = auth::register(&state.db, request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}

/// POST /api/auth/login - Exchange credentials for an access token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let (access_token, user) = auth::login(
        &state.db,
        &state.codec,
        &req.email,
        &req.password,
        state.token_ttl,
    )
    .await
    .map_err(|e| match e {
        crate::ForumError::Unauthorized => ApiError::unauthorized("Invalid email or password"),
        other => other.into(),
    })?;

    Ok(Json(ApiResponse::new(LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.token_ttl.as_secs(),
        user: user.into(),
    })))
}

/// GET /api/auth/me - The authenticated account.
pub async fn me(
    State(state): State<Arc<AppState>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state
        .directory
        .find_by_id(identity.id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Authentication required"))?;

    Ok(Json(ApiResponse::new(user.into())))
}
