//! Post and comment handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::{CommentService, NewComment, PostPatch, PostService};
use crate::web::dto::{
    ApiResponse, CommentResponse, CreateCommentRequest, PostDetailResponse, PostResponse,
    UpdatePostRequest, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::MaybeIdentity;

/// GET /api/posts/:id - Get an active post.
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<PostDetailResponse>>, ApiError> {
    let view = PostService::new(&state.db).get_post(post_id).await?;
    Ok(Json(ApiResponse::new(view.into())))
}

/// PATCH /api/posts/:id - Edit a post (owner or admin).
pub async fn update_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    identity: MaybeIdentity,
    ValidatedJson(req): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<PostResponse>>, ApiError> {
    let patch = PostPatch {
        title: req.title,
        body: req.body,
    };
    let post = PostService::new(&state.db)
        .edit_post(post_id, identity.as_ref(), patch)
        .await?;

    Ok(Json(ApiResponse::new(post.into())))
}

/// DELETE /api/posts/:id - Soft-delete a post (owner or admin).
pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    identity: MaybeIdentity,
) -> Result<StatusCode, ApiError> {
    PostService::new(&state.db)
        .delete_post(post_id, identity.as_ref())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/posts/:id/comments - Comment on an active post.
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<i64>,
    identity: MaybeIdentity,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), ApiError> {
    let comment = CommentService::new(&state.db)
        .add_comment(post_id, identity.as_ref(), NewComment::new(req.body))
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(comment.into()))))
}
