//! Board handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::board::{BoardService, NewBoard, NewPost, PostService};
use crate::web::dto::{
    ApiResponse, BoardResponse, CreateBoardRequest, CreatePostRequest, ListBoardsQuery,
    ListPostsQuery, PaginatedResponse, PostDetailResponse, PostResponse, ValidatedJson,
};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::MaybeIdentity;

/// GET /api/boards - List boards.
pub async fn list_boards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListBoardsQuery>,
) -> Result<Json<PaginatedResponse<BoardResponse>>, ApiError> {
    let result = BoardService::new(&state.db)
        .list_boards(query.keyword.as_deref(), query.pagination())
        .await?;

    Ok(Json(PaginatedResponse::from_result(result, BoardResponse::from)))
}

/// POST /api/boards - Create a board (admin only).
pub async fn create_board(
    State(state): State<Arc<AppState>>,
    identity: MaybeIdentity,
    ValidatedJson(req): ValidatedJson<CreateBoardRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BoardResponse>>), ApiError> {
    let new_board = NewBoard::new(req.name.trim()).with_description(req.description);
    let board = BoardService::new(&state.db)
        .create_board(identity.as_ref(), new_board)
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(board.into()))))
}

/// GET /api/boards/:id/posts - List active posts in a board.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<i64>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<PaginatedResponse<PostDetailResponse>>, ApiError> {
    let sort = query.sort()?;
    let result = PostService::new(&state.db)
        .list_posts(board_id, sort, query.pagination())
        .await?;

    Ok(Json(PaginatedResponse::from_result(
        result,
        PostDetailResponse::from,
    )))
}

/// POST /api/boards/:id/posts - Create a post.
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Path(board_id): Path<i64>,
    identity: MaybeIdentity,
    ValidatedJson(req): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), ApiError> {
    let post = PostService::new(&state.db)
        .create_post(board_id, identity.as_ref(), NewPost::new(req.title, req.body))
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(post.into()))))
}
