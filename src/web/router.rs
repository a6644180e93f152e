//! Router configuration for Web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    add_comment, create_board, create_post, delete_post, get_post, list_boards, list_posts,
    login, me, register, update_post, AppState,
};
use super::middleware::{authenticate, create_cors_layer};

/// Create the application router.
///
/// The authentication gate runs for every route, including public ones.
pub fn create_router(app_state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/me", get(me));

    let board_routes = Router::new()
        .route("/", get(list_boards).post(create_board))
        .route("/:id/posts", get(list_posts).post(create_post));

    let post_routes = Router::new()
        .route("/:id", get(get_post).patch(update_post).delete(delete_post))
        .route("/:id/comments", post(add_comment));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/boards", board_routes)
        .nest("/posts", post_routes);

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn_with_state(
                    app_state.clone(),
                    authenticate,
                )),
        )
        .with_state(app_state)
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}
