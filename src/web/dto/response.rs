//! Response DTOs for Web API.

use serde::Serialize;

use crate::board::{Board, Comment, PaginatedResult, Post, PostView};
use crate::db::User;

// ============================================================================
// Generic Response Wrappers
// ============================================================================

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Paginated response wrapper.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    /// Response data.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PaginationMeta,
}

impl<T: Serialize> PaginatedResponse<T> {
    /// Build a response page, converting each item.
    pub fn from_result<U>(result: PaginatedResult<U>, convert: impl FnMut(U) -> T) -> Self {
        let meta = PaginationMeta {
            page: result.offset / result.limit + 1,
            per_page: result.limit,
            total: result.total,
        };
        Self {
            data: result.items.into_iter().map(convert).collect(),
            meta,
        }
    }
}

/// Pagination metadata.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Current page number.
    pub page: i64,
    /// Items per page.
    pub per_page: i64,
    /// Total number of items.
    pub total: i64,
}

// ============================================================================
// Account DTOs
// ============================================================================

/// Registered account.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// User ID.
    pub id: i64,
    /// Normalized email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Role.
    pub role: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            display_name: user.display_name,
            role: user.role.as_str().to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Bearer access token.
    pub access_token: String,
    /// Always `Bearer`.
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: u64,
    /// The authenticated account.
    pub user: UserResponse,
}

// ============================================================================
// Board DTOs
// ============================================================================

/// Board response.
#[derive(Debug, Serialize)]
pub struct BoardResponse {
    /// Board ID.
    pub id: i64,
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<Board> for BoardResponse {
    fn from(board: Board) -> Self {
        Self {
            id: board.id,
            name: board.name,
            description: board.description,
            created_at: board.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Post DTOs
// ============================================================================

/// Post response.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    /// Post ID.
    pub id: i64,
    /// Board ID.
    pub board_id: i64,
    /// Author ID.
    pub author_id: i64,
    /// Title.
    pub title: String,
    /// Body.
    pub body: String,
    /// Like count.
    pub like_count: i64,
    /// Comment count.
    pub comment_count: i64,
    /// Hot score.
    pub hot_score: f64,
    /// `active` or `deleted`.
    pub status: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Last modification timestamp (RFC 3339).
    pub updated_at: String,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            board_id: post.board_id,
            author_id: post.author_id,
            title: post.title,
            body: post.body,
            like_count: post.like_count,
            comment_count: post.comment_count,
            hot_score: post.hot_score,
            status: post.status.as_str().to_string(),
            created_at: post.created_at.to_rfc3339(),
            updated_at: post.updated_at.to_rfc3339(),
        }
    }
}

/// Post with author and board names.
#[derive(Debug, Serialize)]
pub struct PostDetailResponse {
    /// The post.
    #[serde(flatten)]
    pub post: PostResponse,
    /// Author display name.
    pub author_name: String,
    /// Board name.
    pub board_name: String,
}

impl From<PostView> for PostDetailResponse {
    fn from(view: PostView) -> Self {
        Self {
            post: view.post.into(),
            author_name: view.author_name,
            board_name: view.board_name,
        }
    }
}

/// Comment response.
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    /// Comment ID.
    pub id: i64,
    /// Post ID.
    pub post_id: i64,
    /// Author ID.
    pub author_id: i64,
    /// Body.
    pub body: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            author_id: comment.author_id,
            body: comment.body,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}
