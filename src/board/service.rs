//! Board, post and comment services.
//!
//! Every operation here runs as one database transaction. A transaction
//! that is dropped before `commit` (early return, panic, cancelled request
//! future) rolls back, so a unit of work is never half-applied.

use chrono::Utc;
use tracing::info;

use crate::auth::{authorize_mutation, require_admin, require_identity, Identity};
use crate::db::{Database, UserRepository};
use crate::{ForumError, Result};

use super::comment::{Comment, CommentRepository, NewComment};
use super::counter::increment_then_reload;
use super::post::{NewPost, Post, PostPatch, PostSort, PostView};
use super::post_repository::PostRepository;
use super::repository::BoardRepository;
use super::types::{Board, NewBoard};

/// Maximum length for post titles (in characters).
pub const MAX_TITLE_LENGTH: usize = 50;

/// Maximum length for post and comment bodies (in characters).
pub const MAX_BODY_LENGTH: usize = 300;

/// Maximum length for board names (in characters).
pub const MAX_BOARD_NAME_LENGTH: usize = 50;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

fn validate_text(field: &str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ForumError::Validation(format!("{field} must not be empty")));
    }
    if value.chars().count() > max {
        return Err(ForumError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of items to skip.
    pub offset: i64,
    /// Maximum number of items to return.
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::first(20)
    }
}

impl Pagination {
    /// Create new pagination parameters.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            offset: offset.max(0),
            limit: limit.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Create pagination for the first page with given limit.
    pub fn first(limit: i64) -> Self {
        Self::new(0, limit)
    }

    /// Create pagination from a 1-based page number and a page size.
    pub fn page(page: i64, per_page: i64) -> Self {
        let limit = per_page.clamp(1, MAX_PAGE_SIZE);
        Self::new((page.max(1) - 1).saturating_mul(limit), limit)
    }

    /// The 1-based page number this offset falls on.
    pub fn page_number(&self) -> i64 {
        self.offset / self.limit + 1
    }
}

/// Result of a paginated query.
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total number of items (across all pages).
    pub total: i64,
    /// Current offset.
    pub offset: i64,
    /// Limit used for this query.
    pub limit: i64,
}

impl<T> PaginatedResult<T> {
    fn new(items: Vec<T>, total: i64, page: Pagination) -> Self {
        Self {
            items,
            total,
            offset: page.offset,
            limit: page.limit,
        }
    }

    /// Check if there are more items after this page.
    pub fn has_more(&self) -> bool {
        self.offset + (self.items.len() as i64) < self.total
    }
}

/// Board catalogue operations.
pub struct BoardService<'a> {
    db: &'a Database,
}

impl<'a> BoardService<'a> {
    /// Create a new BoardService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a board. Admin only; a duplicate name is `Conflict`.
    pub async fn create_board(
        &self,
        requester: Option<&Identity>,
        new_board: NewBoard,
    ) -> Result<Board> {
        let admin = require_admin(requester)?;
        validate_text("name", &new_board.name, MAX_BOARD_NAME_LENGTH)?;

        let mut tx = self.db.begin_immediate().await?;
        let board = BoardRepository::new(&mut tx).create(&new_board).await?;
        tx.commit().await?;

        info!(board_id = board.id, admin_id = admin.id, "board created");
        Ok(board)
    }

    /// Get a board by ID.
    pub async fn get_board(&self, board_id: i64) -> Result<Board> {
        let mut conn = self.db.pool().acquire().await?;
        BoardRepository::new(&mut conn)
            .get_by_id(board_id)
            .await?
            .ok_or_else(|| ForumError::NotFound("board".to_string()))
    }

    /// List boards, optionally filtered by a case-insensitive name keyword.
    pub async fn list_boards(
        &self,
        keyword: Option<&str>,
        page: Pagination,
    ) -> Result<PaginatedResult<Board>> {
        let mut tx = self.db.begin().await?;
        let mut repo = BoardRepository::new(&mut tx);
        let total = repo.count(keyword).await?;
        let items = repo.list(keyword, page).await?;
        tx.commit().await?;

        Ok(PaginatedResult::new(items, total, page))
    }
}

/// Post lifecycle operations.
///
/// `Active --edit--> Active`, `Active --delete--> Deleted`. A deleted post
/// behaves exactly like a missing one for every operation.
pub struct PostService<'a> {
    db: &'a Database,
}

impl<'a> PostService<'a> {
    /// Create a new PostService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create an active post authored by the requester.
    pub async fn create_post(
        &self,
        board_id: i64,
        requester: Option<&Identity>,
        new_post: NewPost,
    ) -> Result<Post> {
        let identity = require_identity(requester)?;
        validate_text("title", &new_post.title, MAX_TITLE_LENGTH)?;
        validate_text("body", &new_post.body, MAX_BODY_LENGTH)?;

        let mut tx = self.db.begin_immediate().await?;

        if !BoardRepository::new(&mut tx).exists(board_id).await? {
            return Err(ForumError::NotFound("board".to_string()));
        }
        if UserRepository::new(&mut tx)
            .get_by_id(identity.id)
            .await?
            .is_none()
        {
            return Err(ForumError::NotFound("user".to_string()));
        }

        let post = PostRepository::new(&mut tx)
            .insert(board_id, identity.id, &new_post)
            .await?;
        tx.commit().await?;

        info!(post_id = post.id, board_id, author_id = identity.id, "post created");
        Ok(post)
    }

    /// Edit the title and/or body of an active post.
    ///
    /// Checks run in order: identity (`Unauthorized`), active post
    /// (`NotFound`), owner or admin (`Forbidden`).
    pub async fn edit_post(
        &self,
        post_id: i64,
        requester: Option<&Identity>,
        patch: PostPatch,
    ) -> Result<Post> {
        let identity = require_identity(requester)?;
        if let Some(title) = &patch.title {
            validate_text("title", title, MAX_TITLE_LENGTH)?;
        }
        if let Some(body) = &patch.body {
            validate_text("body", body, MAX_BODY_LENGTH)?;
        }

        let mut tx = self.db.begin_immediate().await?;
        let mut posts = PostRepository::new(&mut tx);

        let mut post = posts
            .find_active_by_id(post_id)
            .await?
            .ok_or_else(|| ForumError::NotFound("post".to_string()))?;
        authorize_mutation(post.author_id, identity)?;

        patch.apply_to(&mut post);
        post.updated_at = Utc::now();
        if !posts.save(&post).await? {
            return Err(ForumError::NotFound("post".to_string()));
        }
        tx.commit().await?;

        info!(post_id, editor_id = identity.id, "post edited");
        Ok(post)
    }

    /// Soft-delete an active post. Title, body and comments are retained.
    pub async fn delete_post(&self, post_id: i64, requester: Option<&Identity>) -> Result<Post> {
        let identity = require_identity(requester)?;

        let mut tx = self.db.begin_immediate().await?;
        let mut posts = PostRepository::new(&mut tx);

        let mut post = posts
            .find_active_by_id(post_id)
            .await?
            .ok_or_else(|| ForumError::NotFound("post".to_string()))?;
        authorize_mutation(post.author_id, identity)?;

        post.status = post
            .status
            .soft_delete()
            .ok_or_else(|| ForumError::NotFound("post".to_string()))?;
        post.updated_at = Utc::now();
        if !posts.save(&post).await? {
            return Err(ForumError::NotFound("post".to_string()));
        }
        tx.commit().await?;

        info!(post_id, deleted_by = identity.id, "post deleted");
        Ok(post)
    }

    /// Get an active post with its author and board names.
    pub async fn get_post(&self, post_id: i64) -> Result<PostView> {
        let mut conn = self.db.pool().acquire().await?;
        PostRepository::new(&mut conn)
            .find_active_view_by_id(post_id)
            .await?
            .ok_or_else(|| ForumError::NotFound("post".to_string()))
    }

    /// List the active posts of a board.
    pub async fn list_posts(
        &self,
        board_id: i64,
        sort: PostSort,
        page: Pagination,
    ) -> Result<PaginatedResult<PostView>> {
        let mut tx = self.db.begin().await?;

        if !BoardRepository::new(&mut tx).exists(board_id).await? {
            return Err(ForumError::NotFound("board".to_string()));
        }

        let mut posts = PostRepository::new(&mut tx);
        let total = posts.count_active_by_board(board_id).await?;
        let items = posts.list_active_by_board(board_id, sort, page).await?;
        tx.commit().await?;

        Ok(PaginatedResult::new(items, total, page))
    }
}

/// Comment operations.
pub struct CommentService<'a> {
    db: &'a Database,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService with the given database reference.
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Attach a comment to an active post and count it.
    ///
    /// The counter is incremented before the post is loaded; a missing or
    /// deleted post yields `NotFound` with nothing written.
    pub async fn add_comment(
        &self,
        post_id: i64,
        requester: Option<&Identity>,
        new_comment: NewComment,
    ) -> Result<Comment> {
        let identity = require_identity(requester)?;
        validate_text("body", &new_comment.body, MAX_BODY_LENGTH)?;

        let mut tx = self.db.begin_immediate().await?;
        let post = increment_then_reload(&mut tx, post_id).await?;
        let comment = CommentRepository::new(&mut tx)
            .insert(post.id, identity.id, &new_comment)
            .await?;
        tx.commit().await?;

        info!(
            post_id,
            comment_id = comment.id,
            author_id = identity.id,
            comment_count = post.comment_count,
            "comment added"
        );
        Ok(comment)
    }
}
