//! Comment model and repository.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use crate::{ForumError, Result};

/// Comment on a post. Comments are never edited or deleted.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Unique comment ID.
    pub id: i64,
    /// Post this comment is attached to.
    pub post_id: i64,
    /// Author's user ID.
    pub author_id: i64,
    /// Comment body.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    /// Comment body.
    pub body: String,
}

impl NewComment {
    /// Create a new comment payload.
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

/// Repository for comment records.
pub struct CommentRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> CommentRepository<'c> {
    /// Create a new CommentRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a comment.
    ///
    /// Callers are responsible for having counted it on the post first.
    pub async fn insert(
        &mut self,
        post_id: i64,
        author_id: i64,
        new_comment: &NewComment,
    ) -> Result<Comment> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (post_id, author_id, body, created_at)
             VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(post_id)
        .bind(author_id)
        .bind(&new_comment.body)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("comment".to_string()))
    }

    /// Get a comment by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Comment>> {
        let row: Option<CommentRow> = sqlx::query_as(
            "SELECT id, post_id, author_id, body, created_at FROM comments WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    /// Count the comment rows attached to a post.
    pub async fn count_by_post(&mut self, post_id: i64) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    author_id: i64,
    body: String,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            author_id: self.author_id,
            body: self.body,
            created_at: self.created_at,
        }
    }
}
