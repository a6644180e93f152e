//! Post repository.

use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use super::post::{NewPost, Post, PostSort, PostStatus, PostView};
use super::service::Pagination;
use crate::{ForumError, Result};

const POST_COLUMNS: &str = "p.id, p.board_id, p.author_id, p.title, p.body, p.like_count,
     p.comment_count, p.hot_score, p.status, p.created_at, p.updated_at";

/// Repository for post records.
pub struct PostRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> PostRepository<'c> {
    /// Create a new PostRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Insert a new active post with zeroed counters.
    pub async fn insert(&mut self, board_id: i64, author_id: i64, new_post: &NewPost) -> Result<Post> {
        let now = Utc::now();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (board_id, author_id, title, body, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(board_id)
        .bind(author_id)
        .bind(&new_post.title)
        .bind(&new_post.body)
        .bind(PostStatus::Active.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&mut *self.conn)
        .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("post".to_string()))
    }

    /// Get a post by ID regardless of status.
    pub async fn find_by_id(&mut self, id: i64) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = ?");
        let row: Option<PostRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    /// Get a post by ID only if it is active.
    pub async fn find_active_by_id(&mut self, id: i64) -> Result<Option<Post>> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts p WHERE p.id = ? AND p.status = ?");
        let row: Option<PostRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(PostStatus::Active.as_str())
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    /// Persist the mutable fields of a post (title, body, status, updated_at).
    ///
    /// Only a row that is still active is written. Counters are never
    /// written here; see
    /// [`increment_comment_count_if_active`](Self::increment_comment_count_if_active).
    /// Returns true if a row was updated.
    pub async fn save(&mut self, post: &Post) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE posts SET title = ?, body = ?, status = ?, updated_at = ?
             WHERE id = ? AND status = ?",
        )
        .bind(&post.title)
        .bind(&post.body)
        .bind(post.status.as_str())
        .bind(post.updated_at)
        .bind(post.id)
        .bind(PostStatus::Active.as_str())
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Increment the comment counter in place, only while the post is active.
    ///
    /// Returns the number of rows affected: 1 if the post is active, 0 if it
    /// is missing or deleted.
    pub async fn increment_comment_count_if_active(&mut self, id: i64) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE posts SET comment_count = comment_count + 1 WHERE id = ? AND status = ?",
        )
        .bind(id)
        .bind(PostStatus::Active.as_str())
        .execute(&mut *self.conn)
        .await?;

        Ok(result.rows_affected())
    }

    /// Set the ranking score of a post.
    pub async fn set_hot_score(&mut self, id: i64, score: f64) -> Result<bool> {
        let result = sqlx::query("UPDATE posts SET hot_score = ? WHERE id = ?")
            .bind(score)
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Get the read model of an active post.
    pub async fn find_active_view_by_id(&mut self, id: i64) -> Result<Option<PostView>> {
        let sql = format!(
            "SELECT {POST_COLUMNS}, u.display_name AS author_name, b.name AS board_name
             FROM posts p
             JOIN users u ON u.id = p.author_id
             JOIN boards b ON b.id = p.board_id
             WHERE p.id = ? AND p.status = ?"
        );
        let row: Option<PostViewRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(PostStatus::Active.as_str())
            .fetch_optional(&mut *self.conn)
            .await?;

        Ok(row.map(PostViewRow::into_view))
    }

    /// List active posts in a board.
    pub async fn list_active_by_board(
        &mut self,
        board_id: i64,
        sort: PostSort,
        page: Pagination,
    ) -> Result<Vec<PostView>> {
        let sql = format!(
            "SELECT {POST_COLUMNS}, u.display_name AS author_name, b.name AS board_name
             FROM posts p
             JOIN users u ON u.id = p.author_id
             JOIN boards b ON b.id = p.board_id
             WHERE p.board_id = ? AND p.status = ?
             ORDER BY {}
             LIMIT ? OFFSET ?",
            sort.order_by()
        );
        let rows: Vec<PostViewRow> = sqlx::query_as(&sql)
            .bind(board_id)
            .bind(PostStatus::Active.as_str())
            .bind(page.limit)
            .bind(page.offset)
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(PostViewRow::into_view).collect())
    }

    /// Count active posts in a board.
    pub async fn count_active_by_board(&mut self, board_id: i64) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE board_id = ? AND status = ?")
                .bind(board_id)
                .bind(PostStatus::Active.as_str())
                .fetch_one(&mut *self.conn)
                .await?;
        Ok(count)
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    board_id: i64,
    author_id: i64,
    title: String,
    body: String,
    like_count: i64,
    comment_count: i64,
    hot_score: f64,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.id,
            board_id: self.board_id,
            author_id: self.author_id,
            title: self.title,
            body: self.body,
            like_count: self.like_count,
            comment_count: self.comment_count,
            hot_score: self.hot_score,
            // An unreadable status must never surface as active
            status: self.status.parse().unwrap_or(PostStatus::Deleted),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostViewRow {
    #[sqlx(flatten)]
    post: PostRow,
    author_name: String,
    board_name: String,
}

impl PostViewRow {
    fn into_view(self) -> PostView {
        PostView {
            post: self.post.into_post(),
            author_name: self.author_name,
            board_name: self.board_name,
        }
    }
}
