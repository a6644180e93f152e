//! Guarded comment counter.
//!
//! The counter is bumped by a single conditional UPDATE before the post is
//! read, so no in-memory copy of the post can ever be written back over a
//! concurrent increment. The affected-row count doubles as the "post is
//! active" check.

use sqlx::SqliteConnection;
use tracing::debug;

use super::post::Post;
use super::post_repository::PostRepository;
use crate::{ForumError, Result};

/// Count one more comment on `post_id` and return the post as it stands
/// after the increment.
///
/// Must run inside the transaction that also inserts the comment. Returns
/// `NotFound` when no active post matched, in which case nothing changed.
pub async fn increment_then_reload(conn: &mut SqliteConnection, post_id: i64) -> Result<Post> {
    let mut posts = PostRepository::new(conn);

    let affected = posts.increment_comment_count_if_active(post_id).await?;
    if affected == 0 {
        debug!(post_id, "comment counter not incremented: post missing or deleted");
        return Err(ForumError::NotFound("post".to_string()));
    }

    posts
        .find_active_by_id(post_id)
        .await?
        .ok_or_else(|| ForumError::NotFound("post".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRepository, NewBoard, NewPost, PostStatus};
    use crate::db::{NewUser, UserRepository};
    use crate::Database;

    async fn setup() -> (Database, Post) {
        let db = Database::open_in_memory().await.unwrap();
        let mut conn = db.pool().acquire().await.unwrap();
        let author_id = UserRepository::new(&mut conn)
            .create(&NewUser::new("author@example.com", "hash", "Author"))
            .await
            .unwrap()
            .id;
        let board_id = BoardRepository::new(&mut conn)
            .create(&NewBoard::new("general"))
            .await
            .unwrap()
            .id;
        let post = PostRepository::new(&mut conn)
            .insert(board_id, author_id, &NewPost::new("Hello", "World"))
            .await
            .unwrap();
        drop(conn);
        (db, post)
    }

    #[tokio::test]
    async fn test_reload_sees_increment() {
        let (db, post) = setup().await;
        let mut tx = db.begin().await.unwrap();

        let reloaded = increment_then_reload(&mut tx, post.id).await.unwrap();
        assert_eq!(reloaded.comment_count, 1);
        let reloaded = increment_then_reload(&mut tx, post.id).await.unwrap();
        assert_eq!(reloaded.comment_count, 2);
        tx.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_deleted_post_is_not_found_and_unchanged() {
        let (db, mut post) = setup().await;
        {
            let mut conn = db.pool().acquire().await.unwrap();
            post.status = PostStatus::Deleted;
            PostRepository::new(&mut conn).save(&post).await.unwrap();
        }

        let mut tx = db.begin().await.unwrap();
        let result = increment_then_reload(&mut tx, post.id).await;
        assert!(matches!(result, Err(ForumError::NotFound(_))));
        drop(tx);

        let mut conn = db.pool().acquire().await.unwrap();
        let stored = PostRepository::new(&mut conn)
            .find_by_id(post.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.comment_count, 0);
    }

    #[tokio::test]
    async fn test_missing_post_is_not_found() {
        let (db, _) = setup().await;
        let mut tx = db.begin().await.unwrap();
        let result = increment_then_reload(&mut tx, 9999).await;
        assert!(matches!(result, Err(ForumError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_rollback_discards_increment() {
        let (db, post) = setup().await;
        {
            let mut tx = db.begin().await.unwrap();
            increment_then_reload(&mut tx, post.id).await.unwrap();
            // Dropped without commit
        }

        let mut conn = db.pool().acquire().await.unwrap();
        let stored = PostRepository::new(&mut conn)
            .find_by_id(post.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.comment_count, 0);
    }
}
