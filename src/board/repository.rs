//! Board repository.

use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use super::service::Pagination;
use super::types::{Board, NewBoard};
use crate::{ForumError, Result};

/// Repository for board records.
pub struct BoardRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> BoardRepository<'c> {
    /// Create a new BoardRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a new board.
    ///
    /// Returns `Conflict` if the name is taken.
    pub async fn create(&mut self, new_board: &NewBoard) -> Result<Board> {
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO boards (name, description, created_at) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(&new_board.name)
        .bind(&new_board.description)
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await;

        let id = match result {
            Ok(id) => id,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(ForumError::Conflict("board name".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("board".to_string()))
    }

    /// Get a board by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<Board>> {
        let row: Option<BoardRow> =
            sqlx::query_as("SELECT id, name, description, created_at FROM boards WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *self.conn)
                .await?;

        Ok(row.map(BoardRow::into_board))
    }

    /// Check if a board exists.
    pub async fn exists(&mut self, id: i64) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM boards WHERE id = ?)")
            .bind(id)
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(exists)
    }

    /// List boards ordered by ID, optionally filtered by a case-insensitive
    /// name substring.
    pub async fn list(&mut self, keyword: Option<&str>, page: Pagination) -> Result<Vec<Board>> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT id, name, description, created_at FROM boards");
        push_keyword_filter(&mut query, keyword);
        query.push(" ORDER BY id LIMIT ");
        query.push_bind(page.limit);
        query.push(" OFFSET ");
        query.push_bind(page.offset);

        let rows: Vec<BoardRow> = query
            .build_query_as()
            .fetch_all(&mut *self.conn)
            .await?;

        Ok(rows.into_iter().map(BoardRow::into_board).collect())
    }

    /// Count boards matching the same filter as [`list`](Self::list).
    pub async fn count(&mut self, keyword: Option<&str>) -> Result<i64> {
        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM boards");
        push_keyword_filter(&mut query, keyword);

        let count: i64 = query
            .build_query_scalar()
            .fetch_one(&mut *self.conn)
            .await?;
        Ok(count)
    }
}

fn push_keyword_filter(query: &mut QueryBuilder<'_, Sqlite>, keyword: Option<&str>) {
    let Some(keyword) = keyword.map(str::trim).filter(|k| !k.is_empty()) else {
        return;
    };
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    query.push(" WHERE LOWER(name) LIKE ");
    query.push_bind(format!("%{}%", escaped.to_lowercase()));
    query.push(" ESCAPE '\\'");
}

#[derive(sqlx::FromRow)]
struct BoardRow {
    id: i64,
    name: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl BoardRow {
    fn into_board(self) -> Board {
        Board {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
        }
    }
}
