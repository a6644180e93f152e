//! User repository and the SQLite-backed identity directory.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;

use super::user::{NewUser, Role, User};
use super::DbPool;
use crate::auth::IdentityDirectory;
use crate::{ForumError, Result};

/// Repository for user records.
///
/// Works on a single connection so it can run either on a pooled
/// connection or inside an open transaction.
pub struct UserRepository<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> UserRepository<'c> {
    /// Create a new UserRepository on the given connection.
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }

    /// Create a new user.
    ///
    /// Returns `Conflict` if the email is already registered.
    pub async fn create(&mut self, new_user: &NewUser) -> Result<User> {
        let result = sqlx::query_scalar::<_, i64>(
            "INSERT INTO users (email, password_hash, display_name, role, created_at)
             VALUES (?, ?, ?, ?, ?) RETURNING id",
        )
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.display_name)
        .bind(new_user.role.as_str())
        .bind(Utc::now())
        .fetch_one(&mut *self.conn)
        .await;

        let id = match result {
            Ok(id) => id,
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                return Err(ForumError::Conflict("email".to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        self.get_by_id(id)
            .await?
            .ok_or_else(|| ForumError::NotFound("user".to_string()))
    }

    /// Get a user by ID.
    pub async fn get_by_id(&mut self, id: i64) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, password_hash, display_name, role, created_at
             FROM users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    /// Get a user by stored (already normalized) email.
    pub async fn get_by_email(&mut self, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, password_hash, display_name, role, created_at
             FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&mut *self.conn)
        .await?;

        Ok(row.map(UserRow::into_user))
    }

    /// Change a user's role.
    ///
    /// Returns true if a user was updated.
    pub async fn set_role(&mut self, id: i64, role: Role) -> Result<bool> {
        let result = sqlx::query("UPDATE users SET role = ? WHERE id = ?")
            .bind(role.as_str())
            .bind(id)
            .execute(&mut *self.conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Identity directory backed by the users table.
#[derive(Clone)]
pub struct UserDirectory {
    pool: DbPool,
}

impl UserDirectory {
    /// Create a directory over the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityDirectory for UserDirectory {
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        UserRepository::new(&mut conn).get_by_email(subject).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let mut conn = self.pool.acquire().await?;
        UserRepository::new(&mut conn).get_by_id(id).await
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    password_hash: String,
    display_name: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            display_name: self.display_name,
            role: self.role.parse().unwrap_or(Role::User),
            created_at: self.created_at,
        }
    }
}
