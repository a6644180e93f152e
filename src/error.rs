//! Error types for the forum service.

use thiserror::Error;

use crate::auth::{PasswordError, TokenError};

/// Common error type for the forum service.
///
/// `Unauthorized`, `NotFound` and `Forbidden` are distinct outcomes with
/// different remediation for the caller and must never be folded together.
#[derive(Error, Debug)]
pub enum ForumError {
    /// No valid identity could be established for an operation that needs one.
    #[error("authentication required")]
    Unauthorized,

    /// The requester is authenticated but neither the owner nor an admin.
    #[error("permission denied: {0}")]
    Forbidden(String),

    /// Resource missing, or not in the state the operation requires.
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness violation (duplicate email, duplicate board name).
    #[error("{0} already exists")]
    Conflict(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant and propagated unchanged.
    #[error("database error: {0}")]
    Database(String),

    /// Token could not be issued.
    #[error("token error: {0}")]
    Token(#[from] TokenError),

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for ForumError {
    fn from(e: sqlx::Error) -> Self {
        ForumError::Database(e.to_string())
    }
}

/// Result type alias for forum operations.
pub type Result<T> = std::result::Result<T, ForumError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        assert_eq!(
            ForumError::Unauthorized.to_string(),
            "authentication required"
        );
    }

    #[test]
    fn test_forbidden_display() {
        let err = ForumError::Forbidden("not the author".to_string());
        assert_eq!(err.to_string(), "permission denied: not the author");
    }

    #[test]
    fn test_not_found_display() {
        let err = ForumError::NotFound("post".to_string());
        assert_eq!(err.to_string(), "post not found");
    }

    #[test]
    fn test_conflict_display() {
        let err = ForumError::Conflict("email".to_string());
        assert_eq!(err.to_string(), "email already exists");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ForumError = io_err.into();
        assert!(matches!(err, ForumError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_sqlx_error_conversion() {
        let err: ForumError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ForumError::Database(_)));
    }
}
