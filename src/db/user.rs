//! User model for the identity directory.
//!
//! This module defines the User record and the Role enum.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// User role for permission management.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Regular member.
    #[default]
    User,
    /// Administrator; may mutate any user's posts.
    Admin,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Check if this role is privileged.
    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// Normalize an email address into its stored subject form.
///
/// Applied once when an account is created or a login is attempted;
/// directory lookups use the stored value verbatim.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// User record in the identity directory.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Normalized email; also the token subject.
    pub email: String,
    /// Password hash (Argon2).
    pub password_hash: String,
    /// Display name.
    pub display_name: String,
    /// User role for permissions.
    pub role: Role,
    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Email address (normalized by [`NewUser::new`]).
    pub email: String,
    /// Password hash (should be pre-hashed with Argon2).
    pub password_hash: String,
    /// Display name.
    pub display_name: String,
    /// User role (defaults to User).
    pub role: Role,
}

impl NewUser {
    /// Create a new user with minimal required fields.
    pub fn new(
        email: impl AsRef<str>,
        password_hash: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self {
            email: normalize_email(email.as_ref()),
            password_hash: password_hash.into(),
            display_name: display_name.into(),
            role: Role::User,
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}
