//! Identity resolution.
//!
//! Maps a verified token subject to the identity acting on the request.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::db::{Role, User};
use crate::{ForumError, Result};

/// The authenticated actor of a single request.
///
/// Resolved fresh from the directory on every verified token; never cached
/// across requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// User ID.
    pub id: i64,
    /// Display name.
    pub display_name: String,
    /// Role.
    #[serde(serialize_with = "serialize_role")]
    pub role: Role,
}

impl Identity {
    /// Create an identity value.
    pub fn new(id: i64, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            role,
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(user.id, user.display_name.clone(), user.role)
    }
}

fn serialize_role<S: serde::Serializer>(role: &Role, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.serialize_str(role.as_str())
}

/// Lookup interface of the external identity directory.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    /// Find a user by subject (normalized email), exactly as stored.
    async fn find_by_subject(&self, subject: &str) -> Result<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

/// Resolves token subjects to identities.
#[derive(Clone)]
pub struct IdentityResolver {
    directory: Arc<dyn IdentityDirectory>,
}

impl IdentityResolver {
    /// Create a resolver over a directory.
    pub fn new(directory: Arc<dyn IdentityDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve a subject to an identity.
    ///
    /// Returns `NotFound` when the directory has no such subject.
    pub async fn resolve(&self, subject: &str) -> Result<Identity> {
        self.directory
            .find_by_subject(subject)
            .await?
            .map(|user| Identity::from(&user))
            .ok_or_else(|| ForumError::NotFound("identity".to_string()))
    }
}
