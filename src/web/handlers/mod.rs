//! API handlers for Web API.

pub mod auth;
pub mod board;
pub mod post;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthenticationGate, IdentityDirectory, IdentityResolver, TokenCodec};
use crate::db::UserDirectory;
use crate::Database;

pub use auth::*;
pub use board::*;
pub use post::*;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle.
    pub db: Database,
    /// Token codec used to issue access tokens.
    pub codec: TokenCodec,
    /// Per-request authentication gate.
    pub gate: AuthenticationGate,
    /// Account lookups shared with the gate.
    pub directory: Arc<dyn IdentityDirectory>,
    /// Access token lifetime.
    pub token_ttl: Duration,
}

impl AppState {
    /// Create a new application state backed by the user table.
    pub fn new(db: Database, jwt_secret: &str, token_ttl: Duration) -> Self {
        let codec = TokenCodec::new(jwt_secret);
        let directory: Arc<dyn IdentityDirectory> =
            Arc::new(UserDirectory::new(db.pool().clone()));
        let gate = AuthenticationGate::new(
            codec.clone(),
            IdentityResolver::new(Arc::clone(&directory)),
        );
        Self {
            db,
            codec,
            gate,
            directory,
            token_ttl,
        }
    }
}
