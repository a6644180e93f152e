//! HTTP surface of the forum.
//!
//! Every request passes through the authentication gate; handlers choose
//! between [`middleware::CurrentIdentity`] and [`middleware::MaybeIdentity`].

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
