//! Forum content service.
//!
//! Users post and comment within named boards. This crate holds the
//! lifecycle and access-control core (token authentication, ownership
//! authorization, the post state machine and the race-free comment counter)
//! together with its SQLite storage and an axum HTTP surface.

pub mod auth;
pub mod board;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    authorize_mutation, can_mutate, hash_password, login, register, verify_password, AuthState,
    AuthenticationGate, Identity, IdentityDirectory, IdentityResolver, RegistrationRequest,
    TokenCodec, TokenError,
};
pub use board::{CommentService, PostService, PostSort, PostStatus};
pub use config::Config;
pub use db::{Database, Role, User, UserDirectory};
pub use error::{ForumError, Result};
