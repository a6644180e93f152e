//! Boards, posts and comments.
//!
//! This module provides:
//! - Board catalogue (admin-created, keyword search)
//! - Post lifecycle (create, edit, soft delete, read, list)
//! - Comments with a race-free denormalized counter on the post

mod comment;
mod counter;
mod post;
mod post_repository;
mod repository;
mod service;
mod types;

pub use comment::{Comment, CommentRepository, NewComment};
pub use counter::increment_then_reload;
pub use post::{NewPost, Post, PostPatch, PostSort, PostStatus, PostView};
pub use post_repository::PostRepository;
pub use repository::BoardRepository;
pub use service::{
    BoardService, CommentService, PaginatedResult, Pagination, PostService, MAX_BODY_LENGTH,
    MAX_PAGE_SIZE, MAX_TITLE_LENGTH,
};
pub use types::{Board, NewBoard};
