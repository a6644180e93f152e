//! Post model and lifecycle state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Lifecycle state of a post.
///
/// The only transition is `Active -> Deleted`; `Deleted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    /// Visible, editable, accepts comments.
    #[default]
    Active,
    /// Soft-deleted. Content and comments are retained but hidden.
    Deleted,
}

impl PostStatus {
    /// Convert status to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Active => "active",
            PostStatus::Deleted => "deleted",
        }
    }

    /// Apply the soft-delete transition.
    ///
    /// Returns `None` when the post is already deleted.
    pub fn soft_delete(self) -> Option<PostStatus> {
        match self {
            PostStatus::Active => Some(PostStatus::Deleted),
            PostStatus::Deleted => None,
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PostStatus::Active),
            "deleted" => Ok(PostStatus::Deleted),
            _ => Err(format!("unknown post status: {s}")),
        }
    }
}

/// Sort key for post listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    /// Newest first.
    #[default]
    Latest,
    /// Highest hot score first.
    Hot,
}

impl PostSort {
    /// Query-string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostSort::Latest => "latest",
            PostSort::Hot => "hot",
        }
    }

    pub(crate) fn order_by(&self) -> &'static str {
        match self {
            PostSort::Latest => "p.created_at DESC, p.id DESC",
            PostSort::Hot => "p.hot_score DESC, p.id DESC",
        }
    }
}

impl FromStr for PostSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "latest" => Ok(PostSort::Latest),
            "hot" => Ok(PostSort::Hot),
            _ => Err(format!("unknown sort: {s}")),
        }
    }
}

/// Post entity.
///
/// `board_id` and `author_id` never change after creation.
#[derive(Debug, Clone)]
pub struct Post {
    /// Unique post ID.
    pub id: i64,
    /// Board the post belongs to.
    pub board_id: i64,
    /// Author's user ID.
    pub author_id: i64,
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
    /// Like counter (maintained elsewhere).
    pub like_count: i64,
    /// Number of comments attached while the post was active.
    pub comment_count: i64,
    /// Ranking score used by [`PostSort::Hot`].
    pub hot_score: f64,
    /// Lifecycle state.
    pub status: PostStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new post.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub body: String,
}

impl NewPost {
    /// Create a new post payload.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Partial edit of a post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    /// New title.
    pub title: Option<String>,
    /// New body.
    pub body: Option<String>,
}

impl PostPatch {
    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Check if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none()
    }

    /// Apply present fields onto `post`.
    pub fn apply_to(self, post: &mut Post) {
        if let Some(title) = self.title {
            post.title = title;
        }
        if let Some(body) = self.body {
            post.body = body;
        }
    }
}

/// Read model of a post joined with its author and board names.
#[derive(Debug, Clone)]
pub struct PostView {
    /// The post.
    pub post: Post,
    /// Author display name.
    pub author_name: String,
    /// Board name.
    pub board_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Post {
        let now = Utc::now();
        Post {
            id: 1,
            board_id: 1,
            author_id: 10,
            title: "Original".to_string(),
            body: "Body".to_string(),
            like_count: 0,
            comment_count: 0,
            hot_score: 0.0,
            status: PostStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [PostStatus::Active, PostStatus::Deleted] {
            assert_eq!(status.as_str().parse::<PostStatus>().unwrap(), status);
        }
        assert!("archived".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_soft_delete_transition() {
        assert_eq!(PostStatus::Active.soft_delete(), Some(PostStatus::Deleted));
        assert_eq!(PostStatus::Deleted.soft_delete(), None);
    }

    #[test]
    fn test_sort_parse() {
        assert_eq!("HOT".parse::<PostSort>().unwrap(), PostSort::Hot);
        assert_eq!("latest".parse::<PostSort>().unwrap(), PostSort::Latest);
        assert!("oldest".parse::<PostSort>().is_err());
        assert_eq!(PostSort::default(), PostSort::Latest);
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut p = post();
        PostPatch::default().with_title("Edited").apply_to(&mut p);
        assert_eq!(p.title, "Edited");
        assert_eq!(p.body, "Body");

        let mut p = post();
        PostPatch::default().with_body("New body").apply_to(&mut p);
        assert_eq!(p.title, "Original");
        assert_eq!(p.body, "New body");
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(PostPatch::default().is_empty());
        assert!(!PostPatch::default().with_body("x").is_empty());
    }
}
