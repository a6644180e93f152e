//! Request DTOs for Web API.

use serde::Deserialize;
use validator::Validate;

use super::validation::{body_text, single_line_text};
use crate::board::{Pagination, PostSort};
use crate::web::error::ApiError;

/// Default page size for listings.
pub const DEFAULT_PER_PAGE: i64 = 20;

/// Login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Account registration request.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,
    /// Password confirmation.
    pub confirm_password: String,
    /// Display name.
    #[validate(
        length(min = 1, max = 20, message = "Display name must be 1-20 characters"),
        custom(function = "single_line_text")
    )]
    pub display_name: String,
}

/// Board creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBoardRequest {
    /// Board name.
    #[validate(
        length(min = 1, max = 50, message = "Name must be 1-50 characters"),
        custom(function = "single_line_text")
    )]
    pub name: String,
    /// Board description.
    #[serde(default)]
    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: String,
}

/// Post creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    /// Post title.
    #[validate(
        length(min = 1, max = 50, message = "Title must be 1-50 characters"),
        custom(function = "single_line_text")
    )]
    pub title: String,
    /// Post body.
    #[validate(
        length(min = 1, max = 300, message = "Body must be 1-300 characters"),
        custom(function = "body_text")
    )]
    pub body: String,
}

/// Post edit request. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdatePostRequest {
    /// New title.
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Title must be 1-50 characters"))]
    pub title: Option<String>,
    /// New body.
    #[serde(default)]
    #[validate(length(min = 1, max = 300, message = "Body must be 1-300 characters"))]
    pub body: Option<String>,
}

/// Comment creation request.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    /// Comment body.
    #[validate(
        length(min = 1, max = 300, message = "Body must be 1-300 characters"),
        custom(function = "body_text")
    )]
    pub body: String,
}

fn to_pagination(page: Option<i64>, per_page: Option<i64>) -> Pagination {
    Pagination::page(page.unwrap_or(1), per_page.unwrap_or(DEFAULT_PER_PAGE))
}

/// Board listing query.
#[derive(Debug, Default, Deserialize)]
pub struct ListBoardsQuery {
    /// Case-insensitive name filter.
    #[serde(default)]
    pub keyword: Option<String>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<i64>,
    /// Items per page.
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl ListBoardsQuery {
    /// Convert to offset/limit pagination.
    pub fn pagination(&self) -> Pagination {
        to_pagination(self.page, self.per_page)
    }
}

/// Post listing query.
#[derive(Debug, Default, Deserialize)]
pub struct ListPostsQuery {
    /// Sort key (`latest` or `hot`).
    #[serde(default)]
    pub sort: Option<String>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<i64>,
    /// Items per page.
    #[serde(default)]
    pub per_page: Option<i64>,
}

impl ListPostsQuery {
    /// Convert to offset/limit pagination.
    pub fn pagination(&self) -> Pagination {
        to_pagination(self.page, self.per_page)
    }

    /// Parse the sort key, defaulting to latest.
    pub fn sort(&self) -> Result<PostSort, ApiError> {
        match self.sort.as_deref() {
            None | Some("") => Ok(PostSort::Latest),
            Some(s) => s.parse().map_err(ApiError::bad_request),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            email: "alice@example.com".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            display_name: "Alice".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = RegisterRequest {
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            display_name: "   ".to_string(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("display_name"));
    }

    #[test]
    fn test_create_post_request_limits() {
        let ok = CreatePostRequest {
            title: "x".repeat(50),
            body: "y".repeat(300),
        };
        assert!(ok.validate().is_ok());

        let too_long = CreatePostRequest {
            title: "x".repeat(51),
            body: "y".repeat(301),
        };
        let errors = too_long.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(errors.field_errors().contains_key("body"));
    }

    #[test]
    fn test_title_must_be_single_line() {
        let request = CreatePostRequest {
            title: "two\nlines".to_string(),
            body: "multi\nline body is fine".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(!errors.field_errors().contains_key("body"));
    }

    #[test]
    fn test_update_post_request_optional_fields() {
        let empty = UpdatePostRequest {
            title: None,
            body: None,
        };
        assert!(empty.validate().is_ok());

        let blank_title = UpdatePostRequest {
            title: Some(String::new()),
            body: None,
        };
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn test_listing_pagination_defaults() {
        let query = ListBoardsQuery::default();
        assert_eq!(query.pagination(), Pagination::new(0, DEFAULT_PER_PAGE));

        let query = ListPostsQuery {
            page: Some(3),
            per_page: Some(5),
            ..Default::default()
        };
        assert_eq!(query.pagination(), Pagination::new(10, 5));
    }

    #[test]
    fn test_list_posts_sort() {
        let query = ListPostsQuery::default();
        assert_eq!(query.sort().unwrap(), PostSort::Latest);

        let query = ListPostsQuery {
            sort: Some("hot".to_string()),
            ..Default::default()
        };
        assert_eq!(query.sort().unwrap(), PostSort::Hot);

        let query = ListPostsQuery {
            sort: Some("random".to_string()),
            ..Default::default()
        };
        assert!(query.sort().is_err());
    }
}
