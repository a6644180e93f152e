//! Request body validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError};

use crate::web::error::ApiError;

/// JSON body that has passed its `validator` rules.
///
/// Malformed JSON is a 400; a body that parses but fails validation is a
/// 422 with per-field details.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = match Json::<T>::from_request(req, state).await {
            Ok(Json(body)) => body,
            Err(rejection) => {
                tracing::debug!(error = %rejection.body_text(), "rejected request body");
                return Err(ApiError::bad_request(format!(
                    "Invalid JSON: {}",
                    rejection.body_text()
                )));
            }
        };

        if let Err(errors) = body.validate() {
            tracing::debug!(
                fields = ?errors.field_errors().keys().collect::<Vec<_>>(),
                "request failed validation"
            );
            return Err(ApiError::from_validation_errors(errors));
        }

        Ok(ValidatedJson(body))
    }
}

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Reject strings that are empty after trimming whitespace.
pub fn not_empty_trimmed(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("not_empty_trimmed", "Must not be empty"));
    }
    Ok(())
}

/// Titles, board names and display names are one line of printable text.
pub fn single_line(value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(invalid("single_line", "Must be a single line of text"));
    }
    Ok(())
}

/// Post and comment bodies may contain line breaks and tabs, nothing else
/// from the control range.
pub fn printable_text(value: &str) -> Result<(), ValidationError> {
    if value
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
    {
        return Err(invalid(
            "printable_text",
            "Must not contain control characters",
        ));
    }
    Ok(())
}

/// Non-blank, single-line text.
pub fn single_line_text(value: &str) -> Result<(), ValidationError> {
    not_empty_trimmed(value)?;
    single_line(value)
}

/// Non-blank, printable multi-line text.
pub fn body_text(value: &str) -> Result<(), ValidationError> {
    not_empty_trimmed(value)?;
    printable_text(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_empty_trimmed() {
        assert!(not_empty_trimmed("Hello").is_ok());
        assert!(not_empty_trimmed("  Hello  ").is_ok());
        assert!(not_empty_trimmed("").is_err());
        assert!(not_empty_trimmed(" \t\n").is_err());
    }

    #[test]
    fn test_single_line() {
        assert!(single_line("Release notes v2").is_ok());
        assert!(single_line("two\nlines").is_err());
        assert!(single_line("tab\there").is_err());
        assert!(single_line("nul\0").is_err());
    }

    #[test]
    fn test_printable_text() {
        assert!(printable_text("first line\r\nsecond\tline").is_ok());
        assert!(printable_text("bell\u{7}").is_err());
        assert!(printable_text("escape\u{1b}[31m").is_err());
    }

    #[test]
    fn test_composite_rules() {
        assert!(single_line_text("Title").is_ok());
        assert!(single_line_text("   ").is_err());
        assert!(single_line_text("a\nb").is_err());
        assert!(body_text("line one\nline two").is_ok());
        assert!(body_text("\n\n").is_err());
    }
}
