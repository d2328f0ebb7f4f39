//! Closed error taxonomy for handler-level failures.
//!
//! Every route failure is one of these four cases. Each renders the shared
//! error page with its own message and status code, so callers can tell a
//! bad upload apart from a broken upstream. Nothing is retried.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::error;

use crate::views;

#[derive(Debug)]
pub enum QuizError {
    /// OCR or PDF extraction produced only whitespace.
    ExtractionEmpty(&'static str),
    /// The uploaded source could not be read or persisted.
    SourceReadFailure(String),
    /// The generative API call failed (transport, HTTP status, or decode).
    UpstreamGenerationFailure(String),
    /// A model reply line (or a legacy form submission) did not match the
    /// shape we expect.
    ParseFailure(String),
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::ExtractionEmpty(what) => {
                write!(f, "No text found in the {}.", what)
            }
            QuizError::SourceReadFailure(msg) => {
                write!(f, "Failed to read the source: {}", msg)
            }
            QuizError::UpstreamGenerationFailure(msg) => {
                write!(f, "Generation failed: {}", msg)
            }
            QuizError::ParseFailure(msg) => {
                write!(f, "Malformed data: {}", msg)
            }
        }
    }
}

impl std::error::Error for QuizError {}

impl QuizError {
    fn status(&self) -> StatusCode {
        match self {
            QuizError::ExtractionEmpty(_) => StatusCode::UNPROCESSABLE_ENTITY,
            QuizError::SourceReadFailure(_) => StatusCode::BAD_REQUEST,
            QuizError::UpstreamGenerationFailure(_) => StatusCode::BAD_GATEWAY,
            QuizError::ParseFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(target: "quiz", %status, error = %self, "Request failed");
        (status, views::error_page(&self.to_string())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_variant_has_its_own_status() {
        assert_eq!(
            QuizError::ExtractionEmpty("PDF").status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            QuizError::SourceReadFailure("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            QuizError::UpstreamGenerationFailure("x".into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            QuizError::ParseFailure("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn extraction_message_names_the_source() {
        assert_eq!(
            QuizError::ExtractionEmpty("uploaded image").to_string(),
            "No text found in the uploaded image."
        );
    }
}
