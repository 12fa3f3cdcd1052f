//! Mapping from core errors to HTTP responses.
//!
//! Every failure leaves the API as `{"error": "<message>"}`. Client mistakes get a 400 or 404
//! with a specific message; storage failures are logged here and reported as a generic 500.

use api_shared::ErrorRes;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use folio_core::PageError;

pub const MSG_TITLE_OR_CONTENT_REQUIRED: &str = "Title or content required";
pub const MSG_PAGE_NOT_FOUND: &str = "Page not found";
pub const MSG_ROUTE_NOT_FOUND: &str = "Route not found";
pub const MSG_INTERNAL: &str = "Internal server error";

/// Error returned by every REST handler.
#[derive(Debug)]
pub enum ApiError {
    Page(PageError),
    /// The request body could not be parsed.
    Body(JsonRejection),
    NotFound(&'static str),
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::Page(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection)
    }
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Page(PageError::MissingTitleAndContent) => (
                StatusCode::BAD_REQUEST,
                MSG_TITLE_OR_CONTENT_REQUIRED.into(),
            ),
            ApiError::Page(PageError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, MSG_PAGE_NOT_FOUND.into())
            }
            ApiError::Page(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, e.to_string()),
            ApiError::Page(e) => {
                tracing::error!("Page operation error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_INTERNAL.into())
            }
            ApiError::Body(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, (*message).into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, Json(ErrorRes::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_is_bad_request() {
        let (status, message) =
            ApiError::from(PageError::MissingTitleAndContent).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, MSG_TITLE_OR_CONTENT_REQUIRED);
    }

    #[test]
    fn test_not_found_is_404() {
        let (status, message) =
            ApiError::from(PageError::NotFound("x".into())).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, MSG_PAGE_NOT_FOUND);
    }

    #[test]
    fn test_storage_failure_hides_details() {
        let err = PageError::FileWrite(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only filesystem",
        ));
        let (status, message) = ApiError::from(err).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, MSG_INTERNAL);
    }

    #[test]
    fn test_malformed_stored_record_is_server_error() {
        let err = PageError::MalformedStoredRecord {
            index: 3,
            errors: vec!["tags must be an array".into()],
        };
        let (status, message) = ApiError::from(err).status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, MSG_INTERNAL);
    }
}
