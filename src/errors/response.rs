use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Structured error returned to clients when a handler fails.
///
/// `code` only sets the transport status and never appears in the body.
/// `request` is stamped by the error adapter right before the response is
/// written; handlers never set it.
#[derive(Debug, Clone, Serialize, Error)]
#[error("{msg}")]
pub struct ApiError {
    #[serde(skip)]
    pub code: StatusCode,
    pub msg: String,
    pub request: String,
}

impl ApiError {
    /// Create an error with an explicit status and message
    pub fn new(code: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            request: String::new(),
        }
    }

    /// Internal server error with the standard reason phrase
    pub fn server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::INTERNAL_SERVER_ERROR
                .canonical_reason()
                .unwrap_or("Internal Server Error"),
        )
    }

    /// Not found with the standard reason phrase
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            StatusCode::NOT_FOUND.canonical_reason().unwrap_or("Not Found"),
        )
    }

    /// Unclassified failure with a caller-supplied message.
    /// Only surfaced to clients in debug mode.
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, msg)
    }
}

impl Default for ApiError {
    fn default() -> Self {
        Self::server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code;
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_defaults() {
        let err = ApiError::server_error();
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.msg, "Internal Server Error");
    }

    #[test]
    fn test_not_found_defaults() {
        let err = ApiError::not_found();
        assert_eq!(err.code, StatusCode::NOT_FOUND);
        assert_eq!(err.msg, "Not Found");
    }

    #[test]
    fn test_unknown_keeps_message() {
        let err = ApiError::unknown("boom");
        assert_eq!(err.code, StatusCode::FORBIDDEN);
        assert_eq!(err.msg, "boom");
    }

    #[test]
    fn test_default_is_server_error() {
        let err = ApiError::default();
        assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_serialization_excludes_code() {
        let mut err = ApiError::new(StatusCode::BAD_REQUEST, "param error");
        err.request = "GET to /global/error?name=abcd".to_string();

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["msg"], "param error");
        assert_eq!(json["request"], "GET to /global/error?name=abcd");
        assert!(json.get("code").is_none());
    }

    #[test]
    fn test_into_response_status_from_code() {
        let response = ApiError::new(StatusCode::BAD_REQUEST, "param error").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_into_response_status_not_found() {
        let response = ApiError::not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_into_response_status_unknown() {
        let response = ApiError::unknown("boom").into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
