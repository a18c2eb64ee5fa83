use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// Failure classes of the REST client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    ValidationError,
    RateLimit,
    ServerError,
    HttpError,
    NetworkError,
    RequestError,
}

impl ApiErrorKind {
    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorKind::BadRequest,
            401 => ApiErrorKind::Unauthorized,
            403 => ApiErrorKind::Forbidden,
            404 => ApiErrorKind::NotFound,
            422 => ApiErrorKind::ValidationError,
            429 => ApiErrorKind::RateLimit,
            500 | 502 | 503 | 504 => ApiErrorKind::ServerError,
            _ => ApiErrorKind::HttpError,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            ApiErrorKind::BadRequest => "BAD_REQUEST",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Forbidden => "FORBIDDEN",
            ApiErrorKind::NotFound => "NOT_FOUND",
            ApiErrorKind::ValidationError => "VALIDATION_ERROR",
            ApiErrorKind::RateLimit => "RATE_LIMIT",
            ApiErrorKind::ServerError => "SERVER_ERROR",
            ApiErrorKind::HttpError => "HTTP_ERROR",
            ApiErrorKind::NetworkError => "NETWORK_ERROR",
            ApiErrorKind::RequestError => "REQUEST_ERROR",
        }
    }

    pub fn default_message(self) -> &'static str {
        match self {
            ApiErrorKind::BadRequest => "Bad request",
            ApiErrorKind::Unauthorized => "Unauthorized",
            ApiErrorKind::Forbidden => "Forbidden",
            ApiErrorKind::NotFound => "Resource not found",
            ApiErrorKind::ValidationError => "Validation error",
            ApiErrorKind::RateLimit => "Too many requests",
            ApiErrorKind::ServerError => "Server error",
            ApiErrorKind::HttpError => "An error occurred",
            ApiErrorKind::NetworkError => "Network error. Please check your connection.",
            ApiErrorKind::RequestError => "Request error",
        }
    }

    /// Only transient failures are worth another attempt.
    pub fn is_retryable(self) -> bool {
        matches!(self, ApiErrorKind::NetworkError | ApiErrorKind::ServerError)
    }
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} ({kind})")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub status: Option<u16>,
    pub message: String,
    /// Decoded response body, when the server sent JSON.
    pub response: Option<Value>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            status: None,
            message: message.into(),
            response: None,
        }
    }

    /// Maps an error response: the body's `message` wins over the kind's
    /// default text.
    pub fn from_response(status: u16, body: &str) -> Self {
        let kind = ApiErrorKind::from_status(status);
        let response = serde_json::from_str::<Value>(body).ok();
        let message = response
            .as_ref()
            .and_then(|value| value.get("message"))
            .and_then(Value::as_str)
            .filter(|message| !message.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| match kind {
                ApiErrorKind::HttpError => format!("Request failed with status code {status}"),
                other => other.default_message().to_string(),
            });
        Self {
            kind,
            status: Some(status),
            message,
            response,
        }
    }

    /// Error response passed through untouched for callers that handle
    /// statuses themselves.
    pub fn raw_response(status: u16, body: &str) -> Self {
        Self {
            kind: ApiErrorKind::HttpError,
            status: Some(status),
            message: format!("Request failed with status code {status}"),
            response: serde_json::from_str(body).ok(),
        }
    }

    pub fn network() -> Self {
        Self::new(
            ApiErrorKind::NetworkError,
            ApiErrorKind::NetworkError.default_message(),
        )
    }

    pub fn request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::RequestError, message)
    }

    pub fn cancelled() -> Self {
        Self::request("Request cancelled")
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ApiErrorKind::RequestError && self.message == "Request cancelled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_map_to_kinds() {
        let cases = [
            (400, ApiErrorKind::BadRequest),
            (401, ApiErrorKind::Unauthorized),
            (403, ApiErrorKind::Forbidden),
            (404, ApiErrorKind::NotFound),
            (422, ApiErrorKind::ValidationError),
            (429, ApiErrorKind::RateLimit),
            (500, ApiErrorKind::ServerError),
            (503, ApiErrorKind::ServerError),
            (418, ApiErrorKind::HttpError),
            (501, ApiErrorKind::HttpError),
        ];
        for (status, kind) in cases {
            assert_eq!(ApiErrorKind::from_status(status), kind, "status {status}");
        }
    }

    #[test]
    fn body_message_wins_over_default() {
        let err = ApiError::from_response(422, r#"{"message":"title is required"}"#);
        assert_eq!(err.kind, ApiErrorKind::ValidationError);
        assert_eq!(err.message, "title is required");
        assert_eq!(err.status, Some(422));

        let err = ApiError::from_response(404, "{}");
        assert_eq!(err.message, "Resource not found");
        let err = ApiError::from_response(502, "<html>bad gateway</html>");
        assert_eq!(err.message, "Server error");
        assert!(err.response.is_none());
    }

    #[test]
    fn only_transient_kinds_retry() {
        assert!(ApiErrorKind::NetworkError.is_retryable());
        assert!(ApiErrorKind::ServerError.is_retryable());
        assert!(!ApiErrorKind::ValidationError.is_retryable());
        assert!(!ApiErrorKind::NotFound.is_retryable());
        assert!(!ApiErrorKind::RequestError.is_retryable());
    }
}
