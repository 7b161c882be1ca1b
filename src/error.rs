//! Relay error types with HTTP status code mapping.
//!
//! [`RelayError`] is the central error type. Delivery and frame errors stay
//! inside the relay (they are logged, never sent to clients); the HTTP
//! endpoints turn the remaining variants into a structured JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::MemberId;

/// Structured JSON error response body.
///
/// ```json
/// {
///   "error": {
///     "code": 2001,
///     "message": "client page unavailable: No such file or directory (os error 2)"
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
}

/// Relay error enum.
///
/// # Error Code Ranges
///
/// | Range     | Category      | HTTP Status               |
/// |-----------|---------------|---------------------------|
/// | 1000–1999 | Inbound frame | 400 Bad Request           |
/// | 2000–2999 | Not found     | 404 Not Found             |
/// | 3000–3999 | Server        | 500 Internal Server Error |
/// | 5000–5999 | Delivery      | 503 Service Unavailable   |
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Inbound frame could not be classified.
    #[error("malformed frame: {0}")]
    MalformedFrame(String),

    /// The member's connection is gone; its outbound queue is closed.
    #[error("member {0} is gone")]
    MemberGone(MemberId),

    /// The member's outbound queue is full.
    #[error("member {0} is not keeping up")]
    MemberBacklogged(MemberId),

    /// The client page could not be read.
    #[error("client page unavailable: {0}")]
    ClientPage(#[from] std::io::Error),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::MalformedFrame(_) => 1001,
            Self::ClientPage(_) => 2001,
            Self::Internal(_) => 3000,
            Self::Config(_) => 3001,
            Self::MemberGone(_) => 5001,
            Self::MemberBacklogged(_) => 5002,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedFrame(_) => StatusCode::BAD_REQUEST,
            Self::ClientPage(e) if e.kind() == std::io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            Self::ClientPage(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::MemberGone(_) | Self::MemberBacklogged(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
