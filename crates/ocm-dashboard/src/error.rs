//! Error types for the console dashboard.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Result type alias for dashboard operations.
pub type DashboardResult<T> = Result<T, DashboardError>;

/// Errors that can occur while fetching, aggregating, or serving dashboard data.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {0}: {1}")]
    BindFailed(std::net::SocketAddr, std::io::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// The request to an upstream endpoint failed.
    #[error("request to {endpoint} failed: {message}")]
    Fetch {
        /// Endpoint that was queried.
        endpoint: String,
        /// Transport or status failure description.
        message: String,
    },

    /// The upstream endpoint answered with GraphQL errors.
    #[error("graphql errors from {endpoint}: {}", .messages.join("; "))]
    GraphQl {
        /// Endpoint that was queried.
        endpoint: String,
        /// Error messages reported by the endpoint.
        messages: Vec<String>,
    },

    /// The upstream response had no usable data.
    #[error("missing data in {0} response")]
    MissingData(String),

    /// The number of count results differs from the number of submitted queries.
    #[error("result count mismatch: submitted {expected} queries, received {actual} results")]
    ResultMismatch {
        /// Number of submitted query descriptors.
        expected: usize,
        /// Number of results returned.
        actual: usize,
    },

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// No API endpoint at the requested path.
    #[error("not found: {0}")]
    NotFound(String),

    /// Pages are only served for GET requests.
    #[error("method {0} not allowed")]
    MethodNotAllowed(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            Self::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            Self::MethodNotAllowed(_) => (StatusCode::METHOD_NOT_ALLOWED, "method_not_allowed"),
            Self::Fetch { .. } | Self::GraphQl { .. } | Self::MissingData(_) => {
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
            Self::BindFailed(_, _)
            | Self::Config(_)
            | Self::ResultMismatch { .. }
            | Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        };

        let json = serde_json::to_string(&body).unwrap_or_else(|_| {
            r#"{"error":"internal_error","message":"failed to serialize error"}"#.to_string()
        });

        (status, [("content-type", "application/json")], json).into_response()
    }
}
