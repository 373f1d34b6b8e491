//! Transport error types.
//!
//! [`TransportError`] covers failures of the listener itself, while
//! [`ApiError`] is the per-request error taxonomy rendered as JSON.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::security::AuthError;
use crate::domains::tools::ToolError;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that can occur in transport operations.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Failed to bind to address.
    #[error("Failed to bind to {address}: {source}")]
    BindError {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// HTTP server error while serving.
    #[error("HTTP error: {0}")]
    HttpError(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::BindError {
            address: address.into(),
            source,
        }
    }

    /// Create an HTTP error.
    pub fn http(msg: impl Into<String>) -> Self {
        Self::HttpError(msg.into())
    }
}

/// Body sent for every 401, whatever the underlying [`AuthError`].
pub const UNAUTHORIZED_MESSAGE: &str = "Missing or invalid API key";

/// Body sent for every 500.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors returned to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request did not pass the auth gate.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// The request is missing a required field.
    #[error("{0}")]
    BadRequest(String),

    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// No route matches the request.
    #[error("Endpoint not found")]
    NotFound,

    /// A fault outside tool execution.
    #[error("Internal server error")]
    Internal { details: Option<String> },
}

impl ApiError {
    /// Create a bad request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    /// Create an internal error carrying the underlying message.
    pub fn internal(details: impl Into<String>) -> Self {
        Self::Internal {
            details: Some(details.into()),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) | Self::UnknownTool(_) => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::Unauthorized(_) => json!({ "error": UNAUTHORIZED_MESSAGE }),
            Self::Internal {
                details: Some(details),
            } => json!({ "error": INTERNAL_ERROR_MESSAGE, "details": details }),
            Self::Internal { details: None } => json!({ "error": INTERNAL_ERROR_MESSAGE }),
            other => json!({ "error": other.to_string() }),
        }
    }
}

impl From<ToolError> for ApiError {
    fn from(err: ToolError) -> Self {
        match err {
            ToolError::NotFound(name) => Self::UnknownTool(name),
            other => Self::internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.body())).into_response()
    }
}
