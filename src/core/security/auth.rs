//! Bearer token authentication for the HTTP gateway.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::transport::ApiError;

/// Scheme prefix expected in the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Reasons a request can be refused by the [`AuthGate`].
///
/// Both variants produce the same 401 response; they only differ in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The header is absent or does not use the `Bearer` scheme.
    #[error("Missing or malformed Authorization header")]
    MissingAuth,

    /// A bearer token was presented but does not match the secret.
    #[error("Invalid API key")]
    InvalidToken,
}

/// Validates bearer tokens against the single configured secret.
///
/// The secret is injected at construction and never changes afterwards.
#[derive(Clone)]
pub struct AuthGate {
    secret: Arc<str>,
}

/// Custom Debug implementation to redact the secret from logs.
impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl AuthGate {
    /// Create a gate admitting requests that present `secret`.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    /// Check a raw `Authorization` header value.
    pub fn check(&self, header: Option<&str>) -> Result<(), AuthError> {
        let token = header
            .and_then(|v| v.strip_prefix(BEARER_PREFIX))
            .ok_or(AuthError::MissingAuth)?;

        if constant_time_eq(token.as_bytes(), self.secret.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }

    /// Check the `Authorization` header of a request.
    ///
    /// A header that is not valid visible ASCII counts as missing.
    pub fn check_headers(&self, headers: &HeaderMap) -> Result<(), AuthError> {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        self.check(value)
    }
}

/// Compare two byte strings without short-circuiting on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Marker proving the request passed the [`AuthGate`].
///
/// Handlers that take this extractor never run for rejected requests. On
/// success the marker is also stored in the request extensions.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

impl<S> FromRequestParts<S> for Authenticated
where
    AuthGate: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let gate = AuthGate::from_ref(state);

        match gate.check_headers(&parts.headers) {
            Ok(()) => {
                debug!("Request authenticated: {} {}", parts.method, parts.uri.path());
                parts.extensions.insert(Authenticated);
                Ok(Authenticated)
            }
            Err(e) => {
                warn!(
                    reason = ?e,
                    "Rejected request to {} {}: {}",
                    parts.method,
                    parts.uri.path(),
                    e
                );
                Err(ApiError::Unauthorized(e))
            }
        }
    }
}
