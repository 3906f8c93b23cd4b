//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;
use tracker_core::model::SessionTokenError;

/// Errors emitted by `ApiGateway` implementations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("no session token; sign in first")]
    MissingToken,
    #[error("session rejected by server with status {0}")]
    Unauthorized(reqwest::StatusCode),
    #[error("request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// True when the failure means the current token is missing or no longer accepted.
    #[must_use]
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::MissingToken | ApiError::Unauthorized(_))
    }
}

/// Errors emitted by `SessionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Token(#[from] SessionTokenError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error("invalid api base url: {0}")]
    InvalidBaseUrl(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
