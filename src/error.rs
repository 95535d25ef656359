//! Error types for the cache server
//!
//! The coordinator-visible error taxonomy and its HTTP response mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::drivers::DriverError;
use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type surfaced by the cache coordinator and its HTTP layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The key was never written through this coordinator, or the backend lost it
    #[error("key not exist")]
    KeyNotExist,

    /// The key's deadline has passed and the expirer has not purged it yet
    #[error("key is expired")]
    KeyExpired,

    /// No admission permit became available within the configured timeout
    #[error("connection timeout")]
    ConnTimeout,

    /// The caller cancelled while waiting for admission
    #[error("context timeout")]
    ContextTimeout,

    /// The coordinator has been closed
    #[error("closed instance")]
    Closed,

    /// The backend failed with something other than a miss
    #[error("driver error: {0}")]
    Driver(#[from] DriverError),

    /// A stored payload could not be decoded
    #[error("data corrupted")]
    DataCorrupted,

    /// Construction rejected a non-positive admission cap
    #[error("invalid MaxConn")]
    InvalidMaxConn,

    /// Construction rejected a sub-millisecond admission timeout
    #[error("invalid ConnTimeout")]
    InvalidConnTimeout,
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::KeyExpired => StatusCode::BAD_REQUEST,
            CacheError::KeyNotExist => StatusCode::NOT_FOUND,
            CacheError::ConnTimeout | CacheError::ContextTimeout => StatusCode::TOO_MANY_REQUESTS,
            CacheError::Closed
            | CacheError::Driver(_)
            | CacheError::DataCorrupted
            | CacheError::InvalidMaxConn
            | CacheError::InvalidConnTimeout => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
