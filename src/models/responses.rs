//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::models::ValType;

/// Response body for the get operation (GET /api/v1/{key}/)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub val: ValType,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, val: ValType) -> Self {
        Self {
            key: key.into(),
            val,
        }
    }
}

/// Response body for the set operation (POST /api/v1/{key}/)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// The key that was set
    pub key: String,
    /// The value that was stored
    pub val: ValType,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>, val: ValType) -> Self {
        Self {
            key: key.into(),
            val,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
