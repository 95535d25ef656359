//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint. This layer owns the
//! TTL -> deadline conversion and the JSON encoding of stored values.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tokio_util::sync::CancellationToken;

use crate::cache::{CacheCoordinator, Deadline};
use crate::error::{CacheError, Result};
use crate::models::{GetResponse, HealthResponse, SetRequest, SetResponse, ValType};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Handle on the cache coordinator
    pub cache: CacheCoordinator,
}

impl AppState {
    /// Creates a new AppState around a coordinator.
    pub fn new(cache: CacheCoordinator) -> Self {
        Self { cache }
    }
}

/// Handler for GET /api/v1/{key}/
///
/// Retrieves the value stored under the key and decodes it back into the
/// JSON object the set handler wrote.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let raw = state.cache.get(&CancellationToken::new(), &key).await?;

    let val: ValType = serde_json::from_str(&raw).map_err(|_| CacheError::DataCorrupted)?;

    Ok(Json(GetResponse::new(key, val)))
}

/// Handler for POST /api/v1/{key}/
///
/// Stores the JSON object from the request body. A ttl of zero (or an absent
/// ttl) stores the key without expiry.
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<SetRequest>,
) -> Result<(StatusCode, Json<SetResponse>)> {
    let raw = serde_json::to_string(&req.val).map_err(|_| CacheError::DataCorrupted)?;

    let deadline = Deadline::from_ttl(req.ttl);

    state
        .cache
        .set(&CancellationToken::new(), &key, &raw, deadline)
        .await?;

    Ok((StatusCode::CREATED, Json(SetResponse::new(key, req.val))))
}

/// Handler for DELETE /api/v1/{key}/
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<StatusCode> {
    state.cache.del(&CancellationToken::new(), &key).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
