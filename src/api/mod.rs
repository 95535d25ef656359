//! API Module
//!
//! HTTP handlers and routing for the cache server REST API.
//!
//! # Endpoints
//! - `GET /api/v1/:key/` - Retrieve the value stored under a key
//! - `POST /api/v1/:key/` - Store a value with an optional TTL
//! - `DELETE /api/v1/:key/` - Delete a key
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
