//! apicache - An HTTP-fronted key/value cache
//!
//! A concurrency-bounded, TTL-aware cache coordinator over pluggable backend
//! drivers (in-process map, memcached, Redis), fronted by a small REST API.

pub mod api;
pub mod cache;
pub mod config;
pub mod drivers;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheConfig, CacheCoordinator, Deadline};
pub use config::Config;
pub use drivers::Driver;
