//! Driver error types
//!
//! Failures a backend adapter can surface, with the cache miss as the sole
//! typed condition callers branch on.

use thiserror::Error;

// == Driver Error Enum ==
/// Failure modes shared by all backend drivers.
#[derive(Error, Debug)]
pub enum DriverError {
    /// The backend has no value under the requested key
    #[error("entity not exist")]
    NotExist,

    /// The Redis backend failed
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// The memcached backend failed
    #[error("memcached error: {0}")]
    Memcached(#[from] memcache::MemcacheError),

    /// A backend failure without a typed source
    #[error("backend error: {0}")]
    Backend(String),
}
