//! Memcached Driver
//!
//! Adapter over the `memcache` protocol client. The client speaks a blocking
//! protocol, so every operation runs on the blocking thread pool.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task;

use crate::drivers::{Driver, DriverError};

// == Memcached Driver ==
/// Driver backed by a remote memcached node.
#[derive(Clone)]
pub struct Memcached {
    client: Arc<memcache::Client>,
}

impl fmt::Debug for Memcached {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memcached").finish_non_exhaustive()
    }
}

impl Memcached {
    /// Connects to the memcached node at `addr` (`host:port`).
    pub fn new(addr: &str) -> Result<Self, DriverError> {
        let client = memcache::connect(format!("memcache://{addr}"))?;

        Ok(Self {
            client: Arc::new(client),
        })
    }
}

/// Runs one client call on the blocking pool.
async fn run_blocking<T, F>(call: F) -> Result<T, DriverError>
where
    F: FnOnce() -> Result<T, memcache::MemcacheError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(call)
        .await
        .map_err(|err| DriverError::Backend(err.to_string()))?
        .map_err(DriverError::from)
}

#[async_trait]
impl Driver for Memcached {
    async fn get(&self, key: &str) -> Result<String, DriverError> {
        let client = Arc::clone(&self.client);
        let key = key.to_string();

        let val = run_blocking(move || client.get::<String>(&key)).await?;

        val.ok_or(DriverError::NotExist)
    }

    async fn set(&self, key: &str, val: &str) -> Result<(), DriverError> {
        let client = Arc::clone(&self.client);
        let key = key.to_string();
        let val = val.to_string();

        // expiration 0: the backend keeps the value until it is deleted
        run_blocking(move || client.set(&key, val.as_str(), 0)).await
    }

    async fn del(&self, key: &str) -> Result<(), DriverError> {
        let client = Arc::clone(&self.client);
        let key = key.to_string();

        // the miss flag is irrelevant, deletion is idempotent here
        run_blocking(move || client.delete(&key).map(|_| ())).await
    }

    async fn close(&self) -> Result<(), DriverError> {
        // connections close with the client on drop
        Ok(())
    }
}
