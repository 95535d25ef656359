//! Redis Driver
//!
//! Adapter over the async `redis` client. Every operation runs on the shared
//! multiplexed connection; the nil reply maps to the typed miss.

use async_trait::async_trait;
use redis::AsyncCommands;

use crate::drivers::{Driver, DriverError};

// == Redis Driver ==
/// Driver backed by a remote Redis node.
#[derive(Debug, Clone)]
pub struct Redis {
    client: redis::Client,
}

impl Redis {
    /// Creates a driver for the Redis node at `addr` (`host:port`).
    pub fn new(addr: &str) -> Result<Self, DriverError> {
        let client = redis::Client::open(format!("redis://{addr}"))?;

        Ok(Self { client })
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, DriverError> {
        Ok(self.client.get_multiplexed_async_connection().await?)
    }
}

#[async_trait]
impl Driver for Redis {
    async fn get(&self, key: &str) -> Result<String, DriverError> {
        let mut conn = self.connection().await?;

        let val: Option<String> = conn.get(key).await?;

        val.ok_or(DriverError::NotExist)
    }

    async fn set(&self, key: &str, val: &str) -> Result<(), DriverError> {
        let mut conn = self.connection().await?;

        // stored without expiry, the coordinator owns key lifetimes
        conn.set::<_, _, ()>(key, val).await?;

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), DriverError> {
        let mut conn = self.connection().await?;

        conn.del::<_, ()>(key).await?;

        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        // connections close with the client on drop
        Ok(())
    }
}
