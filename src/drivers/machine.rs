//! Machine Driver
//!
//! In-process map backend guarded by a reader/writer lock. Serves tests and
//! single-node deployments that need no external store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::drivers::{Driver, DriverError};

// == Machine Driver ==
/// Map-backed driver living in process memory.
#[derive(Debug, Default)]
pub struct Machine {
    data: RwLock<HashMap<String, String>>,
}

impl Machine {
    /// Creates an empty machine driver.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Driver for Machine {
    async fn get(&self, key: &str) -> Result<String, DriverError> {
        let data = self.data.read().await;

        data.get(key).cloned().ok_or(DriverError::NotExist)
    }

    async fn set(&self, key: &str, val: &str) -> Result<(), DriverError> {
        let mut data = self.data.write().await;
        data.insert(key.to_string(), val.to_string());

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), DriverError> {
        let mut data = self.data.write().await;
        data.remove(key);

        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let driver = Machine::new();

        driver.set("key", "value").await.unwrap();

        assert_eq!(driver.get("key").await.unwrap(), "value");
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let driver = Machine::new();

        let result = driver.get("missing").await;
        assert!(matches!(result, Err(DriverError::NotExist)));
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let driver = Machine::new();

        driver.set("key", "first").await.unwrap();
        driver.set("key", "second").await.unwrap();

        assert_eq!(driver.get("key").await.unwrap(), "second");
    }

    #[tokio::test]
    async fn test_del_removes_key() {
        let driver = Machine::new();

        driver.set("key", "value").await.unwrap();
        driver.del("key").await.unwrap();

        assert!(matches!(
            driver.get("key").await,
            Err(DriverError::NotExist)
        ));
    }

    #[tokio::test]
    async fn test_del_missing_key_succeeds() {
        let driver = Machine::new();

        driver.del("missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_close() {
        let driver = Machine::new();

        driver.close().await.unwrap();
    }
}
