//! Drivers Module
//!
//! Backend adapters behind a single contract: a string key/value store with
//! get/set/del/close. Drivers never expire data; key lifetimes belong to the
//! cache coordinator.

mod errors;
mod machine;
mod memcached;
mod redis;

#[cfg(test)]
pub mod mock;

pub use errors::DriverError;
pub use machine::Machine;
pub use memcached::Memcached;
pub use redis::Redis;

use std::fmt;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, DriverKind};

// == Driver Contract ==
/// Capability set every backend adapter implements.
///
/// Implementations are safe for concurrent use and translate their native
/// cache-miss into [`DriverError::NotExist`].
#[async_trait]
pub trait Driver: fmt::Debug + Send + Sync {
    /// Fetches the value stored under `key`.
    ///
    /// Missing keys yield [`DriverError::NotExist`].
    async fn get(&self, key: &str) -> Result<String, DriverError>;

    /// Stores `val` under `key`, overwriting unconditionally.
    ///
    /// The backend keeps the value until it is deleted.
    async fn set(&self, key: &str, val: &str) -> Result<(), DriverError>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn del(&self, key: &str) -> Result<(), DriverError>;

    /// Releases backend connection resources.
    async fn close(&self) -> Result<(), DriverError>;
}

// == Driver Factory ==
/// Builds the backend driver selected by the configuration.
pub fn build_driver(config: &Config) -> Result<Box<dyn Driver>, DriverError> {
    match config.driver {
        DriverKind::Machine => {
            info!("Using in-process machine driver");
            Ok(Box::new(Machine::new()))
        }
        DriverKind::Memcached => {
            info!("Using memcached driver at {}", config.driver_address);
            Ok(Box::new(Memcached::new(&config.driver_address)?))
        }
        DriverKind::Redis => {
            info!("Using redis driver at {}", config.driver_address);
            Ok(Box::new(Redis::new(&config.driver_address)?))
        }
    }
}
