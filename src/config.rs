//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

// == Driver Selection ==
/// Backend selected for the cache driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
    /// In-process map, no external store
    Machine,
    /// Remote memcached node
    Memcached,
    /// Remote Redis node
    Redis,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The driver name is not one of the recognised backends
    #[error("invalid driver: {0}")]
    InvalidDriver(String),
}

impl FromStr for DriverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "machine" => Ok(Self::Machine),
            "memcached" => Ok(Self::Memcached),
            "redis" => Ok(Self::Redis),
            other => Err(ConfigError::InvalidDriver(other.to_string())),
        }
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Machine => "machine",
            Self::Memcached => "memcached",
            Self::Redis => "redis",
        };

        write!(f, "{name}")
    }
}

// == Configuration ==
/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Verbose request logging
    pub debug: bool,
    /// HTTP server port
    pub server_port: u16,
    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout: Duration,
    /// Which backend driver to run against
    pub driver: DriverKind,
    /// Backend network address (ignored for machine)
    pub driver_address: String,
    /// Cap on concurrent backend operations
    pub max_conn: usize,
    /// How long one operation may wait for admission
    pub conn_timeout: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `APICACHE_DEBUG` - verbose request logging (default: false)
    /// - `APICACHE_SERVER_PORT` - HTTP server port (default: 8080)
    /// - `APICACHE_SHUTDOWN_TIMEOUT_MS` - shutdown grace period (default: 1000)
    /// - `APICACHE_DRIVER_NAME` - machine | memcached | redis (default: machine)
    /// - `APICACHE_DRIVER_ADDRESS` - backend host:port (default: empty)
    /// - `APICACHE_DRIVER_MAX_CONN` - concurrent backend operations (default: 1)
    /// - `APICACHE_DRIVER_CONN_TIMEOUT_MS` - admission timeout (default: 100)
    ///
    /// Only the driver name is validated here; the coordinator rejects
    /// out-of-range `max_conn` and `conn_timeout` values at construction.
    pub fn from_env() -> Result<Self, ConfigError> {
        let driver = match env::var("APICACHE_DRIVER_NAME") {
            Ok(name) => name.parse()?,
            Err(_) => DriverKind::Machine,
        };

        Ok(Self {
            debug: env::var("APICACHE_DEBUG")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            server_port: env::var("APICACHE_SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            shutdown_timeout: Duration::from_millis(
                env::var("APICACHE_SHUTDOWN_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),
            driver,
            driver_address: env::var("APICACHE_DRIVER_ADDRESS").unwrap_or_default(),
            max_conn: env::var("APICACHE_DRIVER_MAX_CONN")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            conn_timeout: Duration::from_millis(
                env::var("APICACHE_DRIVER_CONN_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(100),
            ),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debug: false,
            server_port: 8080,
            shutdown_timeout: Duration::from_millis(1000),
            driver: DriverKind::Machine,
            driver_address: String::new(),
            max_conn: 1,
            conn_timeout: Duration::from_millis(100),
        }
    }
}
