//! Cache Coordinator Module
//!
//! The TTL-aware facade over a backend driver. Owns admission control, the
//! key -> deadline index, per-key background expirers, and shutdown.

use std::cmp;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::{Deadline, DeadlineIndex};
use crate::drivers::{Driver, DriverError};
use crate::error::CacheError;

// == Constants ==
/// Divisor applied to a key's remaining TTL to derive its expirer poll period.
const PING_WINDOW: u32 = 10;

/// Floor for the expirer poll period.
const MIN_PING: Duration = Duration::from_millis(1);

/// Smallest accepted admission cap.
const MIN_MAX_CONN: usize = 1;

/// Smallest accepted admission timeout.
const MIN_CONN_TIMEOUT: Duration = Duration::from_millis(1);

// == Configuration ==
/// Coordinator tuning parameters.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Cap on concurrent backend operations
    pub max_conn: usize,
    /// How long one operation may wait for admission
    pub conn_timeout: Duration,
}

// == Coordinator ==
/// Concurrency-bounded, TTL-aware cache over a backend driver.
///
/// The driver is authoritative for values; the coordinator is authoritative
/// for deadlines of keys written through it. Handles are cheap to clone and
/// share one underlying state.
#[derive(Debug, Clone)]
pub struct CacheCoordinator {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    /// Backend adapter, closed exactly once on shutdown
    driver: Box<dyn Driver>,
    /// Admission timeout for one operation
    conn_timeout: Duration,
    /// Key -> deadline index
    keys: DeadlineIndex,
    /// Bounded permit container shared by all operations
    permits: Arc<Semaphore>,
    /// At-most-once close guard, also the fast-path shutdown flag
    closed: AtomicBool,
}

impl CacheCoordinator {
    // == Constructor ==
    /// Creates a coordinator over `driver`.
    ///
    /// # Errors
    /// - `InvalidMaxConn` if the admission cap is zero
    /// - `InvalidConnTimeout` if the admission timeout is below one millisecond
    pub fn new(cfg: CacheConfig, driver: Box<dyn Driver>) -> Result<Self, CacheError> {
        if cfg.max_conn < MIN_MAX_CONN {
            return Err(CacheError::InvalidMaxConn);
        }

        if cfg.conn_timeout < MIN_CONN_TIMEOUT {
            return Err(CacheError::InvalidConnTimeout);
        }

        Ok(Self {
            inner: Arc::new(Inner {
                driver,
                conn_timeout: cfg.conn_timeout,
                keys: DeadlineIndex::new(),
                permits: Arc::new(Semaphore::new(cfg.max_conn)),
                closed: AtomicBool::new(false),
            }),
        })
    }

    // == Get ==
    /// Retrieves the value stored under `key`.
    ///
    /// Keys never written through this coordinator are reported as missing
    /// even if the backend holds them. An expired key yields `KeyExpired`
    /// until its expirer purges it, after which it yields `KeyNotExist`; a
    /// read racing the purge may see either.
    pub async fn get(&self, cancel: &CancellationToken, key: &str) -> Result<String, CacheError> {
        let _permit = self.acquire(cancel).await?;

        let now = Utc::now();

        let deadline = self.inner.keys.load(key).ok_or(CacheError::KeyNotExist)?;

        // expired keys are refused here, the expirer owns their removal
        if deadline.is_expired(now) {
            return Err(CacheError::KeyExpired);
        }

        match self.inner.driver.get(key).await {
            Ok(val) => Ok(val),
            // the index diverged from the backend, trust the backend
            Err(DriverError::NotExist) => Err(CacheError::KeyNotExist),
            Err(err) => Err(CacheError::Driver(err)),
        }
    }

    // == Set ==
    /// Stores `val` under `key` with the given deadline, overwriting any
    /// previous value and deadline.
    ///
    /// When the key transitions from no deadline (absent or `Never`) to a
    /// finite one, a background expirer is spawned to purge it after expiry.
    pub async fn set(
        &self,
        cancel: &CancellationToken,
        key: &str,
        val: &str,
        deadline: Deadline,
    ) -> Result<(), CacheError> {
        let _permit = self.acquire(cancel).await?;

        // driver first: on failure the index must keep reflecting the backend
        self.inner.driver.set(key, val).await?;

        let previous = self.inner.keys.swap(key, deadline);

        let Deadline::At(_) = deadline else {
            // a running expirer observes the `Never` state and exits
            return Ok(());
        };

        if matches!(previous, None | Some(Deadline::Never)) {
            let remaining = deadline.remaining(Utc::now()).unwrap_or(Duration::ZERO);
            let ping = cmp::max(remaining / PING_WINDOW, MIN_PING);

            Self::spawn_expirer(Arc::clone(&self.inner), key.to_string(), ping);
        }

        Ok(())
    }

    // == Del ==
    /// Removes `key` from the backend and the index.
    ///
    /// Deleting an absent key succeeds. Removing the index entry also retires
    /// any expirer watching the key.
    pub async fn del(&self, cancel: &CancellationToken, key: &str) -> Result<(), CacheError> {
        let _permit = self.acquire(cancel).await?;

        self.inner.driver.del(key).await?;

        self.inner.keys.delete(key);

        Ok(())
    }

    // == Close ==
    /// Shuts the coordinator down: wakes blocked waiters, rejects new
    /// operations, and closes the driver.
    ///
    /// Only the first call performs the shutdown; later calls return `Ok(())`
    /// without touching the driver. In-flight operations holding a permit
    /// complete normally.
    pub async fn close(&self) -> Result<(), CacheError> {
        if self.inner.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        // closing the permit container is the broadcast: every blocked
        // waiter wakes with `Closed` before the driver goes away
        self.inner.permits.close();

        self.inner.driver.close().await?;

        Ok(())
    }

    // == Admission ==
    /// Waits for a permit, racing the admission timer and the caller's
    /// cancellation. The permit releases itself on every exit path.
    async fn acquire(&self, cancel: &CancellationToken) -> Result<OwnedSemaphorePermit, CacheError> {
        if self.inner.closed.load(Ordering::SeqCst) {
            return Err(CacheError::Closed);
        }

        tokio::select! {
            permit = Arc::clone(&self.inner.permits).acquire_owned() => {
                permit.map_err(|_| CacheError::Closed)
            }
            () = tokio::time::sleep(self.inner.conn_timeout) => Err(CacheError::ConnTimeout),
            () = cancel.cancelled() => Err(CacheError::ContextTimeout),
        }
    }

    // == Expirer ==
    /// Background task watching one key with a finite deadline.
    ///
    /// Detached from the originating request: caller cancellation never
    /// aborts a purge. Driver failures are retried on the next poll so a
    /// transient backend outage does not leak the key.
    fn spawn_expirer(inner: Arc<Inner>, key: String, ping: Duration) {
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(ping).await;

                if inner.closed.load(Ordering::SeqCst) {
                    return;
                }

                let tick = Utc::now();

                let Some(deadline) = inner.keys.load(&key) else {
                    // key was deleted, nothing left to watch
                    return;
                };

                let Deadline::At(at) = deadline else {
                    // key became permanent, it is the user's again
                    return;
                };

                if at > tick {
                    continue;
                }

                // driver first so the index never outlives the stored value
                if inner.driver.del(&key).await.is_err() {
                    // transient driver failure, retry next tick
                    continue;
                }

                inner.keys.delete(&key);

                debug!(key = %key, "expired key purged");

                return;
            }
        });
    }
}
