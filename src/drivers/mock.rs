//! Mock Driver
//!
//! Scriptable in-memory driver for coordinator tests: operations can be
//! slowed down to hold the admission gate open, deletes can be made to fail
//! a fixed number of times, and the whole backend can be broken.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::drivers::{Driver, DriverError};

// == Mock Driver ==
/// Hook-programmable test double for the driver contract.
///
/// Clones share state, so tests can keep a probe handle after boxing the
/// driver into a coordinator.
#[derive(Debug, Default, Clone)]
pub struct MockDriver {
    storage: Arc<Mutex<HashMap<String, String>>>,
    op_delay: Option<Duration>,
    always_fail: bool,
    del_failures: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    close_count: Arc<AtomicUsize>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slows every operation down by `delay`.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.op_delay = Some(delay);
        self
    }

    /// Makes the next `count` delete calls fail before recovering.
    pub fn with_del_failures(self, count: usize) -> Self {
        self.del_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Makes every operation fail.
    pub fn failing(mut self) -> Self {
        self.always_fail = true;
        self
    }

    /// Highest number of operations observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Number of times `close` was called.
    pub fn close_count(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }

    /// Whether the backend currently holds `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.storage.lock().unwrap().contains_key(key)
    }

    /// Drops `key` from the backend without telling anyone.
    pub fn wipe(&self, key: &str) {
        self.storage.lock().unwrap().remove(key);
    }

    async fn begin(&self) {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.op_delay {
            tokio::time::sleep(delay).await;
        }
    }

    fn end(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn get(&self, key: &str) -> Result<String, DriverError> {
        self.begin().await;

        let result = if self.always_fail {
            Err(DriverError::Backend("mock failure".to_string()))
        } else {
            self.storage
                .lock()
                .unwrap()
                .get(key)
                .cloned()
                .ok_or(DriverError::NotExist)
        };

        self.end();
        result
    }

    async fn set(&self, key: &str, val: &str) -> Result<(), DriverError> {
        self.begin().await;

        let result = if self.always_fail {
            Err(DriverError::Backend("mock failure".to_string()))
        } else {
            self.storage
                .lock()
                .unwrap()
                .insert(key.to_string(), val.to_string());
            Ok(())
        };

        self.end();
        result
    }

    async fn del(&self, key: &str) -> Result<(), DriverError> {
        self.begin().await;

        let scripted_failure = self
            .del_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        let result = if self.always_fail || scripted_failure {
            Err(DriverError::Backend("mock failure".to_string()))
        } else {
            self.storage.lock().unwrap().remove(key);
            Ok(())
        };

        self.end();
        result
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.close_count.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
