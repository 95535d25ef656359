//! Cache Module
//!
//! The coordination core: TTL deadlines, admission control, and per-key
//! background expiry over a pluggable backend driver.

mod coordinator;
mod deadline;


// Re-export public types
pub use coordinator::{CacheConfig, CacheCoordinator};
pub use deadline::{Deadline, DeadlineIndex};
