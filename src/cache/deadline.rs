//! Deadline Module
//!
//! Absolute expiry instants for cached keys and the shared key -> deadline index.

use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

// == Deadline ==
/// Expiry state of a cached key: an absolute UTC instant or "never".
///
/// Conversion from a user-supplied TTL happens at the call site so the
/// coordinator only ever compares absolute instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deadline {
    /// The key has no expiry.
    Never,
    /// The key expires once the current time passes this instant.
    At(DateTime<Utc>),
}

/// Cap on user-supplied TTLs so the deadline arithmetic cannot overflow.
const MAX_TTL_SECONDS: u64 = 100 * 365 * 24 * 60 * 60;

impl Deadline {
    // == From TTL ==
    /// Converts a TTL in seconds into an absolute deadline captured now.
    ///
    /// A TTL of zero means the key never expires. TTLs beyond roughly a
    /// hundred years are clamped.
    pub fn from_ttl(ttl_seconds: u64) -> Self {
        if ttl_seconds == 0 {
            return Deadline::Never;
        }

        let ttl = ttl_seconds.min(MAX_TTL_SECONDS) as i64;

        Deadline::At(Utc::now() + chrono::Duration::seconds(ttl))
    }

    // == Is Expired ==
    /// Checks whether the deadline lies strictly in the past of `now`.
    ///
    /// A deadline exactly equal to `now` is not yet expired; `Never` never is.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        match self {
            Deadline::Never => false,
            Deadline::At(at) => now > *at,
        }
    }

    // == Remaining ==
    /// Time left until the deadline, or `None` for `Never`.
    ///
    /// Already-passed deadlines yield a zero duration.
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        match self {
            Deadline::Never => None,
            Deadline::At(at) => Some((*at - now).to_std().unwrap_or(Duration::ZERO)),
        }
    }
}

// == Deadline Index ==
/// Concurrent key -> deadline mapping.
///
/// Tracks only keys written through the coordinator. Reads do not block other
/// readers; writes lock a single shard. The swap operation returns the prior
/// deadline so callers can detect never -> finite transitions atomically.
#[derive(Debug, Default)]
pub struct DeadlineIndex {
    entries: DashMap<String, Deadline>,
}

impl DeadlineIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the deadline stored for `key`, if any.
    pub fn load(&self, key: &str) -> Option<Deadline> {
        self.entries.get(key).map(|entry| *entry.value())
    }

    /// Replaces the deadline for `key`, returning the previous one.
    pub fn swap(&self, key: &str, deadline: Deadline) -> Option<Deadline> {
        self.entries.insert(key.to_string(), deadline)
    }

    /// Removes the entry for `key`.
    pub fn delete(&self, key: &str) {
        self.entries.remove(key);
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ttl_zero_is_never() {
        assert_eq!(Deadline::from_ttl(0), Deadline::Never);
    }

    #[test]
    fn test_from_ttl_positive_is_future_instant() {
        let before = Utc::now();
        let deadline = Deadline::from_ttl(60);

        let Deadline::At(at) = deadline else {
            panic!("expected a finite deadline");
        };
        assert!(at >= before + chrono::Duration::seconds(60));
    }

    #[test]
    fn test_from_ttl_clamps_absurd_values() {
        let deadline = Deadline::from_ttl(u64::MAX);

        let Deadline::At(at) = deadline else {
            panic!("expected a finite deadline");
        };
        assert!(at > Utc::now());
    }

    #[test]
    fn test_never_is_not_expired() {
        assert!(!Deadline::Never.is_expired(Utc::now()));
    }

    #[test]
    fn test_future_deadline_is_not_expired() {
        let now = Utc::now();
        let deadline = Deadline::At(now + chrono::Duration::seconds(10));

        assert!(!deadline.is_expired(now));
    }

    #[test]
    fn test_past_deadline_is_expired() {
        let now = Utc::now();
        let deadline = Deadline::At(now - chrono::Duration::seconds(10));

        assert!(deadline.is_expired(now));
    }

    #[test]
    fn test_deadline_equal_to_now_is_not_expired() {
        let now = Utc::now();
        let deadline = Deadline::At(now);

        assert!(!deadline.is_expired(now));
    }

    #[test]
    fn test_remaining_never() {
        assert!(Deadline::Never.remaining(Utc::now()).is_none());
    }

    #[test]
    fn test_remaining_future() {
        let now = Utc::now();
        let deadline = Deadline::At(now + chrono::Duration::seconds(10));

        let remaining = deadline.remaining(now).unwrap();
        assert_eq!(remaining.as_secs(), 10);
    }

    #[test]
    fn test_remaining_past_is_zero() {
        let now = Utc::now();
        let deadline = Deadline::At(now - chrono::Duration::seconds(10));

        assert_eq!(deadline.remaining(now), Some(Duration::ZERO));
    }

    #[test]
    fn test_index_load_absent() {
        let index = DeadlineIndex::new();

        assert!(index.load("missing").is_none());
    }

    #[test]
    fn test_index_swap_returns_previous() {
        let index = DeadlineIndex::new();

        assert_eq!(index.swap("key", Deadline::Never), None);

        let deadline = Deadline::from_ttl(60);
        assert_eq!(index.swap("key", deadline), Some(Deadline::Never));
        assert_eq!(index.load("key"), Some(deadline));
    }

    #[test]
    fn test_index_delete() {
        let index = DeadlineIndex::new();

        index.swap("key", Deadline::Never);
        index.delete("key");

        assert!(index.load("key").is_none());
    }

    #[test]
    fn test_index_delete_absent_is_noop() {
        let index = DeadlineIndex::new();

        index.delete("missing");
    }
}
