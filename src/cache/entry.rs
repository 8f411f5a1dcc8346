//! Cache Entry Module
//!
//! Defines a cached collection together with the moment it was fetched.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A cached value and its fetch timestamp.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value
    pub data: T,
    /// Monotonic fetch time, used for validity checks
    pub timestamp: Instant,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates a new entry stamped with the current time.
    pub fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
        }
    }

    /// Time elapsed since the entry was fetched.
    pub fn age(&self) -> Duration {
        self.timestamp.elapsed()
    }

    // == Is Expired ==
    /// Checks if the entry is older than `ttl`.
    ///
    /// An entry is valid while `age < ttl`; once the TTL has fully elapsed it
    /// is expired.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }
}
