//! Cache Entry Module
//!
//! Defines a single memoized value together with its insertion time.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A stored value and the monotonic instant it was inserted at.
///
/// Entries carry no TTL of their own; the owning cache decides staleness
/// from its fixed TTL.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Insertion instant
    pub stored_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry stamped with the current instant.
    pub fn new(value: V) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    // == Age ==
    /// Time elapsed since insertion.
    pub fn age(&self) -> Duration {
        self.stored_at.elapsed()
    }

    // == Is Expired ==
    /// Checks whether the entry is stale under the given TTL.
    ///
    /// Boundary condition: an entry whose age equals the TTL is expired. A
    /// value is only ever served while `age < ttl`.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() >= ttl
    }

    // == Time To Live ==
    /// Remaining lifetime under the given TTL, zero once expired.
    pub fn ttl_remaining(&self, ttl: Duration) -> Duration {
        ttl.saturating_sub(self.age())
    }
}
