//! Cache Module
//!
//! In-memory response memoization with a fixed TTL and lazy expiry.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::cache_key;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Default lifetime of a memoized upstream response in milliseconds
pub const DEFAULT_TTL_MS: u64 = 30_000;
