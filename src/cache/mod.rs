//! Cache Module
//!
//! Provides an in-memory, time-to-live cache for memoizing report payloads.
//! Expired entries are evicted lazily on access; there is no size bound.

mod clock;
mod entry;
mod stats;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;
