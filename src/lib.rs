//! Report Cache - memoized accounting reports
//!
//! Aging buckets, per-account ledger balances and per-period totals computed
//! from loosely typed invoice/bill rows, with a TTL cache in front.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod report;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
