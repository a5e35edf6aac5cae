//! Aggregator Proxy - A caching proxy for a DeFi aggregator dashboard
//!
//! Forwards swap quote, token, balance and limit-order requests to an
//! upstream aggregator API, memoizing idempotent reads with a fixed TTL.

pub mod api;
pub mod cache;
pub mod config;
pub mod debounce;
pub mod error;
pub mod models;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use debounce::{debounce, Debounced};
pub use tasks::spawn_sweep_task;
