//! CollegeFootballData API client
//!
//! This crate owns the whole fetch path for upstream data: request building
//! and bearer auth, retry with linear backoff on transient failures, a FIFO
//! concurrency limiter that bounds in-flight requests system-wide, and a
//! read-through cached client layered on the durable `stat-cache` store.
//!
//! The raw client performs the network call and nothing else; caching and
//! throttling are composed around it by `CachedClient`.

pub mod broker;
pub mod cached;
pub mod client;
pub mod config;
pub mod error;
pub mod limiter;

pub use broker::fetch_broker_key;
pub use cached::CachedClient;
pub use client::CfbdClient;
pub use config::{FetcherConfig, RetryConfig};
pub use error::{FetchError, Result};
pub use limiter::ConcurrencyLimiter;
