//! Durable response cache for upstream API payloads
//!
//! Entries are keyed by the full request URL and carry the timestamp they
//! were written at. Reads honor a configurable TTL; writes persist the whole
//! cache as a single JSON blob to local storage. Persistence is best-effort:
//! the cache is an optimization, never a correctness dependency, so storage
//! failures are logged and swallowed.

mod error;
mod store;

pub use error::{CacheError, Result};
pub use store::{CacheEntry, CacheStore, CACHE_FILE_NAME};
