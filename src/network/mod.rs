//! Page download and caching
//!
//! - `session` - HTTP download, charset detection, cache read-through
//! - `cache` - in-memory and on-disk page caches

pub mod cache;
pub mod session;

pub use cache::{Cache, CacheError, DbCache, MemoryCache};
pub use session::{FetchError, Session};
