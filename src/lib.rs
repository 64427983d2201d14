//! ttl_lru - A bounded in-memory cache with LRU eviction and per-entry TTL
//!
//! The core is `cache::Cache`, a thread-safe cache that evicts the least
//! recently used entry at capacity and expires entries lazily on access.
//! The `api`, `models` and `tasks` modules wrap it in a small HTTP service.
//!
//! ```
//! use std::time::Duration;
//! use ttl_lru::Cache;
//!
//! let cache = Cache::new(2, Duration::from_secs(60)).unwrap();
//! cache.put("a", 1, None);
//! cache.put("b", 2, Some(Duration::ZERO)); // never expires
//! assert_eq!(cache.get("a"), Some(1));
//!
//! cache.put("c", 3, None); // evicts "b", the least recently used
//! assert_eq!(cache.get("b"), None);
//! assert_eq!(cache.stats().evictions, 1);
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Cache, CacheStats, Clock, ManualClock, SystemClock, TtlStatus};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_cleanup_task;
