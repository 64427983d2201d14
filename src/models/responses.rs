//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::{CacheStats, TtlStatus};

/// Response body for the GET operation (GET /get/:key)
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    /// The requested key
    pub key: String,
    /// The stored value
    pub value: String,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Response body for the SET operation (PUT /set)
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    /// Success message
    pub message: String,
    /// The key that was set
    pub key: String,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' set successfully", key),
            key,
        }
    }
}

/// Response body for the DELETE operation (DELETE /del/:key)
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The key that was deleted
    pub key: String,
}

impl DeleteResponse {
    /// Creates a new DeleteResponse
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            message: format!("Key '{}' deleted successfully", key),
            key,
        }
    }
}

/// Response body for the TTL lookup (GET /ttl/:key)
#[derive(Debug, Clone, Serialize)]
pub struct TtlResponse {
    /// The requested key
    pub key: String,
    /// "never" or "expiring"
    pub status: &'static str,
    /// Milliseconds left, only for expiring keys
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_ms: Option<u64>,
}

impl TtlResponse {
    /// Builds a response for a present key. Returns None for `Missing`.
    pub fn from_status(key: impl Into<String>, status: TtlStatus) -> Option<Self> {
        let (status, remaining_ms) = match status {
            TtlStatus::Missing => return None,
            TtlStatus::Never => ("never", None),
            TtlStatus::Remaining(left) => ("expiring", Some(left.as_millis() as u64)),
        };
        Some(Self {
            key: key.into(),
            status,
            remaining_ms,
        })
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Number of expired entries purged
    pub expirations: u64,
    /// Current number of live entries in cache
    pub total_entries: usize,
    /// Configured capacity
    pub capacity: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(stats: CacheStats, total_entries: usize, capacity: usize) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries,
            capacity,
            hit_rate: stats.hit_rate(),
        }
    }
}

/// Response body for maintenance endpoints (cleanup, flush, stats reset)
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceResponse {
    /// What was done
    pub message: String,
    /// Number of entries removed, when applicable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<usize>,
}

impl MaintenanceResponse {
    pub fn new(message: impl Into<String>, removed: Option<usize>) -> Self {
        Self {
            message: message.into(),
            removed,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
