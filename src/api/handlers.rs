//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use tracing::info;

use crate::cache::Cache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    DeleteResponse, GetResponse, HealthResponse, MaintenanceResponse, SetRequest, SetResponse,
    StatsResponse, TtlResponse,
};

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers share it through a plain Arc.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache
    pub cache: Arc<Cache<String, String>>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: Cache<String, String>) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.build_cache()?))
    }
}

/// Handler for PUT /set
///
/// Stores a key-value pair in the cache with optional TTL.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let ttl = req.ttl();
    state.cache.put(req.key.clone(), req.value, ttl);

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value from the cache by key. Missing and expired keys are
/// both 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value = state
        .cache
        .get(&key)
        .ok_or_else(|| CacheError::NotFound(key.clone()))?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for DELETE /del/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if !state.cache.delete(&key) {
        return Err(CacheError::NotFound(key));
    }

    Ok(Json(DeleteResponse::new(key)))
}

/// Handler for GET /ttl/:key
///
/// Reports whether a key never expires or how long it has left.
pub async fn ttl_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<TtlResponse>> {
    let status = state.cache.remaining_ttl(&key);
    TtlResponse::from_status(key.clone(), status)
        .map(Json)
        .ok_or(CacheError::NotFound(key))
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = &state.cache;
    Json(StatsResponse::new(
        cache.stats(),
        cache.len(),
        cache.capacity(),
    ))
}

/// Handler for POST /stats/reset
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<MaintenanceResponse> {
    state.cache.reset_stats();
    Json(MaintenanceResponse::new("Statistics reset", None))
}

/// Handler for POST /cleanup
///
/// Runs an eager expiration sweep.
pub async fn cleanup_handler(State(state): State<AppState>) -> Json<MaintenanceResponse> {
    let removed = state.cache.cleanup_expired();
    Json(MaintenanceResponse::new(
        "Expired entries removed",
        Some(removed),
    ))
}

/// Handler for POST /flush
///
/// Removes every entry; statistics are kept.
pub async fn flush_handler(State(state): State<AppState>) -> Json<MaintenanceResponse> {
    state.cache.clear();
    info!("Cache flushed via API");
    Json(MaintenanceResponse::new("Cache flushed", None))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_state() -> AppState {
        AppState::new(Cache::new(100, Duration::from_secs(300)).unwrap())
    }

    fn set_request(key: &str, value: &str, ttl: Option<i64>) -> Json<SetRequest> {
        Json(SetRequest {
            key: key.to_string(),
            value: value.to_string(),
            ttl,
        })
    }

    #[tokio::test]
    async fn test_set_and_get_handler() {
        let state = test_state();

        let result = set_handler(State(state.clone()), set_request("test_key", "test_value", None)).await;
        assert!(result.is_ok());

        let response = get_handler(State(state.clone()), Path("test_key".to_string()))
            .await
            .unwrap();
        assert_eq!(response.value, "test_value");
    }

    #[tokio::test]
    async fn test_get_nonexistent_key() {
        let state = test_state();

        let result = get_handler(State(state), Path("nonexistent".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = test_state();

        set_handler(State(state.clone()), set_request("to_delete", "value", None))
            .await
            .unwrap();

        let result = delete_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_ok());

        let result = get_handler(State(state.clone()), Path("to_delete".to_string())).await;
        assert!(result.is_err());

        let result = delete_handler(State(state), Path("to_delete".to_string())).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_ttl_handler() {
        let state = test_state();

        set_handler(State(state.clone()), set_request("forever", "v", Some(0)))
            .await
            .unwrap();
        set_handler(State(state.clone()), set_request("timed", "v", Some(60)))
            .await
            .unwrap();

        let forever = ttl_handler(State(state.clone()), Path("forever".to_string()))
            .await
            .unwrap();
        assert_eq!(forever.status, "never");

        let timed = ttl_handler(State(state.clone()), Path("timed".to_string()))
            .await
            .unwrap();
        assert_eq!(timed.status, "expiring");
        assert!(timed.remaining_ms.unwrap() <= 60_000);

        let missing = ttl_handler(State(state), Path("missing".to_string())).await;
        assert!(matches!(missing, Err(CacheError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let state = test_state();

        let response = stats_handler(State(state)).await;
        assert_eq!(response.hits, 0);
        assert_eq!(response.misses, 0);
        assert_eq!(response.capacity, 100);
    }

    #[tokio::test]
    async fn test_reset_stats_handler() {
        let state = test_state();
        let _ = get_handler(State(state.clone()), Path("missing".to_string())).await;
        assert_eq!(state.cache.stats().misses, 1);

        reset_stats_handler(State(state.clone())).await;

        assert_eq!(state.cache.stats().misses, 0);
    }

    #[tokio::test]
    async fn test_flush_handler_keeps_stats() {
        let state = test_state();
        set_handler(State(state.clone()), set_request("a", "1", None))
            .await
            .unwrap();
        let _ = get_handler(State(state.clone()), Path("a".to_string())).await;

        flush_handler(State(state.clone())).await;

        assert!(state.cache.is_empty());
        assert_eq!(state.cache.stats().hits, 1);
    }

    #[tokio::test]
    async fn test_cleanup_handler_nothing_expired() {
        let state = test_state();
        set_handler(State(state.clone()), set_request("a", "1", None))
            .await
            .unwrap();

        let response = cleanup_handler(State(state)).await;
        assert_eq!(response.removed, Some(0));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }

    #[tokio::test]
    async fn test_set_invalid_request() {
        let state = test_state();

        let result = set_handler(State(state), set_request("", "value", None)).await;
        assert!(matches!(result, Err(CacheError::InvalidRequest(_))));
    }
}
