//! Application state for the TJM engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cache::ResultCache;
use crate::calculation::RateEngine;
use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration, the rate engine built from it and the last-result
/// cache.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    engine: Arc<RateEngine>,
    cache: Arc<ResultCache>,
    cache_file: Option<Arc<PathBuf>>,
}

impl AppState {
    /// Creates a new application state with an empty in-memory cache.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_cache(config, ResultCache::new(), None)
    }

    /// Creates a new application state around an existing cache.
    ///
    /// When `cache_file` is set, every new result is also written there.
    pub fn with_cache(config: ConfigLoader, cache: ResultCache, cache_file: Option<PathBuf>) -> Self {
        let engine = config.rate_engine();
        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
            cache: Arc::new(cache),
            cache_file: cache_file.map(Arc::new),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the rate engine built from the configuration.
    pub fn engine(&self) -> &RateEngine {
        &self.engine
    }

    /// Returns the last-result cache.
    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    /// Returns the file the cache is persisted to, if any.
    pub fn cache_file(&self) -> Option<&Path> {
        self.cache_file.as_deref().map(PathBuf::as_path)
    }

    /// Writes the cache to its file on the blocking thread pool.
    ///
    /// Does nothing when no cache file is configured.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CacheIo`] if the write fails or the blocking task
    /// does not complete.
    pub async fn persist_cache(&self) -> EngineResult<()> {
        let Some(path) = self.cache_file.clone() else {
            return Ok(());
        };
        let cache = Arc::clone(&self.cache);
        let task_path = Arc::clone(&path);

        tokio::task::spawn_blocking(move || cache.save_to(task_path.as_path()))
            .await
            .map_err(|e| EngineError::CacheIo {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_the_cache() {
        let config = ConfigLoader::load("./config/fr").unwrap();
        let state = AppState::new(config);
        let clone = state.clone();
        assert!(Arc::ptr_eq(&state.cache, &clone.cache));
        assert!(state.cache_file().is_none());
    }

    #[tokio::test]
    async fn test_persist_cache_without_file_is_a_no_op() {
        let state = AppState::new(ConfigLoader::load("./config/fr").unwrap());
        assert!(state.persist_cache().await.is_ok());
    }

    #[tokio::test]
    async fn test_persist_cache_writes_stored_result() {
        use crate::models::{AuditTrace, ExpenseLedger, RateCalculation};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("last_result.json");
        let config = ConfigLoader::load("./config/fr").unwrap();
        let state = AppState::with_cache(config, ResultCache::new(), Some(path.clone()));

        let computation = state
            .engine()
            .compute_rates_with_audit(
                2024,
                &ExpenseLedger::new().with_entry("housing", "rent", 2000),
                &ExpenseLedger::new(),
                &state.config().defaults().time_allocation,
                &state.config().defaults().taxes,
            )
            .unwrap();
        state.cache().store(RateCalculation {
            calculation_id: uuid::Uuid::new_v4(),
            timestamp: chrono::Utc::now(),
            engine_version: "test".to_string(),
            result: computation.result,
            audit_trace: AuditTrace {
                steps: computation.steps,
                warnings: computation.warnings,
                duration_us: 0,
            },
        });

        state.persist_cache().await.unwrap();
        assert_eq!(ResultCache::load_from(&path).unwrap().last(), state.cache().last());
    }
}
