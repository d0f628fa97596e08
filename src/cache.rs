//! Last-result cache.
//!
//! [`ResultCache`] keeps the most recent [`RateCalculation`] so a client can
//! re-display it without recomputing. It is an explicit value owned by the
//! caller (the HTTP layer shares one through its state), guarded by a
//! read-write lock, and can be persisted to a JSON file.

use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::RateCalculation;

/// A cached calculation and when it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedResult {
    /// When the calculation entered the cache.
    pub stored_at: DateTime<Utc>,
    /// The cached calculation.
    pub calculation: RateCalculation,
}

/// Single-slot cache holding the last rate calculation.
///
/// Each [`store`](ResultCache::store) replaces the previous entry. A poisoned
/// lock is recovered rather than propagated; the slot only ever holds a
/// complete value.
///
/// # Example
///
/// ```
/// use tjm_engine::cache::ResultCache;
///
/// let cache = ResultCache::new();
/// assert!(cache.last().is_none());
/// ```
#[derive(Debug, Default)]
pub struct ResultCache {
    slot: RwLock<Option<CachedResult>>,
}

impl ResultCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached calculation.
    pub fn store(&self, calculation: RateCalculation) {
        let entry = CachedResult {
            stored_at: Utc::now(),
            calculation,
        };
        debug!(
            calculation_id = %entry.calculation.calculation_id,
            "Caching rate calculation"
        );
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(entry);
    }

    /// Returns a copy of the cached entry, if any.
    pub fn last(&self) -> Option<CachedResult> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Empties the cache.
    pub fn clear(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// `true` if nothing has been stored yet (or the cache was cleared).
    pub fn is_empty(&self) -> bool {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// Writes the cached entry to `path` as JSON.
    ///
    /// Does nothing when the cache is empty.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CacheIo`] if the file cannot be written.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> EngineResult<()> {
        let path = path.as_ref();
        let Some(entry) = self.last() else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&entry).map_err(|e| cache_io(path, e))?;
        fs::write(path, json).map_err(|e| cache_io(path, e))?;
        debug!(path = %path.display(), "Saved result cache");
        Ok(())
    }

    /// Loads a cache previously written by [`save_to`](ResultCache::save_to).
    ///
    /// A missing file yields an empty cache.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::CacheIo`] if the file exists but cannot be read
    /// or does not hold a cached calculation.
    pub fn load_from<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path).map_err(|e| cache_io(path, e))?;
        let entry: CachedResult = serde_json::from_str(&content).map_err(|e| cache_io(path, e))?;
        Ok(Self {
            slot: RwLock::new(Some(entry)),
        })
    }

    /// Like [`load_from`](ResultCache::load_from), but an unreadable or corrupt
    /// file is logged and yields an empty cache.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        Self::load_from(&path).unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unusable result cache file");
            Self::new()
        })
    }
}

fn cache_io(path: &Path, error: impl std::fmt::Display) -> EngineError {
    EngineError::CacheIo {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
