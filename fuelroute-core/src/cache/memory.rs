//! In-process route cache.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, SystemTime};

use super::{CacheError, CacheKey, Clock, RouteCache, SystemClock};
use crate::PlanResult;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: PlanResult,
    expires_at: SystemTime,
}

/// In-process [`RouteCache`] guarded by a read-write lock.
///
/// Expired entries are dropped lazily on lookup or in bulk through
/// [`MemoryRouteCache::purge_expired`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use fuelroute_core::{CacheKey, Coordinate, MemoryRouteCache, RouteCache};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let cache = MemoryRouteCache::new();
/// let key = CacheKey::new(Coordinate::new(0.0, 0.0)?, Coordinate::new(1.0, 1.0)?, 3);
/// assert!(cache.get(&key)?.is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MemoryRouteCache<C = SystemClock> {
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    clock: C,
}

impl MemoryRouteCache {
    /// An empty cache reading the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for MemoryRouteCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> MemoryRouteCache<C> {
    /// An empty cache reading time from `clock`.
    pub fn with_clock(clock: C) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> Result<usize, CacheError> {
        self.entries
            .read()
            .map(|entries| entries.len())
            .map_err(|_| poisoned())
    }

    /// Whether no entries are stored.
    pub fn is_empty(&self) -> Result<bool, CacheError> {
        self.len().map(|len| len == 0)
    }

    /// Drop every expired entry and return how many were removed.
    pub fn purge_expired(&self) -> Result<usize, CacheError> {
        let now = self.clock.now();
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        Ok(before - entries.len())
    }
}

impl<C: Clock> RouteCache for MemoryRouteCache<C> {
    fn get(&self, key: &CacheKey) -> Result<Option<PlanResult>, CacheError> {
        let now = self.clock.now();
        {
            let entries = self.entries.read().map_err(|_| poisoned())?;
            match entries.get(key) {
                None => return Ok(None),
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.value.clone())),
                Some(_) => {}
            }
        }
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        // Another writer may have refreshed the entry since the read lock was released.
        if entries.get(key).is_some_and(|entry| entry.expires_at <= now) {
            entries.remove(key);
            log::debug!("evicted expired route cache entry {key}");
        }
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.value.clone()))
    }

    fn put(&self, key: &CacheKey, value: &PlanResult, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = self
            .clock
            .now()
            .checked_add(ttl)
            .ok_or(CacheError::TtlOverflow { ttl })?;
        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.insert(
            key.clone(),
            CacheEntry {
                value: value.clone(),
                expires_at,
            },
        );
        Ok(())
    }
}

fn poisoned() -> CacheError {
    CacheError::unavailable("route cache lock poisoned")
}
