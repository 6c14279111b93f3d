//! SQLite-backed route cache shared across processes.

use std::fmt;
use std::sync::Mutex;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use camino::{Utf8Path, Utf8PathBuf};
use fuelroute_core::{CacheError, CacheKey, Clock, PlanResult, RouteCache, SystemClock};
use rusqlite::{Connection, OptionalExtension};
use thiserror::Error;

use crate::fs::ensure_parent_dir;

/// Error raised when opening a SQLite route cache.
#[derive(Debug, Error)]
pub enum RouteCacheStoreError {
    /// Failed to create the parent directory for the cache database.
    #[error("failed to create parent directory for {path:?}")]
    CreateDirectory {
        /// Cache database path.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open route cache at {path:?}")]
    Open {
        /// Cache database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Creating the `route_cache` table failed.
    #[error("failed to create route_cache table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// [`RouteCache`] persisting JSON encoded results in a `route_cache` table.
///
/// Expiry instants are stored as whole Unix seconds. Expired rows are
/// deleted when a lookup finds them.
pub struct SqliteRouteCache<C = SystemClock> {
    path: Utf8PathBuf,
    connection: Mutex<Connection>,
    clock: C,
}

impl<C> fmt::Debug for SqliteRouteCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRouteCache")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteRouteCache {
    /// Open or create the cache database, reading the system clock.
    pub fn open(path: &Utf8Path) -> Result<Self, RouteCacheStoreError> {
        Self::open_with_clock(path, SystemClock)
    }
}

impl<C: Clock> SqliteRouteCache<C> {
    /// Open or create the cache database, reading time from `clock`.
    pub fn open_with_clock(path: &Utf8Path, clock: C) -> Result<Self, RouteCacheStoreError> {
        ensure_parent_dir(path).map_err(|source| RouteCacheStoreError::CreateDirectory {
            path: path.to_path_buf(),
            source,
        })?;
        let connection =
            Connection::open(path.as_std_path()).map_err(|source| RouteCacheStoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        connection
            .execute(
                "CREATE TABLE IF NOT EXISTS route_cache (
                    key TEXT PRIMARY KEY,
                    payload TEXT NOT NULL,
                    expires_at INTEGER NOT NULL
                )",
                [],
            )
            .map_err(|source| RouteCacheStoreError::CreateSchema { source })?;
        Ok(Self {
            path: path.to_path_buf(),
            connection: Mutex::new(connection),
            clock,
        })
    }

    /// Location of the backing database.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn now_secs(&self) -> Result<i64, CacheError> {
        unix_secs(self.clock.now())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, CacheError> {
        self.connection
            .lock()
            .map_err(|_| CacheError::unavailable("route cache connection lock poisoned"))
    }
}

fn unix_secs(instant: SystemTime) -> Result<i64, CacheError> {
    let elapsed = instant
        .duration_since(UNIX_EPOCH)
        .map_err(CacheError::unavailable)?;
    i64::try_from(elapsed.as_secs()).map_err(CacheError::unavailable)
}

impl<C: Clock> RouteCache for SqliteRouteCache<C> {
    fn get(&self, key: &CacheKey) -> Result<Option<PlanResult>, CacheError> {
        let now = self.now_secs()?;
        let connection = self.lock()?;
        let row: Option<(String, i64)> = connection
            .query_row(
                "SELECT payload, expires_at FROM route_cache WHERE key = ?1",
                [key.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()
            .map_err(CacheError::unavailable)?;

        match row {
            Some((payload, expires_at)) if expires_at > now => serde_json::from_str(&payload)
                .map(Some)
                .map_err(CacheError::unavailable),
            Some(_) => {
                connection
                    .execute("DELETE FROM route_cache WHERE key = ?1", [key.as_str()])
                    .map_err(CacheError::unavailable)?;
                log::debug!("evicted expired cache entry {key}");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn put(&self, key: &CacheKey, value: &PlanResult, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = self
            .clock
            .now()
            .checked_add(ttl)
            .ok_or(CacheError::TtlOverflow { ttl })
            .and_then(unix_secs)?;
        let payload = serde_json::to_string(value).map_err(CacheError::unavailable)?;
        self.lock()?
            .execute(
                "INSERT OR REPLACE INTO route_cache (key, payload, expires_at)
                 VALUES (?1, ?2, ?3)",
                (key.as_str(), payload, expires_at),
            )
            .map(|_| ())
            .map_err(CacheError::unavailable)
    }
}
