//! Result caching for planned routes.
//!
//! A [`RouteCache`] maps a [`CacheKey`] to a previously computed
//! [`PlanResult`] until the entry's time-to-live elapses. Caches never affect
//! correctness: callers treat every [`CacheError`] as a miss.

use std::time::Duration;

use thiserror::Error;

use crate::PlanResult;

mod clock;
mod key;
mod memory;

pub use clock::{Clock, SystemClock};
pub use key::{CacheKey, DEFAULT_KEY_PRECISION, MAX_KEY_PRECISION};
pub use memory::MemoryRouteCache;

/// Default lifetime of a cached result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Errors raised by [`RouteCache`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The backing store could not be read or written.
    #[error("route cache unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure.
        message: String,
    },
    /// The expiry instant could not be represented.
    #[error("time-to-live {ttl:?} overflows the clock")]
    TtlOverflow {
        /// The rejected time-to-live.
        ttl: Duration,
    },
}

impl CacheError {
    /// Build an [`CacheError::Unavailable`] from any displayable cause.
    pub fn unavailable(cause: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: cause.to_string(),
        }
    }
}

/// Key-value store for planned routes with per-entry expiry.
pub trait RouteCache: Send + Sync {
    /// Fetch a live entry. Expired entries are reported as absent.
    fn get(&self, key: &CacheKey) -> Result<Option<PlanResult>, CacheError>;

    /// Store `value` for `ttl`, replacing any existing entry.
    fn put(&self, key: &CacheKey, value: &PlanResult, ttl: Duration) -> Result<(), CacheError>;
}

impl<T: RouteCache + ?Sized> RouteCache for &T {
    fn get(&self, key: &CacheKey) -> Result<Option<PlanResult>, CacheError> {
        (**self).get(key)
    }

    fn put(&self, key: &CacheKey, value: &PlanResult, ttl: Duration) -> Result<(), CacheError> {
        (**self).put(key, value, ttl)
    }
}

impl<T: RouteCache + ?Sized> RouteCache for Box<T> {
    fn get(&self, key: &CacheKey) -> Result<Option<PlanResult>, CacheError> {
        (**self).get(key)
    }

    fn put(&self, key: &CacheKey, value: &PlanResult, ttl: Duration) -> Result<(), CacheError> {
        (**self).put(key, value, ttl)
    }
}

/// A cache that stores nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledRouteCache;

impl RouteCache for DisabledRouteCache {
    fn get(&self, _key: &CacheKey) -> Result<Option<PlanResult>, CacheError> {
        Ok(None)
    }

    fn put(&self, _key: &CacheKey, _value: &PlanResult, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }
}
