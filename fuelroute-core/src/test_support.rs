//! Test-only catalogs, caches and clocks.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};

use crate::{
    CacheError, CacheKey, CatalogError, Clock, Coordinate, FuelStop, FuelStopCatalog, PlanResult,
    Route, RouteCache, RouteStatus, UnitPrice,
};

/// Construct a [`FuelStop`] named after its id.
///
/// # Panics
///
/// Panics when the coordinate is out of range.
///
/// # Examples
/// ```rust
/// use fuelroute_core::test_support::stop;
///
/// let stop = stop(3, 32.0, -100.0, 315);
/// assert_eq!(stop.name, "Stop 3");
/// assert_eq!(stop.price.cents(), 315);
/// ```
#[must_use]
pub fn stop(id: u64, latitude: f64, longitude: f64, cents: u32) -> FuelStop {
    let location = Coordinate::new(latitude, longitude)
        .unwrap_or_else(|err| panic!("test stop {id} has an invalid location: {err}"));
    FuelStop::new(
        id,
        format!("Stop {id}"),
        location,
        UnitPrice::from_cents(cents),
    )
}

/// A small complete [`PlanResult`] for cache tests.
#[must_use]
pub fn plan_result() -> PlanResult {
    let source = Coordinate::new(1.0, 2.0).unwrap_or_else(|err| panic!("{err}"));
    let destination = Coordinate::new(1.5, 2.5).unwrap_or_else(|err| panic!("{err}"));
    let mut route = Route::starting_at(source);
    route.push(destination);
    PlanResult {
        route,
        status: RouteStatus::Complete,
        legs: Vec::new(),
        total_fuel_volume: 4.5,
        total_fuel_cost: 0.0,
    }
}

/// In-memory [`FuelStopCatalog`] returning stops in insertion order.
#[derive(Debug, Default, Clone)]
pub struct MemoryCatalog {
    stops: Vec<FuelStop>,
}

impl MemoryCatalog {
    /// Create a catalog from a collection of stops.
    pub fn with_stops<I>(stops: I) -> Self
    where
        I: IntoIterator<Item = FuelStop>,
    {
        Self {
            stops: stops.into_iter().collect(),
        }
    }
}

impl FuelStopCatalog for MemoryCatalog {
    fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError> {
        Ok(self.stops.clone())
    }
}

/// A [`FuelStopCatalog`] that always fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCatalog;

impl FuelStopCatalog for FailingCatalog {
    fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError> {
        Err(CatalogError::unavailable("catalog offline"))
    }
}

/// Wraps a catalog and counts how often it is read.
#[derive(Debug, Default)]
pub struct CountingCatalog<C> {
    inner: C,
    reads: AtomicUsize,
}

impl<C> CountingCatalog<C> {
    /// Wrap `inner`.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of `list_fuel_stops` calls observed so far.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl<C: FuelStopCatalog> FuelStopCatalog for CountingCatalog<C> {
    fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.list_fuel_stops()
    }
}

/// A [`RouteCache`] whose every operation fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingRouteCache;

impl RouteCache for FailingRouteCache {
    fn get(&self, _key: &CacheKey) -> Result<Option<PlanResult>, CacheError> {
        Err(CacheError::unavailable("cache offline"))
    }

    fn put(&self, _key: &CacheKey, _value: &PlanResult, _ttl: Duration) -> Result<(), CacheError> {
        Err(CacheError::unavailable("cache offline"))
    }
}

/// A [`Clock`] that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<SystemTime>,
}

impl ManualClock {
    /// A clock frozen at `start`.
    pub fn starting_at(start: SystemTime) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *now += step;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self
            .now
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
