//! `GreedyPlanner` wiring the catalog, cache, builder and accountant.

use std::time::Duration;

use fuelroute_core::{
    CacheKey, CatalogSnapshot, Coordinate, DEFAULT_KEY_PRECISION, DEFAULT_RANGE_MILES,
    DEFAULT_TTL, FuelStopCatalog, PlanError, PlanRequest, PlanResult, Planner, RouteCache,
};

use crate::accountant::{CostAccountant, DEFAULT_MILES_PER_UNIT, SourceLegPricing};
use crate::builder::build_route;

/// Configuration for [`GreedyPlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Decimal digits kept when normalising coordinates into cache keys.
    pub cache_precision: u32,
    /// Lifetime of cached results.
    pub cache_ttl: Duration,
    /// Whether incomplete routes are cached alongside complete ones.
    pub cache_incomplete: bool,
    /// Consumption rate in miles per fuel unit.
    pub miles_per_unit: f64,
    /// Pricing policy for the leg leaving the source.
    pub source_leg: SourceLegPricing,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cache_precision: DEFAULT_KEY_PRECISION,
            cache_ttl: DEFAULT_TTL,
            cache_incomplete: false,
            miles_per_unit: DEFAULT_MILES_PER_UNIT,
            source_leg: SourceLegPricing::default(),
        }
    }
}

impl PlannerConfig {
    /// Replace the cache key precision. Values above
    /// [`MAX_KEY_PRECISION`](fuelroute_core::MAX_KEY_PRECISION) are clamped.
    #[must_use]
    pub const fn with_cache_precision(mut self, precision: u32) -> Self {
        self.cache_precision = precision;
        self
    }

    /// Replace the cache lifetime.
    #[must_use]
    pub const fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Cache incomplete routes too.
    #[must_use]
    pub const fn with_cache_incomplete(mut self, enabled: bool) -> Self {
        self.cache_incomplete = enabled;
        self
    }

    /// Replace the consumption rate.
    #[must_use]
    pub const fn with_miles_per_unit(mut self, miles_per_unit: f64) -> Self {
        self.miles_per_unit = miles_per_unit;
        self
    }

    /// Replace the source-leg pricing policy.
    #[must_use]
    pub const fn with_source_leg(mut self, policy: SourceLegPricing) -> Self {
        self.source_leg = policy;
        self
    }

    fn validate(&self) -> Result<(), PlanError> {
        if self.miles_per_unit.is_finite() && self.miles_per_unit > 0.0 {
            Ok(())
        } else {
            Err(PlanError::InvalidConsumptionRate(self.miles_per_unit))
        }
    }
}

/// Greedy cheapest-reachable-stop planner.
///
/// Each call consults the cache first. On a miss it reads the catalog once,
/// builds the route leg by leg, prices it and stores the result. Cache
/// failures are logged and never fail the call.
///
/// # Examples
///
/// ```
/// use fuelroute_core::test_support::MemoryCatalog;
/// use fuelroute_core::{Coordinate, MemoryRouteCache};
/// use fuelroute_planner::GreedyPlanner;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let planner = GreedyPlanner::new(MemoryCatalog::default(), MemoryRouteCache::new());
/// let result = planner.plan_route(
///     Coordinate::new(0.0, 0.0)?,
///     Coordinate::new(0.0, 1.0)?,
///     500.0,
/// )?;
/// assert!(result.is_complete());
/// assert_eq!(result.route.len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GreedyPlanner<S, K>
where
    S: FuelStopCatalog,
    K: RouteCache,
{
    catalog: S,
    cache: K,
    config: PlannerConfig,
}

impl<S, K> GreedyPlanner<S, K>
where
    S: FuelStopCatalog,
    K: RouteCache,
{
    /// Construct a planner using default configuration.
    pub fn new(catalog: S, cache: K) -> Self {
        Self::with_config(catalog, cache, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(catalog: S, cache: K, config: PlannerConfig) -> Self {
        Self {
            catalog,
            cache,
            config,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The catalog planning reads from.
    #[must_use]
    pub const fn catalog(&self) -> &S {
        &self.catalog
    }

    /// The cache results are stored in.
    #[must_use]
    pub const fn cache(&self) -> &K {
        &self.cache
    }

    /// Plan a route between two points with the given range.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::InvalidRange`] for a non-positive or non-finite
    /// range, [`PlanError::InvalidConsumptionRate`] for a bad configuration
    /// and [`PlanError::CatalogUnavailable`] when the catalog cannot be read.
    pub fn plan_route(
        &self,
        source: Coordinate,
        destination: Coordinate,
        range_miles: f64,
    ) -> Result<PlanResult, PlanError> {
        self.plan(&PlanRequest::new(source, destination).with_range(range_miles))
    }

    fn cache_key(&self, request: &PlanRequest) -> CacheKey {
        let key = CacheKey::new(
            request.source,
            request.destination,
            self.config.cache_precision,
        );
        if request.range_miles.total_cmp(&DEFAULT_RANGE_MILES).is_eq() {
            key
        } else {
            key.with_suffix(format_args!("range_{}", request.range_miles))
        }
    }

    fn cached(&self, key: &CacheKey) -> Option<PlanResult> {
        match self.cache.get(key) {
            Ok(Some(result)) => {
                log::info!("route cache hit for {key}");
                Some(result)
            }
            Ok(None) => {
                log::info!("route cache miss for {key}");
                None
            }
            Err(err) => {
                log::warn!("route cache lookup failed for {key}, planning afresh: {err}");
                None
            }
        }
    }

    fn store(&self, key: &CacheKey, result: &PlanResult) {
        if !result.is_complete() && !self.config.cache_incomplete {
            log::debug!("not caching incomplete route for {key}");
            return;
        }
        if let Err(err) = self.cache.put(key, result, self.config.cache_ttl) {
            log::warn!("failed to cache route for {key}: {err}");
        }
    }
}

impl<S, K> Planner for GreedyPlanner<S, K>
where
    S: FuelStopCatalog,
    K: RouteCache,
{
    fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
        request.validate()?;
        self.config.validate()?;

        let key = self.cache_key(request);
        if let Some(result) = self.cached(&key) {
            return Ok(result);
        }

        let snapshot =
            CatalogSnapshot::capture(&self.catalog).map_err(PlanError::CatalogUnavailable)?;
        let (route, status) = build_route(
            request.source,
            request.destination,
            request.range_miles,
            &snapshot,
        );
        let accountant = CostAccountant::new(self.config.miles_per_unit, self.config.source_leg);
        let totals = accountant.account(&route, status, &snapshot);
        let result = PlanResult {
            route,
            status,
            legs: totals.legs,
            total_fuel_volume: totals.total_fuel_volume,
            total_fuel_cost: totals.total_fuel_cost,
        };
        log::info!(
            "planned {} route with {} legs from {} to {}",
            if result.is_complete() {
                "complete"
            } else {
                "incomplete"
            },
            result.legs.len(),
            request.source,
            request.destination
        );

        self.store(&key, &result);
        Ok(result)
    }
}
