//! Facade crate for the fuel route planner.
//!
//! This crate re-exports the core domain types and exposes the greedy
//! planner and the SQLite-backed catalog and cache behind feature flags.

#![forbid(unsafe_code)]

pub use fuelroute_core::{
    CacheError, CacheKey, CatalogError, CatalogSnapshot, Clock, Coordinate, CoordinateError,
    DEFAULT_RANGE_MILES, DEFAULT_TTL, DisabledRouteCache, FuelStop, FuelStopCatalog, LegCost,
    MemoryRouteCache, PlanError, PlanRequest, PlanResult, Planner, Route, RouteCache, RouteStatus,
    SystemClock, UnitPrice, distance_miles,
};

#[cfg(feature = "planner")]
pub use fuelroute_planner::{GreedyPlanner, PlannerConfig, SourceLegPricing};

#[cfg(feature = "store-sqlite")]
pub use fuelroute_data::{
    CatalogStoreError, IngestError, PersistStopsError, RouteCacheStoreError,
    SqliteFuelStopCatalog, SqliteRouteCache, persist_fuel_stops_to_sqlite, read_fuel_stops_csv,
};
