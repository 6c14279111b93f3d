//! Core domain types for the fuel route planner.
//!
//! This crate defines the validated value types ([`Coordinate`],
//! [`UnitPrice`], [`Route`]), the geodesic distance function and the seams
//! planners depend on: [`FuelStopCatalog`] for reading fuel stops,
//! [`RouteCache`] for memoising results and [`Planner`] for the planning
//! entry point. Constructors return `Result` so invalid input is rejected
//! before it reaches the planning loop.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cache;
mod catalog;
mod coordinate;
mod distance;
mod fuel_stop;
mod plan;
mod price;
mod route;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cache::{
    CacheError, CacheKey, Clock, DEFAULT_KEY_PRECISION, DEFAULT_TTL, DisabledRouteCache,
    MAX_KEY_PRECISION, MemoryRouteCache, RouteCache, SystemClock,
};
pub use catalog::{CatalogError, CatalogSnapshot, FuelStopCatalog};
pub use coordinate::{Coordinate, CoordinateError};
pub use distance::{METRES_PER_MILE, distance_miles};
pub use fuel_stop::FuelStop;
pub use plan::{DEFAULT_RANGE_MILES, LegCost, PlanError, PlanRequest, PlanResult, Planner};
pub use price::{PriceError, UnitPrice};
pub use route::{Route, RouteError, RouteStatus};
