//! Data access and ingestion for the fuel route planner.
//!
//! Responsibilities:
//! - Read fuel stop price lists from CSV.
//! - Persist fuel stops to a SQLite artefact and serve them back as a
//!   [`fuelroute_core::FuelStopCatalog`].
//! - Provide a SQLite-backed [`fuelroute_core::RouteCache`] shared across
//!   processes.
//!
//! Boundaries:
//! - Do not encode planning rules (live in `fuelroute-planner`).
//!
//! Invariants:
//! - Catalog order is ascending catalog id, which matches CSV row order.
//! - No global mutable state.

mod cache;
mod catalog;
mod fs;
mod ingest;

pub use cache::{RouteCacheStoreError, SqliteRouteCache};
pub use catalog::{CatalogStoreError, SqliteFuelStopCatalog};
pub use fs::file_is_file;
pub use ingest::{
    FuelStopRecord, IngestError, PersistStopsError, persist_fuel_stops_to_sqlite,
    read_fuel_stops, read_fuel_stops_csv,
};
