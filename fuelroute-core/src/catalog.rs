//! Access to the set of known fuel stops.
//!
//! The planner reads the catalog exactly once per planning call and works
//! against the resulting [`CatalogSnapshot`] for the rest of that call.

use thiserror::Error;

use crate::{Coordinate, FuelStop};

/// Errors raised by [`FuelStopCatalog`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The backing store could not be read.
    #[error("fuel stop catalog unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure.
        message: String,
    },
}

impl CatalogError {
    /// Build an [`CatalogError::Unavailable`] from any displayable cause.
    pub fn unavailable(cause: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            message: cause.to_string(),
        }
    }
}

/// Read access to every known fuel stop.
///
/// Implementations must return stops in a stable order: the planner breaks
/// price ties by taking the first stop in that order.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{CatalogError, FuelStop, FuelStopCatalog};
///
/// struct EmptyCatalog;
///
/// impl FuelStopCatalog for EmptyCatalog {
///     fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError> {
///         Ok(Vec::new())
///     }
/// }
///
/// assert!(EmptyCatalog.list_fuel_stops().unwrap().is_empty());
/// ```
pub trait FuelStopCatalog: Send + Sync {
    /// Return all stops in catalog order.
    fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError>;
}

impl<T: FuelStopCatalog + ?Sized> FuelStopCatalog for &T {
    fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError> {
        (**self).list_fuel_stops()
    }
}

impl<T: FuelStopCatalog + ?Sized> FuelStopCatalog for Box<T> {
    fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError> {
        (**self).list_fuel_stops()
    }
}

/// Stops captured from a catalog for a single planning call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogSnapshot {
    stops: Vec<FuelStop>,
}

impl CatalogSnapshot {
    /// Wrap an already materialised list of stops.
    #[must_use]
    pub fn new(stops: Vec<FuelStop>) -> Self {
        Self { stops }
    }

    /// Read every stop from `catalog` once.
    pub fn capture<C>(catalog: &C) -> Result<Self, CatalogError>
    where
        C: FuelStopCatalog + ?Sized,
    {
        catalog.list_fuel_stops().map(Self::new)
    }

    /// Stops in catalog order.
    #[must_use]
    pub fn stops(&self) -> &[FuelStop] {
        &self.stops
    }

    /// Number of stops captured.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether the snapshot holds no stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// The first stop located exactly at `location`.
    #[must_use]
    pub fn stop_at(&self, location: Coordinate) -> Option<&FuelStop> {
        self.stops.iter().find(|stop| stop.location == location)
    }
}

impl FromIterator<FuelStop> for CatalogSnapshot {
    fn from_iter<I: IntoIterator<Item = FuelStop>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
