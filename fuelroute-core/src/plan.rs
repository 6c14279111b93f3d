//! Planning requests, results and the [`Planner`] trait.

use thiserror::Error;

use crate::{CatalogError, Coordinate, CoordinateError, Route, RouteStatus, UnitPrice};

/// Default maximum distance in miles a vehicle covers on one tank.
pub const DEFAULT_RANGE_MILES: f64 = 500.0;

/// Parameters for a planning call.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{DEFAULT_RANGE_MILES, PlanRequest};
///
/// # fn main() -> Result<(), fuelroute_core::PlanError> {
/// let request = PlanRequest::from_text("32.715736,-117.161087", "34.052235,-95.08503")?;
/// assert_eq!(request.range_miles, DEFAULT_RANGE_MILES);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    /// Trip start.
    pub source: Coordinate,
    /// Trip end.
    pub destination: Coordinate,
    /// Maximum miles per tank.
    pub range_miles: f64,
}

impl PlanRequest {
    /// Request with the default range.
    #[must_use]
    pub const fn new(source: Coordinate, destination: Coordinate) -> Self {
        Self {
            source,
            destination,
            range_miles: DEFAULT_RANGE_MILES,
        }
    }

    /// Replace the vehicle range.
    #[must_use]
    pub const fn with_range(mut self, range_miles: f64) -> Self {
        self.range_miles = range_miles;
        self
    }

    /// Parse both endpoints from `lat,lon` text.
    pub fn from_text(source: &str, destination: &str) -> Result<Self, PlanError> {
        Ok(Self::new(source.parse()?, destination.parse()?))
    }

    /// Reject ranges that are not finite and positive.
    pub fn validate(&self) -> Result<(), PlanError> {
        if self.range_miles.is_finite() && self.range_miles > 0.0 {
            Ok(())
        } else {
            Err(PlanError::InvalidRange(self.range_miles))
        }
    }
}

/// Cost breakdown for a single leg.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegCost {
    /// Leg start.
    pub from: Coordinate,
    /// Leg end.
    pub to: Coordinate,
    /// Geodesic length in miles.
    pub distance_miles: f64,
    /// Fuel units consumed.
    pub fuel_volume: f64,
    /// Currency spent on the consumed fuel.
    pub fuel_cost: f64,
    /// Price applied to the leg, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub unit_price: Option<UnitPrice>,
}

/// A planned route with its fuel totals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResult {
    /// Visited points, source first.
    pub route: Route,
    /// Whether the route reaches the destination.
    pub status: RouteStatus,
    /// Per-leg breakdown in traversal order.
    pub legs: Vec<LegCost>,
    /// Fuel units consumed across all legs.
    pub total_fuel_volume: f64,
    /// Currency spent across all legs.
    pub total_fuel_cost: f64,
}

impl PlanResult {
    /// Whether the route reaches the destination.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.status.is_complete()
    }
}

/// Errors returned by [`Planner::plan`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// An endpoint failed validation.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(#[from] CoordinateError),
    /// The range was not a finite positive number of miles.
    #[error("range must be a finite positive number of miles, got {0}")]
    InvalidRange(f64),
    /// The consumption rate was not a finite positive number.
    #[error("consumption rate must be a finite positive number of miles per unit, got {0}")]
    InvalidConsumptionRate(f64),
    /// The catalog could not be read.
    #[error("fuel stop catalog unavailable")]
    CatalogUnavailable(#[source] CatalogError),
}

/// Plan a fuelled route for a request.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{
///     Coordinate, PlanError, PlanRequest, PlanResult, Planner, Route, RouteStatus,
/// };
///
/// struct DirectPlanner;
///
/// impl Planner for DirectPlanner {
///     fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError> {
///         request.validate()?;
///         let mut route = Route::starting_at(request.source);
///         route.push(request.destination);
///         Ok(PlanResult {
///             route,
///             status: RouteStatus::Complete,
///             legs: Vec::new(),
///             total_fuel_volume: 0.0,
///             total_fuel_cost: 0.0,
///         })
///     }
/// }
///
/// # fn main() -> Result<(), PlanError> {
/// let request = PlanRequest::new(Coordinate::new(0.0, 0.0)?, Coordinate::new(0.0, 1.0)?);
/// assert!(DirectPlanner.plan(&request)?.is_complete());
/// # Ok(())
/// # }
/// ```
pub trait Planner: Send + Sync {
    /// Plan a route for `request`.
    fn plan(&self, request: &PlanRequest) -> Result<PlanResult, PlanError>;
}
