//! Ordered sequences of visited coordinates.

use thiserror::Error;

use crate::Coordinate;

/// Errors returned when building a [`Route`] from raw points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route needs at least its source point.
    #[error("route must contain at least one point")]
    Empty,
}

/// A route from a source through zero or more fuel stops.
///
/// The first point is always the source. When the route is complete the last
/// point is the destination.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{Coordinate, Route};
///
/// # fn main() -> Result<(), fuelroute_core::CoordinateError> {
/// let mut route = Route::starting_at(Coordinate::new(0.0, 0.0)?);
/// route.push(Coordinate::new(0.0, 1.0)?);
/// assert_eq!(route.len(), 2);
/// assert_eq!(route.legs().count(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<Coordinate>", into = "Vec<Coordinate>")
)]
pub struct Route {
    points: Vec<Coordinate>,
}

impl Route {
    /// Start a route at `source`.
    #[must_use]
    pub fn starting_at(source: Coordinate) -> Self {
        Self {
            points: vec![source],
        }
    }

    /// Append the next visited point.
    pub fn push(&mut self, point: Coordinate) {
        self.points.push(point);
    }

    /// All points in traversal order.
    #[must_use]
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// The trip source.
    #[must_use]
    pub fn source(&self) -> Coordinate {
        self.points[0]
    }

    /// The most recently visited point.
    #[must_use]
    pub fn last(&self) -> Coordinate {
        self.points[self.points.len() - 1]
    }

    /// Consecutive `(from, to)` pairs.
    pub fn legs(&self) -> impl Iterator<Item = (Coordinate, Coordinate)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Number of points, source included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the last point equals `destination`.
    #[must_use]
    pub fn ends_at(&self, destination: Coordinate) -> bool {
        self.last() == destination
    }
}

impl TryFrom<Vec<Coordinate>> for Route {
    type Error = RouteError;

    fn try_from(points: Vec<Coordinate>) -> Result<Self, Self::Error> {
        if points.is_empty() {
            return Err(RouteError::Empty);
        }
        Ok(Self { points })
    }
}

impl From<Route> for Vec<Coordinate> {
    fn from(route: Route) -> Self {
        route.points
    }
}

/// Outcome of route construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RouteStatus {
    /// The route ends at the destination.
    Complete,
    /// Planning stopped at the last reachable stop.
    Incomplete,
}

impl RouteStatus {
    /// Whether the status is [`RouteStatus::Complete`].
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}
