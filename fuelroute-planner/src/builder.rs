//! Leg-by-leg route construction.

use fuelroute_core::{CatalogSnapshot, Coordinate, Route, RouteStatus, distance_miles};

use crate::selector::select_next_stop;

/// Build a route from `source` towards `destination` through catalog stops.
///
/// Starting at `source`, the destination is appended as soon as it lies
/// within `range_miles`; otherwise the cheapest qualifying stop is appended
/// and the search continues from there. When no stop qualifies the route is
/// returned as [`RouteStatus::Incomplete`], ending at the last stop reached.
///
/// Every appended stop is strictly closer to the destination than the point
/// before it, so the loop visits each stop at most once.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{CatalogSnapshot, Coordinate, RouteStatus};
/// use fuelroute_planner::build_route;
///
/// # fn main() -> Result<(), fuelroute_core::CoordinateError> {
/// let source = Coordinate::new(0.0, 0.0)?;
/// let destination = Coordinate::new(0.0, 1.0)?;
/// let (route, status) = build_route(source, destination, 500.0, &CatalogSnapshot::default());
/// assert_eq!(status, RouteStatus::Complete);
/// assert_eq!(route.points(), &[source, destination]);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn build_route(
    source: Coordinate,
    destination: Coordinate,
    range_miles: f64,
    snapshot: &CatalogSnapshot,
) -> (Route, RouteStatus) {
    let mut route = Route::starting_at(source);
    loop {
        let current = route.last();
        if distance_miles(current, destination) <= range_miles {
            route.push(destination);
            log::debug!("destination {destination} within range of {current}");
            return (route, RouteStatus::Complete);
        }
        match select_next_stop(current, destination, range_miles, snapshot) {
            Ok(stop) => {
                log::debug!(
                    "selected fuel stop {} ({}) at {} for {}",
                    stop.id,
                    stop.name,
                    stop.location,
                    stop.price
                );
                route.push(stop.location);
            }
            Err(err) => {
                log::warn!("route to {destination} incomplete: {err}");
                return (route, RouteStatus::Incomplete);
            }
        }
    }
}
