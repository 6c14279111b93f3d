//! Greedy choice of the next refuelling stop.

use fuelroute_core::{CatalogSnapshot, Coordinate, FuelStop, distance_miles};
use thiserror::Error;

/// No stop is both reachable and closer to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("no fuel stop within {range_miles} miles of {from} makes progress towards the destination")]
pub struct NoReachableStop {
    /// Position the search started from.
    pub from: Coordinate,
    /// Range used for the search.
    pub range_miles: f64,
}

/// Pick the cheapest stop reachable from `current` that is strictly closer
/// to `destination` than `current` is.
///
/// A stop qualifies when it lies within `range_miles` of `current` and its
/// distance to `destination` is smaller than the distance from `current`.
/// Among qualifying stops the lowest price wins; ties go to the stop that
/// appears first in `snapshot`.
///
/// # Errors
///
/// Returns [`NoReachableStop`] when no stop qualifies.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{CatalogSnapshot, Coordinate};
/// use fuelroute_core::test_support::stop;
/// use fuelroute_planner::select_next_stop;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let snapshot = CatalogSnapshot::new(vec![
///     stop(1, 0.0, 1.0, 320),
///     stop(2, 0.0, 2.0, 300),
/// ]);
/// let current = Coordinate::new(0.0, 0.0)?;
/// let destination = Coordinate::new(0.0, 5.0)?;
/// let chosen = select_next_stop(current, destination, 200.0, &snapshot)?;
/// assert_eq!(chosen.id, 2);
/// # Ok(())
/// # }
/// ```
pub fn select_next_stop(
    current: Coordinate,
    destination: Coordinate,
    range_miles: f64,
    snapshot: &CatalogSnapshot,
) -> Result<&FuelStop, NoReachableStop> {
    let remaining = distance_miles(current, destination);
    snapshot
        .stops()
        .iter()
        .filter(|stop| {
            distance_miles(current, stop.location) <= range_miles
                && distance_miles(stop.location, destination) < remaining
        })
        // `min_by_key` keeps the first of several equal minima.
        .min_by_key(|stop| stop.price)
        .ok_or(NoReachableStop {
            from: current,
            range_miles,
        })
}
