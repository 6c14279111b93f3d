//! Geodesic distances between coordinates, in miles.

use geo::{Distance, Geodesic};

use crate::Coordinate;

/// Metres in one statute mile.
pub const METRES_PER_MILE: f64 = 1_609.344;

/// Distance in miles along the WGS84 ellipsoid between `a` and `b`.
///
/// The result is symmetric bit-for-bit: both argument orders evaluate the
/// geodesic in the same direction.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{Coordinate, distance_miles};
///
/// # fn main() -> Result<(), fuelroute_core::CoordinateError> {
/// let a = Coordinate::new(32.715736, -117.161087)?;
/// let b = Coordinate::new(34.052235, -95.08503)?;
/// assert_eq!(distance_miles(a, b), distance_miles(b, a));
/// assert_eq!(distance_miles(a, a), 0.0);
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn distance_miles(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let (from, to) = if precedes(a, b) { (a, b) } else { (b, a) };
    Geodesic.distance(from.to_point(), to.to_point()) / METRES_PER_MILE
}

fn precedes(a: Coordinate, b: Coordinate) -> bool {
    a.latitude()
        .total_cmp(&b.latitude())
        .then_with(|| a.longitude().total_cmp(&b.longitude()))
        .is_lt()
}
