//! Cache keys built from rounded coordinate pairs.

use std::fmt;

use crate::Coordinate;

/// Default number of decimal digits kept when normalising coordinates.
pub const DEFAULT_KEY_PRECISION: u32 = 3;

/// Largest precision honoured; finer requests are clamped to it.
pub const MAX_KEY_PRECISION: u32 = f64::DIGITS;

/// Normalised cache key for a source/destination pair.
///
/// Coordinates are rounded to `precision` decimal digits, so queries that
/// differ only beyond that precision share a key. Precision is capped at
/// [`MAX_KEY_PRECISION`].
///
/// # Examples
///
/// ```
/// use fuelroute_core::{CacheKey, Coordinate};
///
/// # fn main() -> Result<(), fuelroute_core::CoordinateError> {
/// let key = CacheKey::new(
///     Coordinate::new(32.715736, -117.161087)?,
///     Coordinate::new(34.052235, -95.08503)?,
///     3,
/// );
/// assert_eq!(key.as_str(), "route_(32.716, -117.161)_(34.052, -95.085)");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Build a key from rounded coordinates.
    #[must_use]
    pub fn new(source: Coordinate, destination: Coordinate, precision: u32) -> Self {
        let digits = precision.min(MAX_KEY_PRECISION);
        let p = digits as usize;
        let [slat, slon] = [source.latitude(), source.longitude()].map(|v| round(v, digits));
        let [dlat, dlon] =
            [destination.latitude(), destination.longitude()].map(|v| round(v, digits));
        Self(format!(
            "route_({slat:.p$}, {slon:.p$})_({dlat:.p$}, {dlon:.p$})"
        ))
    }

    /// Append a discriminating suffix, e.g. a non-default vehicle range.
    #[must_use]
    pub fn with_suffix(mut self, suffix: impl fmt::Display) -> Self {
        self.0 = format!("{}_{suffix}", self.0);
        self
    }

    /// The key text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn round(value: f64, precision: u32) -> f64 {
    let scale = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let rounded = (value * scale).round() / scale;
    // Collapse -0.0 so "-0.000" never appears in a key.
    if rounded == 0.0 { 0.0 } else { rounded }
}
