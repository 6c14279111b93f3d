//! Validated WGS84 positions.
//!
//! A [`Coordinate`] can only be built through [`Coordinate::new`] or by
//! parsing the `lat,lon` text form, so every value flowing through the
//! planner is finite and inside the valid latitude/longitude ranges.

use std::fmt;
use std::str::FromStr;

use geo::Point;
use thiserror::Error;

/// Errors returned when constructing or parsing a [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    /// A component was NaN or infinite.
    #[error("coordinate components must be finite")]
    NonFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    /// The text form was not two comma-separated decimal numbers.
    #[error("expected `lat,lon`, found {input:?}")]
    Malformed {
        /// The rejected input.
        input: String,
    },
}

/// A latitude/longitude pair in decimal degrees.
///
/// Serialises as a `[latitude, longitude]` array.
///
/// # Examples
///
/// ```
/// use fuelroute_core::Coordinate;
///
/// # fn main() -> Result<(), fuelroute_core::CoordinateError> {
/// let san_diego: Coordinate = "32.715736,-117.161087".parse()?;
/// assert_eq!(san_diego.latitude(), 32.715736);
/// assert_eq!(san_diego.longitude(), -117.161087);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "[f64; 2]", into = "[f64; 2]"))]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Validates and constructs a [`Coordinate`].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Convert into a `geo` point (`x = longitude`, `y = latitude`).
    #[must_use]
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoordinateError::Malformed {
            input: s.to_owned(),
        };
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let longitude: f64 = lon.trim().parse().map_err(|_| malformed())?;
        Self::new(latitude, longitude)
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = CoordinateError;

    fn try_from([latitude, longitude]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.latitude, coordinate.longitude]
    }
}
