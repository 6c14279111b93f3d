//! Fuel stop records held by the catalog.

use crate::{Coordinate, UnitPrice};

/// A refuelling station known to the catalog.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{Coordinate, FuelStop, UnitPrice};
///
/// # fn main() -> Result<(), fuelroute_core::CoordinateError> {
/// let stop = FuelStop::new(
///     7,
///     "Big Spring Truck Stop",
///     Coordinate::new(32.433_058_2, -100.542_235_1)?,
///     UnitPrice::from_cents(315),
/// )
/// .with_locality("Big Spring", "TX");
/// assert_eq!(stop.state.as_deref(), Some("TX"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelStop {
    /// Catalog identifier.
    pub id: u64,
    /// Display name of the station.
    pub name: String,
    /// City, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub city: Option<String>,
    /// State or province code, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub state: Option<String>,
    /// Position of the station.
    pub location: Coordinate,
    /// Retail price per fuel unit.
    pub price: UnitPrice,
}

impl FuelStop {
    /// Construct a stop without locality details.
    pub fn new(id: u64, name: impl Into<String>, location: Coordinate, price: UnitPrice) -> Self {
        Self {
            id,
            name: name.into(),
            city: None,
            state: None,
            location,
            price,
        }
    }

    /// Attach city and state details.
    #[must_use]
    pub fn with_locality(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }
}
