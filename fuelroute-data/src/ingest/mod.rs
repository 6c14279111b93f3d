//! Fuel stop CSV ingestion.
//!
//! The expected columns are `OPIS Truckstop ID`, `Truckstop Name`,
//! `Address`, `City`, `State`, `Rack ID`, `Retail Price`, `Latitude` and
//! `Longitude`. Rows are assigned sequential catalog ids starting at 1 in
//! file order, which fixes the catalog order used for price tie-breaking.

use std::io::Read;

use camino::{Utf8Path, Utf8PathBuf};
use csv::{ReaderBuilder, Trim};
use fuelroute_core::{Coordinate, CoordinateError, FuelStop, PriceError, UnitPrice};
use serde::Deserialize;
use thiserror::Error;

use crate::fs::open_utf8_file;

mod sqlite;

pub use sqlite::{PersistStopsError, persist_fuel_stops_to_sqlite};

/// Errors raised while reading a fuel stop CSV.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The CSV file could not be opened.
    #[error("failed to open fuel stop CSV at {path}")]
    Open {
        /// Path that could not be opened.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A row could not be read or did not match the expected columns.
    #[error("malformed fuel stop CSV row {row}")]
    Row {
        /// One-based data row number.
        row: usize,
        /// Error reported by the CSV reader.
        #[source]
        source: csv::Error,
    },
    /// The retail price was not a non-negative decimal.
    #[error("invalid retail price {value:?} on row {row}")]
    Price {
        /// One-based data row number.
        row: usize,
        /// Rejected price text.
        value: String,
        /// Parse failure.
        #[source]
        source: PriceError,
    },
    /// Latitude or longitude was out of range.
    #[error("invalid coordinates on row {row}")]
    Coordinates {
        /// One-based data row number.
        row: usize,
        /// Validation failure.
        #[source]
        source: CoordinateError,
    },
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "OPIS Truckstop ID")]
    opis_id: String,
    #[serde(rename = "Truckstop Name")]
    name: String,
    #[serde(rename = "Address", default)]
    address: String,
    #[serde(rename = "City", default)]
    city: String,
    #[serde(rename = "State", default)]
    state: String,
    #[serde(rename = "Rack ID", default)]
    rack_id: String,
    #[serde(rename = "Retail Price")]
    retail_price: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
}

/// One validated CSV row with its assigned catalog id.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelStopRecord {
    /// Sequential catalog id.
    pub id: u64,
    /// Supplier's truck stop identifier. Not unique across rows.
    pub opis_id: String,
    /// Station name.
    pub name: String,
    /// Street address, possibly empty.
    pub address: String,
    /// City, when present.
    pub city: Option<String>,
    /// State code, when present.
    pub state: Option<String>,
    /// Supplier rack identifier, when present.
    pub rack_id: Option<String>,
    /// Retail price per fuel unit.
    pub price: UnitPrice,
    /// Station position.
    pub location: Coordinate,
}

impl FuelStopRecord {
    /// Project the record onto the planner's view of a stop.
    #[must_use]
    pub fn to_fuel_stop(&self) -> FuelStop {
        FuelStop {
            id: self.id,
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            location: self.location,
            price: self.price,
        }
    }

    fn from_row(id: u64, row: usize, raw: CsvRow) -> Result<Self, IngestError> {
        let price = raw
            .retail_price
            .parse::<UnitPrice>()
            .map_err(|source| IngestError::Price {
                row,
                value: raw.retail_price.clone(),
                source,
            })?;
        let location = Coordinate::new(raw.latitude, raw.longitude)
            .map_err(|source| IngestError::Coordinates { row, source })?;
        Ok(Self {
            id,
            opis_id: raw.opis_id,
            name: raw.name,
            address: raw.address,
            city: non_empty(raw.city),
            state: non_empty(raw.state),
            rack_id: non_empty(raw.rack_id),
            price,
            location,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

/// Read fuel stop records from CSV text.
///
/// # Examples
///
/// ```
/// use fuelroute_data::read_fuel_stops;
///
/// # fn main() -> Result<(), fuelroute_data::IngestError> {
/// let csv = "\
/// OPIS Truckstop ID,Truckstop Name,Address,City,State,Rack ID,Retail Price,Latitude,Longitude
/// 7,Big Spring Truck Stop,I-20 Exit 177,Big Spring,TX,291,3.15,32.4330582,-100.5422351
/// ";
/// let records = read_fuel_stops(csv.as_bytes())?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].id, 1);
/// assert_eq!(records[0].price.cents(), 315);
/// # Ok(())
/// # }
/// ```
pub fn read_fuel_stops<R: Read>(reader: R) -> Result<Vec<FuelStopRecord>, IngestError> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for ((row, id), result) in (1_usize..).zip(1_u64..).zip(csv_reader.deserialize::<CsvRow>()) {
        let raw = result.map_err(|source| IngestError::Row { row, source })?;
        records.push(FuelStopRecord::from_row(id, row, raw)?);
    }
    log::info!("read {} fuel stops from CSV", records.len());
    Ok(records)
}

/// Read fuel stop records from a CSV file.
pub fn read_fuel_stops_csv(path: &Utf8Path) -> Result<Vec<FuelStopRecord>, IngestError> {
    let file = open_utf8_file(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_fuel_stops(file)
}
