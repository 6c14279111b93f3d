//! Read-only fuel stop catalog backed by the SQLite artefact written by
//! [`crate::persist_fuel_stops_to_sqlite`].

use std::fmt;
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use fuelroute_core::{CatalogError, Coordinate, FuelStop, FuelStopCatalog, UnitPrice};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use thiserror::Error;

/// Error raised when opening a SQLite fuel stop catalog.
#[derive(Debug, Error)]
pub enum CatalogStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    Open {
        /// Location of the SQLite database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// The database does not contain a `fuel_stops` table.
    #[error("SQLite database at {path} has no fuel_stops table")]
    MissingTable {
        /// Location of the SQLite database on disk.
        path: Utf8PathBuf,
    },
}

type StopRow = (i64, String, Option<String>, Option<String>, u32, f64, f64);

/// Fuel stop catalog reading the `fuel_stops` table on every listing.
///
/// Each call reflects the table as it is at that moment, so a re-import is
/// visible to the next planning request without reopening the catalog.
pub struct SqliteFuelStopCatalog {
    path: Utf8PathBuf,
    connection: Mutex<Connection>,
}

impl fmt::Debug for SqliteFuelStopCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteFuelStopCatalog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteFuelStopCatalog {
    /// Open the catalog read-only, checking that the `fuel_stops` table exists.
    pub fn open(path: &Utf8Path) -> Result<Self, CatalogStoreError> {
        let connection =
            Connection::open_with_flags(path.as_std_path(), OpenFlags::SQLITE_OPEN_READ_ONLY)
                .map_err(|source| CatalogStoreError::Open {
                    path: path.to_path_buf(),
                    source,
                })?;

        let table: Option<String> = connection
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'fuel_stops'",
                [],
                |row| row.get(0),
            )
            .optional()
            .map_err(|source| CatalogStoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;
        if table.is_none() {
            return Err(CatalogStoreError::MissingTable {
                path: path.to_path_buf(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            connection: Mutex::new(connection),
        })
    }

    /// Location of the backing database.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn load_rows(&self) -> Result<Vec<StopRow>, CatalogError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| CatalogError::unavailable("catalog connection lock poisoned"))?;
        let mut statement = connection
            .prepare(
                "SELECT id, name, city, state, price_cents, latitude, longitude
                 FROM fuel_stops ORDER BY id",
            )
            .map_err(CatalogError::unavailable)?;
        let rows = statement
            .query_map([], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                ))
            })
            .map_err(CatalogError::unavailable)?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(CatalogError::unavailable)
    }
}

fn to_fuel_stop(row: StopRow) -> Result<FuelStop, CatalogError> {
    let (id, name, city, state, cents, latitude, longitude) = row;
    let stop_id = u64::try_from(id)
        .map_err(|_| CatalogError::unavailable(format!("negative fuel stop id {id}")))?;
    let location = Coordinate::new(latitude, longitude).map_err(|err| {
        CatalogError::unavailable(format!("fuel stop {stop_id} has {err}"))
    })?;
    let mut stop = FuelStop::new(stop_id, name, location, UnitPrice::from_cents(cents));
    stop.city = city;
    stop.state = state;
    Ok(stop)
}

impl FuelStopCatalog for SqliteFuelStopCatalog {
    fn list_fuel_stops(&self) -> Result<Vec<FuelStop>, CatalogError> {
        let stops = self
            .load_rows()?
            .into_iter()
            .map(to_fuel_stop)
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!("loaded {} fuel stops from {}", stops.len(), self.path);
        Ok(stops)
    }
}
