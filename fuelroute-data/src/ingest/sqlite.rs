//! SQLite persistence for fuel stops read from CSV.
#![forbid(unsafe_code)]

use camino::{Utf8Path, Utf8PathBuf};
use rusqlite::{Connection, Error as SqliteError, Transaction};
use thiserror::Error;

use super::FuelStopRecord;
use crate::fs::ensure_parent_dir;

/// Errors raised when persisting fuel stops to SQLite.
#[derive(Debug, Error)]
pub enum PersistStopsError {
    /// Failed to create the parent directory for the SQLite artefact.
    #[error("failed to create parent directory for {path:?}")]
    CreateDirectory {
        /// Database path whose parent could not be created.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path:?}")]
    Open {
        /// Destination database path.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Beginning the transaction failed.
    #[error("failed to begin fuel stop persistence transaction")]
    BeginTransaction {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Creating the `fuel_stops` table failed.
    #[error("failed to create fuel_stops table")]
    CreateSchema {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Clearing the previous catalog failed.
    #[error("failed to clear existing fuel stops")]
    ClearStops {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// A stop identifier could not be represented as an SQLite integer.
    #[error("fuel stop id {stop_id} exceeds SQLite i64 range")]
    StopIdOutOfRange {
        /// Identifier that failed the conversion.
        stop_id: u64,
    },
    /// Preparing the insert statement failed.
    #[error("failed to prepare fuel stop insert statement")]
    PrepareInsert {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Writing a stop row failed.
    #[error("failed to persist fuel stop {stop_id}")]
    PersistRow {
        /// Identifier of the stop being persisted.
        stop_id: u64,
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
    /// Committing the transaction failed.
    #[error("failed to commit fuel stop persistence transaction")]
    Commit {
        /// Source error returned by `rusqlite`.
        #[source]
        source: SqliteError,
    },
}

/// Persist fuel stop records to a SQLite database on disk.
///
/// The import replaces the whole catalog: rows from earlier imports are
/// removed in the same transaction, so re-importing the same CSV is
/// idempotent and a shorter CSV leaves no stale stops. Parent directories are created automatically and
/// the `fuel_stops` table is initialised if missing. Prices are stored as
/// whole cents.
pub fn persist_fuel_stops_to_sqlite(
    path: &Utf8Path,
    records: &[FuelStopRecord],
) -> Result<(), PersistStopsError> {
    ensure_parent_dir(path).map_err(|source| PersistStopsError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    let mut connection =
        Connection::open(path.as_std_path()).map_err(|source| PersistStopsError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let transaction = connection
        .transaction()
        .map_err(|source| PersistStopsError::BeginTransaction { source })?;

    create_schema(&transaction)?;
    clear_rows(&transaction)?;
    persist_rows(&transaction, records)?;

    transaction
        .commit()
        .map_err(|source| PersistStopsError::Commit { source })?;
    log::info!("persisted {} fuel stops to {path}", records.len());
    Ok(())
}

fn create_schema(transaction: &Transaction<'_>) -> Result<(), PersistStopsError> {
    transaction
        .execute(
            "CREATE TABLE IF NOT EXISTS fuel_stops (
                id INTEGER PRIMARY KEY,
                opis_id TEXT NOT NULL,
                name TEXT NOT NULL,
                address TEXT NOT NULL,
                city TEXT,
                state TEXT,
                rack_id TEXT,
                price_cents INTEGER NOT NULL,
                latitude REAL NOT NULL,
                longitude REAL NOT NULL
            )",
            [],
        )
        .map(|_| ())
        .map_err(|source| PersistStopsError::CreateSchema { source })
}

fn clear_rows(transaction: &Transaction<'_>) -> Result<(), PersistStopsError> {
    transaction
        .execute("DELETE FROM fuel_stops", [])
        .map(|_| ())
        .map_err(|source| PersistStopsError::ClearStops { source })
}

fn persist_rows(
    transaction: &Transaction<'_>,
    records: &[FuelStopRecord],
) -> Result<(), PersistStopsError> {
    if records.is_empty() {
        return Ok(());
    }

    let mut statement = transaction
        .prepare(
            "INSERT INTO fuel_stops
                (id, opis_id, name, address, city, state, rack_id, price_cents, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .map_err(|source| PersistStopsError::PrepareInsert { source })?;

    for record in records {
        let stop_id = i64::try_from(record.id).map_err(|_| PersistStopsError::StopIdOutOfRange {
            stop_id: record.id,
        })?;
        statement
            .execute((
                stop_id,
                &record.opis_id,
                &record.name,
                &record.address,
                &record.city,
                &record.state,
                &record.rack_id,
                record.price.cents(),
                record.location.latitude(),
                record.location.longitude(),
            ))
            .map_err(|source| PersistStopsError::PersistRow {
                stop_id: record.id,
                source,
            })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelroute_core::{Coordinate, UnitPrice};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn record() -> FuelStopRecord {
        FuelStopRecord {
            id: 7,
            opis_id: "491".to_owned(),
            name: "Example Travel Center".to_owned(),
            address: "I-10 Exit 12".to_owned(),
            city: Some("Ehrenberg".to_owned()),
            state: Some("AZ".to_owned()),
            rack_id: None,
            price: UnitPrice::from_cents(339),
            location: Coordinate::new(33.604, -114.525).expect("valid coordinate"),
        }
    }

    #[fixture]
    fn temp_dir() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    fn db_path(temp_dir: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp_dir.path().join(name)).expect("utf-8 path")
    }

    #[rstest]
    fn persists_records(temp_dir: TempDir, record: FuelStopRecord) {
        let path = db_path(&temp_dir, "stops.db");
        persist_fuel_stops_to_sqlite(&path, std::slice::from_ref(&record))
            .expect("persist stops");

        let conn = Connection::open(path.as_std_path()).expect("open database");
        let stored: (i64, String, Option<String>, Option<String>, i64, f64) = conn
            .query_row(
                "SELECT id, name, city, rack_id, price_cents, latitude FROM fuel_stops",
                [],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                        row.get(5)?,
                    ))
                },
            )
            .expect("read row");
        assert_eq!(stored.0, 7);
        assert_eq!(stored.1, "Example Travel Center");
        assert_eq!(stored.2.as_deref(), Some("Ehrenberg"));
        assert_eq!(stored.3, None);
        assert_eq!(stored.4, 339);
        assert!((stored.5 - 33.604).abs() < 1e-9);
    }

    #[rstest]
    fn reimport_replaces_rows(temp_dir: TempDir, record: FuelStopRecord) {
        let path = db_path(&temp_dir, "stops.db");
        persist_fuel_stops_to_sqlite(&path, std::slice::from_ref(&record))
            .expect("first import");
        let repriced = FuelStopRecord {
            price: UnitPrice::from_cents(301),
            ..record
        };
        persist_fuel_stops_to_sqlite(&path, std::slice::from_ref(&repriced))
            .expect("second import");

        let conn = Connection::open(path.as_std_path()).expect("open database");
        let (count, cents): (i64, i64) = conn
            .query_row("SELECT COUNT(*), MAX(price_cents) FROM fuel_stops", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .expect("read summary");
        assert_eq!(count, 1);
        assert_eq!(cents, 301);
    }

    #[rstest]
    fn shorter_reimport_drops_stale_rows(temp_dir: TempDir, record: FuelStopRecord) {
        let path = db_path(&temp_dir, "stops.db");
        let original: Vec<FuelStopRecord> = (1..=3)
            .map(|id| FuelStopRecord {
                id,
                name: format!("Old {id}"),
                ..record.clone()
            })
            .collect();
        persist_fuel_stops_to_sqlite(&path, &original).expect("first import");
        let replacement = FuelStopRecord {
            id: 1,
            name: "New 1".to_owned(),
            ..record
        };
        persist_fuel_stops_to_sqlite(&path, &[replacement]).expect("second import");

        let conn = Connection::open(path.as_std_path()).expect("open database");
        let mut statement = conn
            .prepare("SELECT name FROM fuel_stops ORDER BY id")
            .expect("prepare select");
        let names: Vec<String> = statement
            .query_map([], |row| row.get(0))
            .expect("query names")
            .collect::<Result<_, _>>()
            .expect("read names");
        assert_eq!(names, vec!["New 1".to_owned()]);
    }

    #[rstest]
    fn creates_parent_directories(temp_dir: TempDir) {
        let path = db_path(&temp_dir, "nested/data/stops.db");
        persist_fuel_stops_to_sqlite(&path, &[]).expect("persist empty catalog");
        assert!(path.exists());
    }

    #[rstest]
    fn rejects_ids_beyond_i64(temp_dir: TempDir, record: FuelStopRecord) {
        let path = db_path(&temp_dir, "stops.db");
        let oversized = FuelStopRecord {
            id: u64::MAX,
            ..record
        };
        let err = persist_fuel_stops_to_sqlite(&path, &[oversized]).expect_err("id overflow");
        assert!(matches!(
            err,
            PersistStopsError::StopIdOutOfRange { stop_id: u64::MAX }
        ));
    }
}
