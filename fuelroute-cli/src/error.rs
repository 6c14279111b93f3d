//! Error types emitted by the fuelroute CLI.
//!
//! Keep this error type reasonably small, as every CLI helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use fuelroute_core::{CoordinateError, PlanError};
use fuelroute_data::{CatalogStoreError, IngestError, PersistStopsError, RouteCacheStoreError};
use thiserror::Error;

/// Errors emitted by the fuelroute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A coordinate option was not valid `lat,lon` text.
    #[error("invalid {field} coordinate: {source}")]
    InvalidCoordinate {
        field: &'static str,
        #[source]
        source: CoordinateError,
    },
    /// Reading the fuel stop CSV failed.
    #[error("failed to read fuel stops: {0}")]
    Ingest(#[from] IngestError),
    /// Persisting fuel stops to SQLite failed.
    #[error("failed to persist fuel stops to {path:?}: {source}")]
    PersistStops {
        path: Utf8PathBuf,
        #[source]
        source: PersistStopsError,
    },
    /// Opening the fuel stop database failed.
    #[error(transparent)]
    OpenCatalog(#[from] CatalogStoreError),
    /// Opening the route cache failed.
    #[error(transparent)]
    OpenRouteCache(#[from] RouteCacheStoreError),
    /// The planner rejected the request.
    #[error("planning failed: {source}")]
    Plan {
        #[source]
        source: PlanError,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
