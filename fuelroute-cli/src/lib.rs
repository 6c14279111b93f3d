//! Command-line interface for importing fuel prices and planning routes.
#![forbid(unsafe_code)]

use std::io::Write;

use camino::Utf8Path;
use clap::{Parser, Subcommand};
use serde::Serialize;

mod error;
mod ingest;
mod plan;

pub use error::CliError;

use ingest::{IngestArgs, run_ingest};
use plan::{PlanArgs, run_plan};

pub(crate) const ARG_INGEST_CSV: &str = "csv";
pub(crate) const ARG_DATABASE: &str = "database";
pub(crate) const ARG_PLAN_SOURCE: &str = "source";
pub(crate) const ARG_PLAN_DESTINATION: &str = "destination";
pub(crate) const ARG_PLAN_RANGE: &str = "range";
pub(crate) const ARG_PLAN_CACHE: &str = "cache";
pub(crate) const ARG_PLAN_NO_CACHE: &str = "no-cache";
pub(crate) const ENV_INGEST_CSV: &str = "FUELROUTE_CMDS_INGEST_CSV";
pub(crate) const ENV_PLAN_SOURCE: &str = "FUELROUTE_CMDS_PLAN_SOURCE";
pub(crate) const ENV_PLAN_DESTINATION: &str = "FUELROUTE_CMDS_PLAN_DESTINATION";

/// Default location of the fuel stop database.
pub(crate) const DEFAULT_DATABASE: &str = "fuel_stops.db";
/// Default location of the route cache database.
pub(crate) const DEFAULT_CACHE: &str = "route_cache.db";

/// Run the CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Ingest(args) => run_ingest(args),
        Command::Plan(args) => run_plan(args),
    }
}

/// Require `path` to name an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match fuelroute_data::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[derive(Debug, Parser)]
#[command(
    name = "fuelroute",
    about = "Plan the cheapest refuelling stops along a road trip",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Import a fuel price CSV into the fuel stop database.
    Ingest(IngestArgs),
    /// Plan a route between two coordinates.
    Plan(PlanArgs),
}

#[cfg(test)]
mod tests;
