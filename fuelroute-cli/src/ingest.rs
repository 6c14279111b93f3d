//! Ingest command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fuelroute_data::{persist_fuel_stops_to_sqlite, read_fuel_stops_csv};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_INGEST_CSV, CliError, DEFAULT_DATABASE, ENV_INGEST_CSV, require_existing,
    write_json,
};

/// CLI arguments for the `ingest` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Read a fuel price CSV with the columns OPIS Truckstop ID, \
                 Truckstop Name, Address, City, State, Rack ID, Retail Price, \
                 Latitude and Longitude, and store it in the SQLite fuel stop \
                 database. The import replaces any stops already stored there.",
    about = "Import a fuel price CSV"
)]
#[ortho_config(prefix = "FUELROUTE")]
pub(crate) struct IngestArgs {
    /// Path to the fuel price CSV.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) csv: Option<Utf8PathBuf>,
    /// Path to the SQLite fuel stop database to write.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
}

impl IngestArgs {
    pub(crate) fn into_config(self) -> Result<IngestConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        IngestConfig::try_from(merged)
    }
}

/// Resolved `ingest` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IngestConfig {
    /// Fuel price CSV to read.
    pub(crate) csv: Utf8PathBuf,
    /// Database to write.
    pub(crate) database: Utf8PathBuf,
}

impl IngestConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.csv, ARG_INGEST_CSV)
    }
}

impl TryFrom<IngestArgs> for IngestConfig {
    type Error = CliError;

    fn try_from(args: IngestArgs) -> Result<Self, Self::Error> {
        let csv = args.csv.ok_or(CliError::MissingArgument {
            field: ARG_INGEST_CSV,
            env: ENV_INGEST_CSV,
        })?;
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        Ok(Self { csv, database })
    }
}

/// Summary printed after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct IngestSummary {
    /// Number of fuel stops written.
    pub(crate) stops: usize,
}

pub(crate) fn run_ingest(args: IngestArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_ingest_with(args, &mut stdout)
}

pub(crate) fn run_ingest_with(args: IngestArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_ingest_config(args)?;
    let summary = execute_ingest(&config)?;
    write_json(writer, &summary)
}

pub(crate) fn resolve_ingest_config(args: IngestArgs) -> Result<IngestConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_ingest(config: &IngestConfig) -> Result<IngestSummary, CliError> {
    let records = read_fuel_stops_csv(&config.csv)?;
    persist_fuel_stops_to_sqlite(&config.database, &records).map_err(|source| {
        CliError::PersistStops {
            path: config.database.clone(),
            source,
        }
    })?;
    log::info!(
        "imported {} fuel stops from {} into {}",
        records.len(),
        config.csv,
        config.database
    );
    Ok(IngestSummary {
        stops: records.len(),
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<IngestConfig, CliError> {
    let merged = IngestArgs::merge_from_layers(layers).map_err(CliError::from)?;
    IngestConfig::try_from(merged)
}
