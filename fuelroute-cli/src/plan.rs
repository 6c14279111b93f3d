//! Plan command implementation.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use fuelroute_core::{
    Coordinate, DEFAULT_RANGE_MILES, DisabledRouteCache, LegCost, PlanRequest, PlanResult,
    Planner, RouteCache,
};
use fuelroute_data::{SqliteFuelStopCatalog, SqliteRouteCache};
use fuelroute_planner::GreedyPlanner;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_DATABASE, ARG_PLAN_CACHE, ARG_PLAN_DESTINATION, ARG_PLAN_NO_CACHE, ARG_PLAN_RANGE,
    ARG_PLAN_SOURCE, CliError, DEFAULT_CACHE, DEFAULT_DATABASE, ENV_PLAN_DESTINATION,
    ENV_PLAN_SOURCE, require_existing, write_json,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a road trip between two `lat,lon` coordinates, \
                 refuelling at the cheapest reachable stop that brings the \
                 vehicle closer to the destination. Results are cached in a \
                 SQLite database for an hour unless --no-cache is given.",
    about = "Plan a fuelled route"
)]
#[ortho_config(prefix = "FUELROUTE")]
pub(crate) struct PlanArgs {
    /// Trip start as `lat,lon`.
    #[arg(long = ARG_PLAN_SOURCE, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) source: Option<String>,
    /// Trip end as `lat,lon`.
    #[arg(long = ARG_PLAN_DESTINATION, value_name = "lat,lon", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Vehicle range in miles (default 500).
    #[arg(long = ARG_PLAN_RANGE, value_name = "miles")]
    #[serde(default)]
    pub(crate) range: Option<f64>,
    /// Path to the SQLite fuel stop database.
    #[arg(long = ARG_DATABASE, value_name = "path")]
    #[serde(default)]
    pub(crate) database: Option<Utf8PathBuf>,
    /// Path to the SQLite route cache.
    #[arg(long = ARG_PLAN_CACHE, value_name = "path")]
    #[serde(default)]
    pub(crate) cache: Option<Utf8PathBuf>,
    /// Plan without reading or writing the route cache.
    #[arg(long = ARG_PLAN_NO_CACHE)]
    #[serde(default)]
    pub(crate) no_cache: bool,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    /// Trip start.
    pub(crate) source: Coordinate,
    /// Trip end.
    pub(crate) destination: Coordinate,
    /// Vehicle range in miles.
    pub(crate) range_miles: f64,
    /// Fuel stop database.
    pub(crate) database: Utf8PathBuf,
    /// Route cache database, or `None` when caching is disabled.
    pub(crate) cache: Option<Utf8PathBuf>,
}

impl PlanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.database, ARG_DATABASE)
    }

    pub(crate) const fn request(&self) -> PlanRequest {
        PlanRequest::new(self.source, self.destination).with_range(self.range_miles)
    }
}

fn parse_coordinate(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<Coordinate, CliError> {
    value
        .ok_or(CliError::MissingArgument { field, env })?
        .parse()
        .map_err(|source| CliError::InvalidCoordinate { field, source })
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let source = parse_coordinate(args.source, ARG_PLAN_SOURCE, ENV_PLAN_SOURCE)?;
        let destination =
            parse_coordinate(args.destination, ARG_PLAN_DESTINATION, ENV_PLAN_DESTINATION)?;
        let database = args
            .database
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_DATABASE));
        let cache = if args.no_cache {
            None
        } else {
            Some(args.cache.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_CACHE)))
        };
        Ok(Self {
            source,
            destination,
            range_miles: args.range.unwrap_or(DEFAULT_RANGE_MILES),
            database,
            cache,
        })
    }
}

/// JSON document printed by the `plan` command.
///
/// Totals are rounded to two decimal places; the per-leg breakdown keeps
/// full precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlanOutput {
    /// Visited points as `[lat, lon]` pairs, source first.
    pub(crate) route: Vec<Coordinate>,
    /// Whether the route reaches the destination.
    pub(crate) complete: bool,
    /// Money spent on fuel.
    pub(crate) total_fuel_cost: f64,
    /// Fuel units consumed.
    pub(crate) total_fuel_intake: f64,
    /// Per-leg breakdown.
    pub(crate) legs: Vec<LegCost>,
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl From<PlanResult> for PlanOutput {
    fn from(result: PlanResult) -> Self {
        Self {
            complete: result.is_complete(),
            route: result.route.points().to_vec(),
            total_fuel_cost: round_cents(result.total_fuel_cost),
            total_fuel_intake: round_cents(result.total_fuel_volume),
            legs: result.legs,
        }
    }
}

/// Builds a planner for the current plan invocation.
pub(crate) trait PlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError>;
}

pub(crate) struct DefaultPlannerBuilder;

impl PlannerBuilder for DefaultPlannerBuilder {
    fn build(&self, config: &PlanConfig) -> Result<Box<dyn Planner>, CliError> {
        let catalog = SqliteFuelStopCatalog::open(&config.database)?;
        let cache: Box<dyn RouteCache> = match &config.cache {
            Some(path) => Box::new(SqliteRouteCache::open(path)?),
            None => Box::new(DisabledRouteCache),
        };
        Ok(Box::new(GreedyPlanner::new(catalog, cache)))
    }
}

pub(crate) fn run_plan(args: PlanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_plan_with(args, &DefaultPlannerBuilder, &mut stdout)
}

pub(crate) fn run_plan_with(
    args: PlanArgs,
    builder: &dyn PlannerBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_plan_config(args)?;
    let planner = builder.build(&config)?;
    let result = planner
        .plan(&config.request())
        .map_err(|source| CliError::Plan { source })?;
    write_json(writer, &PlanOutput::from(result))
}

pub(crate) fn resolve_plan_config(args: PlanArgs) -> Result<PlanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<PlanConfig, CliError> {
    let merged = PlanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    PlanConfig::try_from(merged)
}
