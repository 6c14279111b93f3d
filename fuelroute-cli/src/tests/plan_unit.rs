//! Focused unit tests covering plan CLI configuration and output.

use camino::Utf8PathBuf;
use fuelroute_core::test_support::{MemoryCatalog, stop};
use fuelroute_core::{
    Coordinate, DEFAULT_RANGE_MILES, DisabledRouteCache, PlanResult, Planner,
};
use fuelroute_planner::GreedyPlanner;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

use super::helpers::{OKLAHOMA, SAN_DIEGO, Workspace};
use crate::plan::{
    PlanArgs, PlanConfig, PlanOutput, PlannerBuilder, config_from_layers_for_test, run_plan_with,
};
use crate::{
    ARG_DATABASE, ARG_PLAN_DESTINATION, ARG_PLAN_SOURCE, CliError, DEFAULT_CACHE,
    DEFAULT_DATABASE, ENV_PLAN_DESTINATION,
};

fn args(source: &str, destination: &str) -> PlanArgs {
    PlanArgs {
        source: Some(source.to_owned()),
        destination: Some(destination.to_owned()),
        ..PlanArgs::default()
    }
}

/// Builds a planner over a two-stop in-memory catalog. The far stop lies
/// beyond the default range from the source.
struct MemoryPlannerBuilder;

impl PlannerBuilder for MemoryPlannerBuilder {
    fn build(&self, _config: &PlanConfig) -> Result<Box<dyn Planner>, CliError> {
        let catalog =
            MemoryCatalog::with_stops([stop(1, 1.0, 5.0, 300), stop(2, 1.0, 9.0, 250)]);
        Ok(Box::new(GreedyPlanner::new(catalog, DisabledRouteCache)))
    }
}

#[rstest]
fn converting_applies_defaults() {
    let config = PlanConfig::try_from(args(SAN_DIEGO, OKLAHOMA)).expect("config should build");
    assert_eq!(config.range_miles, DEFAULT_RANGE_MILES);
    assert_eq!(config.database, Utf8PathBuf::from(DEFAULT_DATABASE));
    assert_eq!(config.cache, Some(Utf8PathBuf::from(DEFAULT_CACHE)));
    assert_eq!(
        config.source,
        Coordinate::new(32.715_736, -117.161_087).expect("valid coordinate")
    );
}

#[rstest]
fn no_cache_disables_the_cache() {
    let config = PlanConfig::try_from(PlanArgs {
        no_cache: true,
        cache: Some(Utf8PathBuf::from("ignored.db")),
        ..args(SAN_DIEGO, OKLAHOMA)
    })
    .expect("config should build");
    assert_eq!(config.cache, None);
}

#[rstest]
fn converting_without_destination_errors() {
    let err = PlanConfig::try_from(PlanArgs {
        destination: None,
        ..args(SAN_DIEGO, OKLAHOMA)
    })
    .expect_err("missing destination should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_PLAN_DESTINATION);
            assert_eq!(env, ENV_PLAN_DESTINATION);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case("north,west")]
#[case("32.7")]
#[case("91.0,-117.0")]
fn converting_rejects_bad_source(#[case] source: &str) {
    let err = PlanConfig::try_from(args(source, OKLAHOMA)).expect_err("bad source should error");
    match err {
        CliError::InvalidCoordinate { field, .. } => assert_eq!(field, ARG_PLAN_SOURCE),
        other => panic!("expected InvalidCoordinate, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_requires_database() {
    let workspace = Workspace::new();
    let config = PlanConfig {
        database: workspace.database(),
        ..PlanConfig::try_from(args(SAN_DIEGO, OKLAHOMA)).expect("config should build")
    };
    let err = config.validate_sources().expect_err("missing database");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_DATABASE);
            assert_eq!(path, workspace.database());
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn output_rounds_totals_to_cents() {
    let source = Coordinate::new(1.0, 2.0).expect("valid source");
    let mut result: PlanResult = fuelroute_core::test_support::plan_result();
    result.total_fuel_volume = 12.345_678;
    result.total_fuel_cost = 40.004_9;

    let output = PlanOutput::from(result);
    assert_eq!(output.total_fuel_intake, 12.35);
    assert_eq!(output.total_fuel_cost, 40.0);
    assert!(output.complete);
    assert_eq!(output.route.first(), Some(&source));
}

#[rstest]
fn plan_prints_json_route() {
    let workspace = Workspace::new();
    workspace.ingest_fixture();
    let mut stdout = Vec::new();
    run_plan_with(
        PlanArgs {
            source: Some("1.0,0.0".to_owned()),
            destination: Some("1.0,12.0".to_owned()),
            database: Some(workspace.database()),
            no_cache: true,
            ..PlanArgs::default()
        },
        &MemoryPlannerBuilder,
        &mut stdout,
    )
    .expect("plan should succeed");

    let value: serde_json::Value = serde_json::from_slice(&stdout).expect("JSON output");
    assert_eq!(value["complete"], json!(true));
    assert_eq!(
        value["route"],
        json!([[1.0, 0.0], [1.0, 5.0], [1.0, 12.0]])
    );
    assert_eq!(value["legs"].as_array().map(Vec::len), Some(2));
}

#[rstest]
fn plan_reports_invalid_range() {
    let workspace = Workspace::new();
    workspace.ingest_fixture();
    let err = run_plan_with(
        PlanArgs {
            range: Some(-5.0),
            database: Some(workspace.database()),
            no_cache: true,
            ..args(SAN_DIEGO, OKLAHOMA)
        },
        &MemoryPlannerBuilder,
        &mut Vec::new(),
    )
    .expect_err("negative range should fail");
    assert!(matches!(err, CliError::Plan { .. }), "unexpected error {err:?}");
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "source": "10.0,10.0",
            "destination": "11.0,11.0",
            "range": 250.0,
        }),
        None,
    );
    composer.push_environment(json!({ "destination": "12.0,12.0" }));
    composer.push_cli(json!({ "source": "13.0,13.0" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.source, Coordinate::new(13.0, 13.0).expect("valid"));
    assert_eq!(config.destination, Coordinate::new(12.0, 12.0).expect("valid"));
    assert_eq!(config.range_miles, 250.0);
}
