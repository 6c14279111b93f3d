//! Shared utilities for golden route tests.
//!
//! This module contains the fixture schema and helpers used by both the
//! rstest parameterised tests and the BDD behavioural tests. Fixtures live in
//! `tests/golden_routes/data` and carry the catalog, the request and the
//! expected route and totals.

use std::fs;
use std::path::PathBuf;

use fuelroute_core::test_support::MemoryCatalog;
use fuelroute_core::{Coordinate, DisabledRouteCache, FuelStop, PlanRequest, PlanResult, UnitPrice};
use fuelroute_planner::{GreedyPlanner, PlannerConfig, SourceLegPricing};
use serde::Deserialize;

/// Deserialised golden route test case.
#[derive(Debug, Deserialize, Clone)]
pub struct GoldenRoute {
    /// Name of the test case (used in error messages).
    pub name: String,
    /// Human-readable description of what the test validates.
    pub description: String,
    /// Catalog contents in catalog order.
    pub stops: Vec<StopSpec>,
    /// Request parameters.
    pub request: RequestSpec,
    /// Expected results for validation.
    pub expected: ExpectedResult,
}

/// Fuel stop specification from JSON.
#[derive(Debug, Deserialize, Clone)]
pub struct StopSpec {
    /// Catalog identifier.
    pub id: u64,
    /// Station name.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Decimal price text, e.g. `"3.09"`.
    pub price: String,
}

/// Request specification from JSON.
#[derive(Debug, Deserialize, Clone)]
pub struct RequestSpec {
    /// `[latitude, longitude]` of the trip start.
    pub source: [f64; 2],
    /// `[latitude, longitude]` of the trip end.
    pub destination: [f64; 2],
    /// Vehicle range in miles.
    pub range_miles: f64,
    /// Pricing policy for the source leg.
    pub source_leg: SourceLegSpec,
}

/// Source-leg pricing policy as spelled in JSON.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum SourceLegSpec {
    /// See [`SourceLegPricing::PrepaidTank`].
    PrepaidTank,
    /// See [`SourceLegPricing::FirstStopPrice`].
    FirstStopPrice,
    /// See [`SourceLegPricing::Omit`].
    Omit,
}

impl From<SourceLegSpec> for SourceLegPricing {
    fn from(spec: SourceLegSpec) -> Self {
        match spec {
            SourceLegSpec::PrepaidTank => Self::PrepaidTank,
            SourceLegSpec::FirstStopPrice => Self::FirstStopPrice,
            SourceLegSpec::Omit => Self::Omit,
        }
    }
}

/// Expected result from JSON.
#[derive(Debug, Deserialize, Clone)]
pub struct ExpectedResult {
    /// Ids of the refuelling stops between source and destination.
    pub route_stop_ids: Vec<u64>,
    /// Whether the route reaches the destination.
    pub complete: bool,
    /// Expected total fuel volume.
    pub total_fuel_volume: f64,
    /// Expected total fuel cost.
    pub total_fuel_cost: f64,
    /// Absolute tolerance for the totals.
    pub tolerance: f64,
}

/// Load a golden route from the data directory.
pub fn load_golden_route(name: &str) -> GoldenRoute {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_routes/data")
        .join(format!("{name}.json"));
    let content = fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!(
            "failed to read golden route file at {}: {}",
            path.display(),
            e
        )
    });
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("failed to parse golden route JSON {name}: {e}"))
}

fn coordinate([latitude, longitude]: [f64; 2]) -> Coordinate {
    Coordinate::new(latitude, longitude)
        .unwrap_or_else(|e| panic!("golden route contains an invalid coordinate: {e}"))
}

/// Convert stop specs to domain stops, preserving order.
pub fn build_stops(specs: &[StopSpec]) -> Vec<FuelStop> {
    specs
        .iter()
        .map(|s| {
            let price: UnitPrice = s
                .price
                .parse()
                .unwrap_or_else(|e| panic!("golden route contains an invalid price: {e}"));
            FuelStop::new(
                s.id,
                s.name.clone(),
                coordinate([s.latitude, s.longitude]),
                price,
            )
        })
        .collect()
}

/// Convert request spec to domain request.
pub fn build_request(spec: &RequestSpec) -> PlanRequest {
    PlanRequest::new(coordinate(spec.source), coordinate(spec.destination))
        .with_range(spec.range_miles)
}

/// Build an uncached planner over the golden catalog.
pub fn build_planner(golden: &GoldenRoute) -> GreedyPlanner<MemoryCatalog, DisabledRouteCache> {
    let config = PlannerConfig::default().with_source_leg(golden.request.source_leg.into());
    GreedyPlanner::with_config(
        MemoryCatalog::with_stops(build_stops(&golden.stops)),
        DisabledRouteCache,
        config,
    )
}

/// Ids of the refuelling stops on `result`, excluding source and destination.
pub fn route_stop_ids(golden: &GoldenRoute, result: &PlanResult) -> Vec<u64> {
    let stops = build_stops(&golden.stops);
    let points = result.route.points();
    let intermediate = points
        .get(1..points.len() - usize::from(result.is_complete()))
        .unwrap_or_default();
    intermediate
        .iter()
        .map(|point| {
            stops
                .iter()
                .find(|stop| stop.location == *point)
                .map(|stop| stop.id)
                .unwrap_or_else(|| panic!("{}: route point {point} is not a catalog stop", golden.name))
        })
        .collect()
}

/// Assert `result` matches the golden expectations.
pub fn assert_matches_golden(golden: &GoldenRoute, result: &PlanResult) {
    let expected = &golden.expected;
    assert_eq!(
        route_stop_ids(golden, result),
        expected.route_stop_ids,
        "{}: route stops differ ({})",
        golden.name,
        golden.description
    );
    assert_eq!(
        result.is_complete(),
        expected.complete,
        "{}: completion differs",
        golden.name
    );
    assert_eq!(
        result.route.source(),
        coordinate(golden.request.source),
        "{}: route must start at the source",
        golden.name
    );
    assert_close(
        result.total_fuel_volume,
        expected.total_fuel_volume,
        expected.tolerance,
        &golden.name,
        "fuel volume",
    );
    assert_close(
        result.total_fuel_cost,
        expected.total_fuel_cost,
        expected.tolerance,
        &golden.name,
        "fuel cost",
    );
}

#[expect(
    clippy::float_arithmetic,
    reason = "totals are compared within a tolerance"
)]
fn assert_close(actual: f64, expected: f64, tolerance: f64, name: &str, what: &str) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "{name}: {what} {actual} differs from {expected} by more than {tolerance}"
    );
}
