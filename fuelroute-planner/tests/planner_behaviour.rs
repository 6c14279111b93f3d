#![expect(
    clippy::expect_used,
    reason = "behaviour tests use expect for readable failures"
)]

//! Behavioural tests for the greedy planner using rstest-bdd.

mod golden_routes_support;

use std::cell::{Cell, RefCell};

use fuelroute_core::test_support::{CountingCatalog, FailingCatalog, MemoryCatalog};
use fuelroute_core::{
    Coordinate, DisabledRouteCache, FuelStopCatalog, MemoryRouteCache, PlanError, PlanRequest,
    PlanResult, Planner, RouteCache,
};
use fuelroute_planner::GreedyPlanner;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use golden_routes_support::{
    GoldenRoute, assert_matches_golden, build_planner, build_request, build_stops,
    load_golden_route,
};

type Catalog = CountingCatalog<Box<dyn FuelStopCatalog>>;

/// World state for planner BDD scenarios.
#[derive(Default)]
struct PlannerWorld {
    golden: RefCell<Option<GoldenRoute>>,
    catalog: RefCell<Option<Catalog>>,
    use_cache: Cell<bool>,
    outcomes: RefCell<Vec<Result<PlanResult, PlanError>>>,
}

impl PlannerWorld {
    fn set_catalog(&self, catalog: impl FuelStopCatalog + 'static) {
        self.catalog
            .replace(Some(CountingCatalog::new(Box::new(catalog))));
    }

    fn plan_with_catalog(&self, request: &PlanRequest, times: usize) {
        let borrowed = self.catalog.borrow();
        let catalog = borrowed.as_ref().expect("catalog should be configured");
        let cache: Box<dyn RouteCache> = if self.use_cache.get() {
            Box::new(MemoryRouteCache::new())
        } else {
            Box::new(DisabledRouteCache)
        };
        let planner = GreedyPlanner::new(catalog, cache);
        let mut outcomes = self.outcomes.borrow_mut();
        for _ in 0..times {
            outcomes.push(planner.plan(request));
        }
    }

    fn single_result(&self) -> PlanResult {
        let outcomes = self.outcomes.borrow();
        let outcome = outcomes.first().expect("a plan should be recorded");
        outcome.clone().expect("plan should succeed")
    }
}

#[fixture]
fn world() -> PlannerWorld {
    PlannerWorld::default()
}

fn beyond_range_request() -> PlanRequest {
    let source = Coordinate::new(32.715_736, -117.161_087).expect("valid source");
    let destination = Coordinate::new(34.052_235, -95.085_03).expect("valid destination");
    PlanRequest::new(source, destination).with_range(100.0)
}

#[given("a golden route {name:word}")]
fn given_golden_route(world: &PlannerWorld, name: String) {
    // Strip surrounding quotes that rstest-bdd may include from Gherkin syntax.
    let golden = load_golden_route(name.trim_matches('"'));
    world.set_catalog(MemoryCatalog::with_stops(build_stops(&golden.stops)));
    world.golden.replace(Some(golden));
}

#[given("a planner with an in-memory cache")]
fn with_memory_cache(world: &PlannerWorld) {
    world.use_cache.set(true);
}

#[given("an empty fuel stop catalog")]
fn empty_catalog(world: &PlannerWorld) {
    world.set_catalog(MemoryCatalog::default());
}

#[given("an unavailable fuel stop catalog")]
fn unavailable_catalog(world: &PlannerWorld) {
    world.set_catalog(FailingCatalog);
}

#[when("the planner plans the golden route")]
fn plan_golden(world: &PlannerWorld) {
    let borrowed = world.golden.borrow();
    let golden = borrowed.as_ref().expect("golden route should be loaded");
    let outcome = build_planner(golden).plan(&build_request(&golden.request));
    world.outcomes.borrow_mut().push(outcome);
}

#[when("the golden trip is planned twice")]
fn plan_golden_twice(world: &PlannerWorld) {
    let request = {
        let golden = world.golden.borrow();
        build_request(&golden.as_ref().expect("golden route should be loaded").request)
    };
    world.plan_with_catalog(&request, 2);
}

#[when("a trip beyond the vehicle range is planned")]
fn plan_beyond_range(world: &PlannerWorld) {
    world.plan_with_catalog(&beyond_range_request(), 1);
}

#[then("the route matches the golden expectations")]
fn matches_golden(world: &PlannerWorld) {
    let result = world.single_result();
    let golden = world.golden.borrow();
    assert_matches_golden(golden.as_ref().expect("golden route should be loaded"), &result);
}

#[then("the catalog is read once")]
fn catalog_read_once(world: &PlannerWorld) {
    let catalog = world.catalog.borrow();
    let reads = catalog.as_ref().expect("catalog should be configured").reads();
    assert_eq!(reads, 1);
}

#[then("both plans are identical")]
fn plans_identical(world: &PlannerWorld) {
    let outcomes = world.outcomes.borrow();
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes.first(), outcomes.last());
    assert!(outcomes.iter().all(Result::is_ok));
}

#[then("the route is incomplete")]
fn route_incomplete(world: &PlannerWorld) {
    assert!(!world.single_result().is_complete());
}

#[then("the route holds only the source")]
fn route_holds_source(world: &PlannerWorld) {
    let result = world.single_result();
    assert_eq!(result.route.points(), &[beyond_range_request().source]);
    assert_eq!(result.total_fuel_volume, 0.0);
    assert_eq!(result.total_fuel_cost, 0.0);
}

#[then("planning fails because the catalog is unavailable")]
fn catalog_unavailable(world: &PlannerWorld) {
    let outcomes = world.outcomes.borrow();
    let outcome = outcomes.first().expect("a plan should be recorded");
    assert!(matches!(outcome, Err(PlanError::CatalogUnavailable(_))));
}

#[scenario(path = "tests/features/planner.feature", index = 0)]
fn golden_cross_country_trip(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 1)]
fn repeated_trip_is_cached(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 2)]
fn empty_catalog_strands_vehicle(world: PlannerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/planner.feature", index = 3)]
fn unavailable_catalog_fails(world: PlannerWorld) {
    let _ = world;
}
