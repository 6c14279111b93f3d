//! Per-leg fuel volume and cost accounting.

use fuelroute_core::{CatalogSnapshot, LegCost, Route, RouteStatus, UnitPrice, distance_miles};

/// Default consumption rate in miles per fuel unit.
pub const DEFAULT_MILES_PER_UNIT: f64 = 10.0;

/// How the leg leaving the trip source is priced.
///
/// The source is usually not a fuel stop, so it carries no catalog price.
/// When the source does coincide with a catalog stop, that stop's price is
/// used whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceLegPricing {
    /// Fuel for the first leg was bought before the trip: volume counts, cost
    /// is zero.
    #[default]
    PrepaidTank,
    /// Price the first leg at the first refuelling stop on the route. A route
    /// with no refuelling stops prices it at zero, even when the destination
    /// is itself a catalog stop.
    FirstStopPrice,
    /// Exclude the first leg from both volume and cost.
    Omit,
}

/// Fuel totals for a route.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelTotals {
    /// Per-leg breakdown in traversal order.
    pub legs: Vec<LegCost>,
    /// Sum of leg volumes.
    pub total_fuel_volume: f64,
    /// Sum of leg costs.
    pub total_fuel_cost: f64,
}

/// Derives fuel volume and cost from leg distances and stop prices.
///
/// Each leg consumes `distance / miles_per_unit` fuel units, paid for at the
/// price of the stop the leg starts from.
///
/// # Examples
///
/// ```
/// use fuelroute_core::{CatalogSnapshot, Coordinate, Route, RouteStatus};
/// use fuelroute_planner::{CostAccountant, SourceLegPricing};
///
/// # fn main() -> Result<(), fuelroute_core::CoordinateError> {
/// let mut route = Route::starting_at(Coordinate::new(0.0, 0.0)?);
/// route.push(Coordinate::new(0.0, 1.0)?);
/// let accountant = CostAccountant::new(10.0, SourceLegPricing::PrepaidTank);
/// let snapshot = CatalogSnapshot::default();
/// let totals = accountant.account(&route, RouteStatus::Complete, &snapshot);
/// assert!(totals.total_fuel_volume > 6.9);
/// assert_eq!(totals.total_fuel_cost, 0.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostAccountant {
    miles_per_unit: f64,
    source_leg: SourceLegPricing,
}

impl Default for CostAccountant {
    fn default() -> Self {
        Self::new(DEFAULT_MILES_PER_UNIT, SourceLegPricing::default())
    }
}

impl CostAccountant {
    /// Construct an accountant. `miles_per_unit` must be finite and positive.
    #[must_use]
    pub const fn new(miles_per_unit: f64, source_leg: SourceLegPricing) -> Self {
        Self {
            miles_per_unit,
            source_leg,
        }
    }

    /// Consumption rate in miles per fuel unit.
    #[must_use]
    pub const fn miles_per_unit(&self) -> f64 {
        self.miles_per_unit
    }

    /// Pricing policy for the first leg.
    #[must_use]
    pub const fn source_leg(&self) -> SourceLegPricing {
        self.source_leg
    }

    /// Compute per-leg and total fuel figures for `route`.
    ///
    /// `status` tells whether the last point is the destination or the last
    /// refuelling stop reached.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "fuel volume and cost are derived from floating-point distances"
    )]
    pub fn account(
        &self,
        route: &Route,
        status: RouteStatus,
        snapshot: &CatalogSnapshot,
    ) -> FuelTotals {
        let points = route.points();
        let refuelling_end = if status.is_complete() {
            points.len().saturating_sub(1)
        } else {
            points.len()
        };
        let first_stop_price = points
            .iter()
            .take(refuelling_end)
            .skip(1)
            .find_map(|point| snapshot.stop_at(*point))
            .map(|stop| stop.price);

        let legs: Vec<LegCost> = route
            .legs()
            .enumerate()
            .map(|(index, (from, to))| {
                let distance = distance_miles(from, to);
                let volume = distance / self.miles_per_unit;
                let catalog_price = snapshot.stop_at(from).map(|stop| stop.price);
                let (fuel_volume, unit_price) = match (index, catalog_price) {
                    (_, Some(price)) => (volume, Some(price)),
                    (0, None) => self.price_source_leg(volume, first_stop_price),
                    (_, None) => {
                        log::debug!("leg from {from} does not start at a fuel stop; cost is zero");
                        (volume, None)
                    }
                };
                LegCost {
                    from,
                    to,
                    distance_miles: distance,
                    fuel_volume,
                    fuel_cost: leg_cost(fuel_volume, unit_price),
                    unit_price,
                }
            })
            .collect();

        // Folding from +0.0 keeps an empty route's totals at positive zero.
        let total_fuel_volume = legs.iter().fold(0.0, |total, leg| total + leg.fuel_volume);
        let total_fuel_cost = legs.iter().fold(0.0, |total, leg| total + leg.fuel_cost);
        FuelTotals {
            legs,
            total_fuel_volume,
            total_fuel_cost,
        }
    }

    const fn price_source_leg(
        &self,
        volume: f64,
        first_stop_price: Option<UnitPrice>,
    ) -> (f64, Option<UnitPrice>) {
        match self.source_leg {
            SourceLegPricing::PrepaidTank => (volume, None),
            SourceLegPricing::FirstStopPrice => (volume, first_stop_price),
            SourceLegPricing::Omit => (0.0, None),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "cost is volume multiplied by a decimal price"
)]
fn leg_cost(volume: f64, price: Option<UnitPrice>) -> f64 {
    price.map_or(0.0, |price| volume * price.amount())
}
