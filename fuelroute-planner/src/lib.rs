//! Greedy fuel-stop route planning.
//!
//! This crate provides [`GreedyPlanner`], the default implementation of the
//! [`Planner`](fuelroute_core::Planner) trait. From the current position it
//! repeatedly picks the cheapest fuel stop that is within range and closer to
//! the destination, until the destination itself is reachable. The choice is
//! locally optimal only: it does not search for the globally cheapest or
//! shortest route.
//!
//! The building blocks are exposed separately: [`select_next_stop`] makes a
//! single choice, [`build_route`] runs the loop against a
//! [`CatalogSnapshot`](fuelroute_core::CatalogSnapshot) and
//! [`CostAccountant`] prices a finished route.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod accountant;
mod builder;
mod planner;
mod selector;

pub use accountant::{CostAccountant, DEFAULT_MILES_PER_UNIT, FuelTotals, SourceLegPricing};
pub use builder::build_route;
pub use planner::{GreedyPlanner, PlannerConfig};
pub use selector::{NoReachableStop, select_next_stop};
