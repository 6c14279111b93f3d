//! Shared test harness modules for the fuelroute CLI.

mod helpers;
mod plan_unit;
