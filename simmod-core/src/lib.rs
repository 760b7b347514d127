//! Core types and traits for the SimMod carbon cycle model.
//!
//! Components live in `simmod-components`; this crate holds what they share:
//! the error taxonomy, timeseries containers, the emissions table and the
//! [`carbon_cycle::CarbonCycle`] boundary that makes carbon-cycle models
//! interchangeable.

pub mod carbon_cycle;
pub mod config;
pub mod emissions;
pub mod errors;
pub mod standard_variables;
pub mod timeseries;
pub mod timeseries_collection;
