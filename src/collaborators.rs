//! Stages downstream of the carbon cycle.
//!
//! Radiative forcing and the ocean heat-diffusion column are provided by the
//! caller. The orchestrator only needs these two seams.

use simmod_core::carbon_cycle::ConcentrationSeries;
use simmod_core::errors::SimmodResult;
use simmod_core::timeseries::{Time, Timeseries};
use std::fmt::Debug;

/// Total radiative forcing (W / m^2) from atmospheric concentrations.
pub trait RadiativeForcing: Debug + Send + Sync {
    fn forcing(&self, concentrations: &ConcentrationSeries) -> SimmodResult<Timeseries>;
}

/// Global mean surface warming (K) from a forcing trajectory.
pub trait HeatDiffusion: Debug + Send + Sync {
    fn warming(&self, forcing: &Timeseries, run_years: Time, dt: Time) -> SimmodResult<Timeseries>;
}
