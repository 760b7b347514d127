//! Carbon cycle models
//!
//! - [`BeamIntegrator`]: three-reservoir BEAM carbon cycle with carbonate chemistry
//! - [`PulseDecay`]: impulse-response model for CO2, CH4 and N2O
//! - [`BeamCarbonCycle`]: BEAM behind the [`simmod_core::carbon_cycle::CarbonCycle`] boundary

pub mod beam;
mod beam_cycle;
mod output;
mod pulse_decay;

pub use beam::{BeamIntegrator, CarbonState, TransferMatrix};
pub use beam_cycle::{BeamCarbonCycle, DEFAULT_SUBSTEPS};
pub use output::{BeamVariable, OutputRow, OutputSeries};
pub use pulse_decay::PulseDecay;
