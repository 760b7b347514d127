//! Component parameters
//!
//! Each parameter struct provides defaults matching the published BEAM,
//! DICE-2010 and SimMod pulse-response configurations. All of them derive
//! `Deserialize` with `#[serde(default)]`, so partial TOML documents can be
//! loaded with [`simmod_core::config::from_toml`].

mod beam;
mod pulse_decay;
mod temperature;

pub use beam::{BeamParameters, INITIAL_CARBON_2005, INITIAL_CARBON_PREINDUSTRIAL};
pub use pulse_decay::PulseDecayParameters;
pub use temperature::TemperatureParameters;
