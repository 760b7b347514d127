//! SimMod: a reduced-complexity carbon cycle and temperature response model.
//!
//! The model components live in [`simmod_components`], the shared types in
//! [`simmod_core`]. This crate adds the orchestration of a full run.

pub mod collaborators;
pub mod simulation;

pub use simmod_components;
pub use simmod_core;

pub use collaborators::{HeatDiffusion, RadiativeForcing};
pub use simulation::{Simulation, SimulationConfig, SimulationResults};
