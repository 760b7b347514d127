//! Components of the SimMod carbon cycle and temperature response.
//!
//! # Modules
//!
//! - [`parameters`]: parameter structs with published defaults
//! - [`chemistry`]: ocean carbonate equilibrium
//! - [`climate`]: two-box temperature response (DICE and linear variants)
//! - [`carbon`]: BEAM integrator, pulse-decay model and the BEAM adapter

pub mod carbon;
pub mod chemistry;
pub mod climate;
pub mod constants;
pub mod parameters;
