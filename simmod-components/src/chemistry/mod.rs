//! Ocean carbonate chemistry
//!
//! - [`ChemistryConstants`]: temperature-dependent equilibrium constants and
//!   the partition ratio A, recalibrated as one value.
//! - [`larger_quadratic_root`]: root selection used for the hydrogen-ion solve.

mod carbonate;

pub use carbonate::{
    first_dissociation, larger_quadratic_root, second_dissociation, solubility,
    ChemistryConstants,
};
