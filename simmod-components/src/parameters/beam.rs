//! BEAM Carbon Cycle Parameters
//!
//! Parameters for the three-reservoir Bolin and Eriksson Adjusted Model
//! (BEAM): atmosphere, upper ocean and lower ocean carbon with carbonate
//! chemistry in the upper ocean.

use super::TemperatureParameters;
use crate::constants::SALINITY;
use serde::{Deserialize, Serialize};
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::FloatValue;

/// Carbon in atmosphere, upper ocean and lower ocean in 2005 (GtC).
pub const INITIAL_CARBON_2005: [FloatValue; 3] = [808.9, 725.0, 35641.0];

/// Pre-industrial carbon in atmosphere, upper ocean and lower ocean (GtC).
pub const INITIAL_CARBON_PREINDUSTRIAL: [FloatValue; 3] = [596.0, 713.0, 35625.0];

/// Parameters for the BEAM carbon cycle.
///
/// # Transfer matrix
///
/// Carbon moves between the reservoirs through a first-order exchange matrix
///
/// $$
/// \Phi = \begin{pmatrix}
/// -k_a & k_a A B & 0 \\\\
/// k_a & -k_a A B - k_d & k_d / \delta \\\\
/// 0 & k_d & -k_d / \delta
/// \end{pmatrix}
/// $$
///
/// where $A$ (atmosphere to upper ocean partition) and $B$ (dissolved CO2 to
/// total ocean carbon) come from the carbonate chemistry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamParameters {
    /// Initial carbon in atmosphere, upper ocean and lower ocean.
    /// unit: GtC
    /// default: 2005 values [808.9, 725.0, 35641.0]
    pub initial_carbon: [FloatValue; 3],

    /// Recalibrate k_1, k_2 and k_h from the ocean temperature at the start
    /// of every reporting interval.
    /// default: true
    pub temperature_dependent: bool,

    /// Use the linear-in-cumulative-carbon temperature model instead of the
    /// forcing-driven one.
    /// default: false
    pub linear_temperature: bool,

    /// Atmosphere to upper ocean exchange rate (per reporting interval).
    /// default: 0.2
    pub k_a: FloatValue,

    /// Upper to lower ocean exchange rate (per reporting interval).
    /// default: 0.05
    pub k_d: FloatValue,

    /// Ratio of lower ocean to upper ocean volume.
    /// default: 50.0
    pub delta: FloatValue,

    /// Ocean alkalinity.
    /// unit: GtC
    /// default: 767.0
    pub alkalinity: FloatValue,

    /// Sea water salinity.
    /// unit: g / kg
    /// default: 35.0
    pub salinity: FloatValue,

    /// Moles in the atmosphere.
    /// default: 1.77e20
    pub moles_atmosphere: FloatValue,

    /// Moles in the ocean.
    /// default: 7.8e22
    pub moles_ocean: FloatValue,

    /// Temperature response coupled to the carbon cycle.
    pub temperature: TemperatureParameters,
}

impl Default for BeamParameters {
    fn default() -> Self {
        Self {
            initial_carbon: INITIAL_CARBON_2005,
            temperature_dependent: true,
            linear_temperature: false,
            k_a: 0.2,
            k_d: 0.05,
            delta: 50.0,
            alkalinity: 767.0,
            salinity: SALINITY,
            moles_atmosphere: 1.77e20,
            moles_ocean: 7.8e22,
            temperature: TemperatureParameters::default(),
        }
    }
}

impl BeamParameters {
    /// Ratio of atmospheric moles to upper-ocean moles, the factor that turns
    /// the solubility k_h into the partition ratio A.
    pub fn atmosphere_to_upper_ocean_moles(&self) -> FloatValue {
        self.moles_atmosphere / (self.moles_ocean / (self.delta + 1.0))
    }

    pub fn validate(&self) -> SimmodResult<()> {
        for (name, mass) in ["atmosphere", "upper ocean", "lower ocean"]
            .iter()
            .zip(self.initial_carbon.iter())
        {
            if !mass.is_finite() || *mass <= 0.0 {
                return Err(SimmodError::configuration(format!(
                    "initial {} carbon must be positive and finite, got {}",
                    name, mass
                )));
            }
        }

        let positive = [
            ("k_a", self.k_a),
            ("k_d", self.k_d),
            ("delta", self.delta),
            ("alkalinity", self.alkalinity),
            ("salinity", self.salinity),
            ("moles_atmosphere", self.moles_atmosphere),
            ("moles_ocean", self.moles_ocean),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimmodError::configuration(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }

        self.temperature.validate()
    }
}
