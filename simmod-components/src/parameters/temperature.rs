//! Temperature Response Parameters
//!
//! Two-box (atmosphere / ocean) temperature response following DICE-2010.
//! The `xi` coefficients are per reporting interval and are not rescaled by
//! the time step.

use serde::{Deserialize, Serialize};
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::FloatValue;

/// Parameters shared by the forcing-driven and the linear temperature models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemperatureParameters {
    /// Initial atmosphere and ocean temperature anomalies.
    /// unit: °C
    /// default: [0.7307, 0.0068]
    pub initial_temperature: [FloatValue; 2],

    /// DICE-2010 temperature transfer coefficients.
    ///
    /// `xi[0]`: atmosphere response rate, `xi[2]`: atmosphere to ocean
    /// exchange, `xi[3]`: ocean relaxation rate. `xi[1]` is unused.
    /// default: [0.208, 0.0, 0.310, 0.050]
    pub xi: [FloatValue; 4],

    /// Forcing from a doubling of atmospheric CO2.
    /// unit: W / m^2
    /// default: 3.8
    pub forcing_co2_doubling: FloatValue,

    /// Equilibrium warming from a doubling of atmospheric CO2.
    /// unit: °C
    /// default: 3.2
    pub temp_co2_doubling: FloatValue,

    /// Pre-industrial atmospheric carbon mass.
    /// unit: GtC
    /// default: 592.14
    pub mass_preindustrial: FloatValue,

    /// Exogenous non-CO2 forcing at the start of the ramp (year 2000 in DICE).
    /// unit: W / m^2
    /// default: 0.83
    pub forcing_ghg_start: FloatValue,

    /// Exogenous non-CO2 forcing at the end of the ramp (year 2100 in DICE).
    /// unit: W / m^2
    /// default: 0.30
    pub forcing_ghg_end: FloatValue,

    /// Length of the exogenous forcing ramp.
    /// unit: yr
    /// default: 100.0
    pub forcing_ghg_horizon: FloatValue,

    /// Warming per unit of cumulative carbon for the linear model.
    /// unit: °C / GtC
    /// default: 1.7e-3
    pub linear_coefficient: FloatValue,
}

impl Default for TemperatureParameters {
    fn default() -> Self {
        Self {
            initial_temperature: [0.7307, 0.0068],
            xi: [0.208, 0.0, 0.310, 0.050],
            forcing_co2_doubling: 3.8,
            temp_co2_doubling: 3.2,
            mass_preindustrial: 592.14,
            forcing_ghg_start: 0.83,
            forcing_ghg_end: 0.30,
            forcing_ghg_horizon: 100.0,
            linear_coefficient: 1.7e-3,
        }
    }
}

impl TemperatureParameters {
    /// Climate feedback parameter F2x / T2x (W / m^2 / °C).
    pub fn feedback(&self) -> FloatValue {
        self.forcing_co2_doubling / self.temp_co2_doubling
    }

    pub fn validate(&self) -> SimmodResult<()> {
        let values = self
            .initial_temperature
            .iter()
            .chain(self.xi.iter())
            .chain([
                &self.forcing_co2_doubling,
                &self.temp_co2_doubling,
                &self.mass_preindustrial,
                &self.forcing_ghg_start,
                &self.forcing_ghg_end,
                &self.forcing_ghg_horizon,
                &self.linear_coefficient,
            ]);
        if values.into_iter().any(|v| !v.is_finite()) {
            return Err(SimmodError::configuration("temperature parameters must be finite"));
        }
        if self.temp_co2_doubling == 0.0 {
            return Err(SimmodError::configuration("temp_co2_doubling must be non-zero"));
        }
        if self.mass_preindustrial <= 0.0 {
            return Err(SimmodError::configuration("mass_preindustrial must be positive"));
        }
        if self.forcing_ghg_horizon <= 0.0 {
            return Err(SimmodError::configuration("forcing_ghg_horizon must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_parameters() {
        let params = TemperatureParameters::default();
        assert!(params.validate().is_ok());
        assert_relative_eq!(params.feedback(), 3.8 / 3.2);
    }

    #[test]
    fn test_rejects_non_positive_preindustrial_mass() {
        let params = TemperatureParameters {
            mass_preindustrial: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_serialization() {
        let params = TemperatureParameters::default();
        let json = serde_json::to_string(&params).expect("Serialization failed");
        let parsed: TemperatureParameters =
            serde_json::from_str(&json).expect("Deserialization failed");
        assert_relative_eq!(params.mass_preindustrial, parsed.mass_preindustrial, epsilon = 1e-10);
        assert_relative_eq!(params.xi[3], parsed.xi[3], epsilon = 1e-10);
    }
}
