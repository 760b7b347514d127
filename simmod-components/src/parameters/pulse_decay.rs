//! Pulse-Decay Parameters
//!
//! Impulse response kernels for the pulse-decay carbon cycle, adapted from
//! Myhrvold and Caldeira (2012) after Joos et al. (1996).

use crate::constants::{
    CH4_EFOLD, CO2_PER_TON_CH4, GRAMS_PER_MOLE_CH4, GRAMS_PER_MOLE_CO2, GRAMS_PER_MOLE_N2O,
    MOLES_IN_ATMOSPHERE, N2O_EFOLD,
};
use serde::{Deserialize, Serialize};
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::FloatValue;

/// Parameters for the pulse-decay model.
///
/// The airborne fraction of a CO2 pulse after $t$ years is
///
/// $$ f(t) = a_0 + \sum_{i=1}^{3} a_i e^{-t/\tau_i} $$
///
/// CH4 and N2O decay with a single e-folding time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseDecayParameters {
    /// Fraction of a CO2 pulse that stays in the atmosphere indefinitely.
    /// default: 0.217
    pub co2_constant_fraction: FloatValue,

    /// Amplitudes of the decaying CO2 kernel terms.
    /// default: [0.259, 0.338, 0.186]
    pub co2_coefficients: [FloatValue; 3],

    /// Timescales of the decaying CO2 kernel terms.
    /// unit: yr
    /// default: [172.9, 18.51, 1.186]
    pub co2_timescales: [FloatValue; 3],

    /// CH4 e-folding lifetime.
    /// unit: yr
    /// default: 10.0
    pub ch4_efold: FloatValue,

    /// N2O e-folding lifetime.
    /// unit: yr
    /// default: 114.0
    pub n2o_efold: FloatValue,

    /// Tons of CO2 produced per ton of CH4 oxidised.
    /// default: 1.5
    pub co2_per_ton_ch4: FloatValue,

    /// Moles of gas in the atmosphere.
    /// default: 1.8e20
    pub moles_in_atmosphere: FloatValue,

    pub grams_per_mole_co2: FloatValue,
    pub grams_per_mole_ch4: FloatValue,
    pub grams_per_mole_n2o: FloatValue,
}

impl Default for PulseDecayParameters {
    fn default() -> Self {
        Self {
            co2_constant_fraction: 0.217,
            co2_coefficients: [0.259, 0.338, 0.186],
            co2_timescales: [172.9, 18.51, 1.186],
            ch4_efold: CH4_EFOLD,
            n2o_efold: N2O_EFOLD,
            co2_per_ton_ch4: CO2_PER_TON_CH4,
            moles_in_atmosphere: MOLES_IN_ATMOSPHERE,
            grams_per_mole_co2: GRAMS_PER_MOLE_CO2,
            grams_per_mole_ch4: GRAMS_PER_MOLE_CH4,
            grams_per_mole_n2o: GRAMS_PER_MOLE_N2O,
        }
    }
}

impl PulseDecayParameters {
    /// Fraction of a CO2 pulse still airborne `t` years after emission.
    pub fn co2_airborne_fraction(&self, t: FloatValue) -> FloatValue {
        let mut fraction = self.co2_constant_fraction;
        for (a, tau) in self.co2_coefficients.iter().zip(self.co2_timescales.iter()) {
            fraction += a * (-t / tau).exp();
        }
        fraction
    }

    pub fn validate(&self) -> SimmodResult<()> {
        let positive = [
            ("co2_timescales[0]", self.co2_timescales[0]),
            ("co2_timescales[1]", self.co2_timescales[1]),
            ("co2_timescales[2]", self.co2_timescales[2]),
            ("ch4_efold", self.ch4_efold),
            ("n2o_efold", self.n2o_efold),
            ("moles_in_atmosphere", self.moles_in_atmosphere),
            ("grams_per_mole_co2", self.grams_per_mole_co2),
            ("grams_per_mole_ch4", self.grams_per_mole_ch4),
            ("grams_per_mole_n2o", self.grams_per_mole_n2o),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimmodError::configuration(format!(
                    "{} must be positive and finite, got {}",
                    name, value
                )));
            }
        }
        let fractions = std::iter::once(&self.co2_constant_fraction)
            .chain(self.co2_coefficients.iter())
            .chain(std::iter::once(&self.co2_per_ton_ch4));
        for value in fractions {
            if !value.is_finite() {
                return Err(SimmodError::configuration("pulse-decay coefficients must be finite"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kernel_starts_at_one() {
        let params = PulseDecayParameters::default();
        assert_relative_eq!(params.co2_airborne_fraction(0.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_kernel_decays_to_constant_fraction() {
        let params = PulseDecayParameters::default();
        let f_10 = params.co2_airborne_fraction(10.0);
        let f_100 = params.co2_airborne_fraction(100.0);
        let f_10000 = params.co2_airborne_fraction(10_000.0);

        assert!(f_10 < 1.0);
        assert!(f_100 < f_10);
        assert_relative_eq!(f_10000, params.co2_constant_fraction, epsilon = 1e-6);
    }

    #[test]
    fn test_rejects_zero_lifetime() {
        let params = PulseDecayParameters {
            ch4_efold: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
