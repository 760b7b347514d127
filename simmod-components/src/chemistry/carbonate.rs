//! Carbonate Chemistry
//!
//! Equilibrium constants for CO2 in sea water and the hydrogen-ion solve that
//! sets the fraction of upper-ocean carbon present as dissolved CO2.
//!
//! # Equilibrium constants
//!
//! With $t = 283.15 + \Delta T_{ocean}$ (K) and salinity $S$:
//!
//! - Solubility (Weiss 1974):
//!   $k_0 = \exp(9345.17/t - 60.2409 + 23.3585 \ln(t/100) + S(0.023517 - 0.00023656 t + 0.0047036 (t/100)^2))$,
//!   $k_h = 55.57 / (1.027 k_0)$
//! - First and second dissociation constants (Mehrbach et al. 1973, refit by
//!   Millero 1995): $k_1 = 10^{-pK_1}$, $k_2 = 10^{-pK_2}$
//!
//! # Hydrogen ion concentration
//!
//! Charge balance with alkalinity $Alk$ and upper-ocean carbon $M_{up}$ gives
//!
//! $$ H^2 + k_1 (1 - M_{up}/Alk) H + (1 - 2 M_{up}/Alk) k_1 k_2 = 0 $$
//!
//! and the larger root is taken.

use crate::constants::REFERENCE_OCEAN_TEMPERATURE;
use crate::parameters::BeamParameters;
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::FloatValue;

/// CO2 solubility k_h for an ocean temperature anomaly (°C).
pub fn solubility(temp_ocean: FloatValue, salinity: FloatValue) -> FloatValue {
    let t = REFERENCE_OCEAN_TEMPERATURE + temp_ocean;
    let k0 = (9345.17 / t - 60.2409
        + 23.3585 * (t / 100.0).ln()
        + salinity * (0.023517 - 0.00023656 * t + 0.0047036 * (t / 100.0).powi(2)))
    .exp();
    1.0 / (k0 * 1.027) * 55.57
}

fn pk1(t: FloatValue, salinity: FloatValue) -> FloatValue {
    -13.721 + 0.031334 * t + 3235.76 / t + 1.3e-5 * salinity * t - 0.1031 * salinity.sqrt()
}

fn pk2(t: FloatValue, salinity: FloatValue) -> FloatValue {
    (5371.96 + 1.671221 * t + 0.22913 * salinity + 18.3802 * salinity.log10())
        - (128375.28 / t
            + 2194.30 * t.log10()
            + 8.0944e-4 * salinity * t
            + 5617.11 * salinity.log10() / t)
        + 2.136 * salinity / t
}

/// First dissociation constant k_1 for an ocean temperature anomaly (°C).
pub fn first_dissociation(temp_ocean: FloatValue, salinity: FloatValue) -> FloatValue {
    10.0_f64.powf(-pk1(REFERENCE_OCEAN_TEMPERATURE + temp_ocean, salinity))
}

/// Second dissociation constant k_2 for an ocean temperature anomaly (°C).
pub fn second_dissociation(temp_ocean: FloatValue, salinity: FloatValue) -> FloatValue {
    10.0_f64.powf(-pk2(REFERENCE_OCEAN_TEMPERATURE + temp_ocean, salinity))
}

/// Larger real root of the monic quadratic $x^2 + p_1 x + p_2$.
///
/// Uses the cancellation-free form $q = -\frac{1}{2}(p_1 + \mathrm{sgn}(p_1)\sqrt{D})$
/// with roots $q$ and $p_2 / q$.
pub fn larger_quadratic_root(p1: FloatValue, p2: FloatValue) -> SimmodResult<FloatValue> {
    if !p1.is_finite() || !p2.is_finite() {
        return Err(SimmodError::numerical(format!(
            "quadratic coefficients must be finite (p1={}, p2={})",
            p1, p2
        )));
    }
    let discriminant = p1 * p1 - 4.0 * p2;
    if discriminant < 0.0 {
        return Err(SimmodError::numerical(format!(
            "quadratic has no real root (p1={:e}, p2={:e})",
            p1, p2
        )));
    }

    let q = -0.5 * (p1 + p1.signum() * discriminant.sqrt());
    if q == 0.0 {
        // p1 == 0 and p2 == 0: double root at zero
        return Ok(0.0);
    }
    Ok(q.max(p2 / q))
}

/// Temperature-dependent carbonate chemistry constants.
///
/// A value of this type is always internally consistent: k_1, k_2, k_h and the
/// partition ratio A are produced together by [`ChemistryConstants::recalibrate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChemistryConstants {
    /// CO2 solubility
    pub k_h: FloatValue,
    /// First dissociation constant
    pub k_1: FloatValue,
    /// Second dissociation constant
    pub k_2: FloatValue,
    /// Ratio of atmospheric CO2 to upper-ocean dissolved CO2 at equilibrium
    pub a: FloatValue,
}

impl ChemistryConstants {
    /// Compute all constants for an ocean temperature anomaly (°C).
    pub fn recalibrate(temp_ocean: FloatValue, parameters: &BeamParameters) -> SimmodResult<Self> {
        if !temp_ocean.is_finite() {
            return Err(SimmodError::numerical(format!(
                "cannot calibrate chemistry at ocean temperature {}",
                temp_ocean
            )));
        }

        let k_h = solubility(temp_ocean, parameters.salinity);
        let k_1 = first_dissociation(temp_ocean, parameters.salinity);
        let k_2 = second_dissociation(temp_ocean, parameters.salinity);
        let a = k_h * parameters.atmosphere_to_upper_ocean_moles();

        let constants = Self { k_h, k_1, k_2, a };
        if [k_h, k_1, k_2, a].iter().any(|v| !v.is_finite() || *v <= 0.0) {
            return Err(SimmodError::numerical(format!(
                "chemistry constants out of range at ocean temperature {}: {:?}",
                temp_ocean, constants
            )));
        }
        Ok(constants)
    }

    /// Hydrogen ion concentration [H+] for the given upper-ocean carbon mass.
    pub fn hydrogen_ion(
        &self,
        mass_upper: FloatValue,
        alkalinity: FloatValue,
    ) -> SimmodResult<FloatValue> {
        if !mass_upper.is_finite() || mass_upper <= 0.0 {
            return Err(SimmodError::numerical(format!(
                "upper ocean carbon must be positive, got {}",
                mass_upper
            )));
        }
        let p1 = self.k_1 - mass_upper * self.k_1 / alkalinity;
        let p2 = (1.0 - 2.0 * mass_upper / alkalinity) * self.k_1 * self.k_2;
        let h = larger_quadratic_root(p1, p2)?;
        if h <= 0.0 {
            return Err(SimmodError::numerical(format!(
                "no positive hydrogen ion concentration for upper ocean carbon {}",
                mass_upper
            )));
        }
        Ok(h)
    }

    /// Ratio B of dissolved CO2 to total ocean carbon for a given [H+].
    pub fn b(&self, h: FloatValue) -> FloatValue {
        1.0 / (1.0 + self.k_1 / h + self.k_1 * self.k_2 / h.powi(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_constants() -> ChemistryConstants {
        ChemistryConstants {
            k_h: 1.23e3,
            k_1: 2e-6,
            k_2: 5e-10,
            a: 0.0,
        }
    }

    #[test]
    fn test_hydrogen_ion_matches_analytic_root() {
        let chemistry = reference_constants();
        let (k1, k2, alk, m): (f64, f64, f64, f64) = (2e-6, 5e-10, 767.0, 725.0);

        let p1 = k1 - m * k1 / alk;
        let p2 = (1.0 - 2.0 * m / alk) * k1 * k2;
        let expected = (-p1 + (p1 * p1 - 4.0 * p2).sqrt()) / 2.0;

        let h = chemistry.hydrogen_ion(m, alk).unwrap();
        assert_relative_eq!(h, expected, max_relative = 1e-9);
        // The root satisfies the quadratic
        assert!((h * h + p1 * h + p2).abs() < 1e-24);
    }

    #[test]
    fn test_larger_root_is_selected() {
        // (x - 3)(x + 5) = x^2 + 2x - 15
        assert_relative_eq!(larger_quadratic_root(2.0, -15.0).unwrap(), 3.0);
        // (x - 3)(x - 5) = x^2 - 8x + 15
        assert_relative_eq!(larger_quadratic_root(-8.0, 15.0).unwrap(), 5.0);
    }

    #[test]
    fn test_no_real_root_is_a_numerical_error() {
        let err = larger_quadratic_root(0.0, 1.0).unwrap_err();
        assert!(matches!(err, SimmodError::Numerical(_)));
    }

    #[test]
    fn test_non_positive_mass_is_rejected() {
        let chemistry = reference_constants();
        assert!(chemistry.hydrogen_ion(0.0, 767.0).is_err());
        assert!(chemistry.hydrogen_ion(FloatValue::NAN, 767.0).is_err());
    }

    #[test]
    fn test_b_is_a_fraction() {
        let chemistry = reference_constants();
        let h = chemistry.hydrogen_ion(725.0, 767.0).unwrap();
        let b = chemistry.b(h);
        assert!(b > 0.0 && b < 1.0, "B should be a fraction, got {}", b);
    }

    #[test]
    fn test_recalibration_at_reference_temperature() {
        let params = BeamParameters::default();
        let chemistry = ChemistryConstants::recalibrate(0.0, &params).unwrap();

        // Seawater at 10 °C: pK1 ≈ 5.9, pK2 ≈ 9.1
        assert!(
            chemistry.k_1 > 5e-7 && chemistry.k_1 < 2e-6,
            "k_1 out of range: {:e}",
            chemistry.k_1
        );
        assert!(
            chemistry.k_2 > 2e-10 && chemistry.k_2 < 2e-9,
            "k_2 out of range: {:e}",
            chemistry.k_2
        );
        assert!(chemistry.k_h > 500.0 && chemistry.k_h < 3000.0);
        assert_relative_eq!(
            chemistry.a,
            chemistry.k_h * params.atmosphere_to_upper_ocean_moles(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_warming_lowers_solubility() {
        let params = BeamParameters::default();
        let cold = ChemistryConstants::recalibrate(0.0, &params).unwrap();
        let warm = ChemistryConstants::recalibrate(2.0, &params).unwrap();

        // Less CO2 dissolves in warmer water, so more stays in the atmosphere
        assert!(warm.k_h > cold.k_h);
        assert!(warm.a > cold.a);
    }

    #[test]
    fn test_recalibration_rejects_nan() {
        let params = BeamParameters::default();
        assert!(ChemistryConstants::recalibrate(FloatValue::NAN, &params).is_err());
    }
}
