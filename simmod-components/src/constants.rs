//! Physical constants and unit conversions shared by the components.

use simmod_core::timeseries::FloatValue;

/// Mass ratio of CO2 to carbon (44/12, rounded as in the published model).
pub const C_TO_CO2: FloatValue = 3.67;

/// Moles of carbon in one petagram.
pub const PGC_TO_MOL: FloatValue = 1e15 / 12.0;

/// Moles of gas in the atmosphere, used for concentration conversions.
pub const MOLES_IN_ATMOSPHERE: FloatValue = 1.8e20;

pub const GRAMS_PER_MOLE_CO2: FloatValue = 44.01;
pub const GRAMS_PER_MOLE_CH4: FloatValue = 16.04;
pub const GRAMS_PER_MOLE_N2O: FloatValue = 44.01;

/// Tons of CO2 produced when one ton of CH4 is oxidised.
pub const CO2_PER_TON_CH4: FloatValue = 1.5;

/// e-folding lifetime of CH4 (yr).
pub const CH4_EFOLD: FloatValue = 10.0;

/// e-folding lifetime of N2O (yr).
pub const N2O_EFOLD: FloatValue = 114.0;

/// Mean ocean surface temperature the chemistry anomalies are relative to (K).
///
/// 273.15 K plus a 10 °C mean surface temperature.
pub const REFERENCE_OCEAN_TEMPERATURE: FloatValue = 283.15;

/// Sea water salinity (g / kg).
pub const SALINITY: FloatValue = 35.0;

/// Grams per teragram and per petagram.
pub const GRAMS_PER_TG: FloatValue = 1e12;
pub const GRAMS_PER_PG: FloatValue = 1e15;
