//! Two-Box Temperature Response
//!
//! Atmosphere and ocean temperature anomalies advanced once per reporting
//! interval.
//!
//! # What This Component Does
//!
//! 1. Relaxes the ocean temperature towards the atmosphere temperature:
//!    $T_o' = T_o + \xi_3 (T_a - T_o)$
//! 2. Advances the atmosphere temperature with one of two variants:
//!    - **DICE**: forcing driven,
//!      $T_a' = T_a + \xi_0 (F - \lambda T_a - \xi_2 (T_a - T_o))$ with
//!      $F = F_{2x} \log_2(M_a / M_{pi}) + F_{EX}$ and $\lambda = F_{2x} / T_{2x}$
//!    - **Linear**: $T_a' = T_{a,0} + \gamma C$ where $C$ is cumulative carbon
//!
//! # Inputs
//!
//! - Previous atmosphere and ocean temperature (°C)
//! - Atmospheric carbon mass (GtC)
//! - Cumulative injected carbon (GtC)
//!
//! # Differences from DICE-2010
//!
//! - The exogenous forcing ramp is sampled on the run's reporting interval
//!   rather than on fixed decades, and is sized for the run up front.

use crate::parameters::TemperatureParameters;
use log::debug;
use serde::{Deserialize, Serialize};
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::{FloatValue, Time};

/// Atmosphere and ocean temperature anomalies (°C).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureState {
    pub atmosphere: FloatValue,
    pub ocean: FloatValue,
}

impl TemperatureState {
    pub fn new(atmosphere: FloatValue, ocean: FloatValue) -> Self {
        Self { atmosphere, ocean }
    }
}

/// Everything a temperature variant may need to advance one interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureInputs {
    /// Reporting interval being completed
    pub index: usize,
    /// Temperatures at the start of the interval
    pub previous: TemperatureState,
    /// Atmospheric carbon at the end of the interval
    /// unit: GtC
    pub mass_atmosphere: FloatValue,
    /// Carbon injected since the start of the run
    /// unit: GtC
    pub cumulative_carbon: FloatValue,
}

/// Forcing-driven temperature response (DICE-2010).
#[derive(Debug, Clone, PartialEq)]
pub struct DiceTemperature {
    parameters: TemperatureParameters,
    exogenous_forcing: Vec<FloatValue>,
}

impl DiceTemperature {
    /// Build the model for a run of `intervals` reporting intervals of length `time_step`.
    ///
    /// The non-CO2 forcing ramps linearly from `forcing_ghg_start` to
    /// `forcing_ghg_end` over `forcing_ghg_horizon` years and is held
    /// afterwards.
    pub fn new(
        parameters: TemperatureParameters,
        time_step: Time,
        intervals: usize,
    ) -> SimmodResult<Self> {
        parameters.validate()?;
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimmodError::configuration(format!(
                "time step must be positive, got {}",
                time_step
            )));
        }

        let ramp_steps = (parameters.forcing_ghg_horizon / time_step).floor() as usize;
        if ramp_steps == 0 && intervals > 0 {
            return Err(SimmodError::configuration(format!(
                "time step {} is longer than the {} year forcing ramp",
                time_step, parameters.forcing_ghg_horizon
            )));
        }

        let start = parameters.forcing_ghg_start;
        let end = parameters.forcing_ghg_end;
        let exogenous_forcing = (0..intervals)
            .map(|k| {
                if k <= ramp_steps {
                    start + (k as FloatValue / ramp_steps as FloatValue) * (end - start)
                } else {
                    end
                }
            })
            .collect();

        Ok(Self {
            parameters,
            exogenous_forcing,
        })
    }

    pub fn parameters(&self) -> &TemperatureParameters {
        &self.parameters
    }

    /// Non-CO2 forcing for each reporting interval (W / m^2).
    pub fn exogenous_forcing(&self) -> &[FloatValue] {
        &self.exogenous_forcing
    }

    /// Total radiative forcing for interval `index` (W / m^2).
    pub fn forcing(&self, index: usize, mass_atmosphere: FloatValue) -> SimmodResult<FloatValue> {
        if !mass_atmosphere.is_finite() || mass_atmosphere <= 0.0 {
            return Err(SimmodError::numerical(format!(
                "atmospheric carbon must be positive to compute forcing, got {}",
                mass_atmosphere
            )));
        }
        let exogenous = self.exogenous_forcing.get(index).copied().ok_or_else(|| {
            SimmodError::configuration(format!(
                "interval {} is outside the {} interval forcing schedule",
                index,
                self.exogenous_forcing.len()
            ))
        })?;

        let p = &self.parameters;
        Ok(p.forcing_co2_doubling * (mass_atmosphere / p.mass_preindustrial).log2() + exogenous)
    }

    pub fn temp_atmosphere(&self, inputs: &TemperatureInputs) -> SimmodResult<FloatValue> {
        let p = &self.parameters;
        let ta = inputs.previous.atmosphere;
        let to = inputs.previous.ocean;
        let forcing = self.forcing(inputs.index, inputs.mass_atmosphere)?;
        debug!("interval {}: forcing {:.4} W/m^2", inputs.index, forcing);

        Ok(ta + p.xi[0] * (forcing - p.feedback() * ta - p.xi[2] * (ta - to)))
    }
}

/// Warming proportional to cumulative carbon.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTemperature {
    parameters: TemperatureParameters,
}

impl LinearTemperature {
    pub fn new(parameters: TemperatureParameters) -> SimmodResult<Self> {
        parameters.validate()?;
        Ok(Self { parameters })
    }

    pub fn parameters(&self) -> &TemperatureParameters {
        &self.parameters
    }

    pub fn temp_atmosphere(&self, inputs: &TemperatureInputs) -> FloatValue {
        self.parameters.initial_temperature[0]
            + self.parameters.linear_coefficient * inputs.cumulative_carbon
    }
}

/// The active temperature variant.
#[derive(Debug, Clone, PartialEq)]
pub enum TemperatureModel {
    Dice(DiceTemperature),
    Linear(LinearTemperature),
}

impl TemperatureModel {
    /// Select a variant and size it for a run of `intervals` intervals.
    pub fn new(
        parameters: TemperatureParameters,
        linear: bool,
        time_step: Time,
        intervals: usize,
    ) -> SimmodResult<Self> {
        if linear {
            Ok(Self::Linear(LinearTemperature::new(parameters)?))
        } else {
            Ok(Self::Dice(DiceTemperature::new(parameters, time_step, intervals)?))
        }
    }

    fn parameters(&self) -> &TemperatureParameters {
        match self {
            Self::Dice(model) => model.parameters(),
            Self::Linear(model) => model.parameters(),
        }
    }

    pub fn initial_temperature(&self) -> TemperatureState {
        let [atmosphere, ocean] = self.parameters().initial_temperature;
        TemperatureState::new(atmosphere, ocean)
    }

    pub fn temp_atmosphere(&self, inputs: &TemperatureInputs) -> SimmodResult<FloatValue> {
        match self {
            Self::Dice(model) => model.temp_atmosphere(inputs),
            Self::Linear(model) => Ok(model.temp_atmosphere(inputs)),
        }
    }

    /// Relax the ocean towards the previous atmosphere temperature.
    pub fn temp_ocean(&self, temp_atmosphere: FloatValue, temp_ocean: FloatValue) -> FloatValue {
        temp_ocean + self.parameters().xi[3] * (temp_atmosphere - temp_ocean)
    }

    /// Advance both temperatures by one reporting interval.
    ///
    /// The ocean update uses the atmosphere temperature from the start of the
    /// interval.
    pub fn advance(&self, inputs: &TemperatureInputs) -> SimmodResult<TemperatureState> {
        let atmosphere = self.temp_atmosphere(inputs)?;
        let ocean = self.temp_ocean(inputs.previous.atmosphere, inputs.previous.ocean);
        if !atmosphere.is_finite() || !ocean.is_finite() {
            return Err(SimmodError::numerical(format!(
                "temperature became non-finite at interval {}",
                inputs.index
            )));
        }
        Ok(TemperatureState::new(atmosphere, ocean))
    }
}
