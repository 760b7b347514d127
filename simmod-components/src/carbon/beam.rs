//! BEAM Carbon Cycle Integrator
//!
//! Three-reservoir carbon cycle (atmosphere, upper ocean, lower ocean) with
//! temperature-dependent carbonate chemistry in the upper ocean, coupled to a
//! two-box temperature response.
//!
//! # What This Component Does
//!
//! 1. Calibrates the carbonate chemistry at the initial ocean temperature
//! 2. For every reporting interval:
//!    - recalibrates the chemistry from the ocean temperature carried over
//!      from the previous interval (when temperature dependence is enabled)
//!    - takes `intervals` forward Euler sub-steps of
//!      $$ M \leftarrow M + \Phi \frac{M}{n} + (E \Delta t / n, 0, 0)^T $$
//!      where $\Phi$ is rebuilt every sub-step from the hydrogen-ion solve
//!    - advances the atmosphere and ocean temperatures once
//! 3. Records one [`OutputRow`] per interval, plus the initial state
//!
//! # Inputs
//!
//! - CO2 emissions (GtC/yr), one value per reporting interval
//!
//! # Differences from the published BEAM
//!
//! - Cumulative carbon is incremented once per interval by $E \Delta t$.
//! - The chemistry is always calibrated at the initial ocean temperature
//!   before the first row is written, independent of the order in which
//!   run settings were applied.

use super::output::{OutputRow, OutputSeries};
use crate::chemistry::ChemistryConstants;
use crate::climate::{TemperatureInputs, TemperatureModel, TemperatureState};
use crate::parameters::BeamParameters;
use log::{debug, info, warn};
use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::{FloatValue, Time};

/// Carbon mass in each reservoir (GtC).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarbonState {
    pub atmosphere: FloatValue,
    pub upper_ocean: FloatValue,
    pub lower_ocean: FloatValue,
}

impl CarbonState {
    pub fn new(atmosphere: FloatValue, upper_ocean: FloatValue, lower_ocean: FloatValue) -> Self {
        Self {
            atmosphere,
            upper_ocean,
            lower_ocean,
        }
    }

    pub fn total(&self) -> FloatValue {
        self.atmosphere + self.upper_ocean + self.lower_ocean
    }

    fn as_vector(&self) -> Vector3<FloatValue> {
        Vector3::new(self.atmosphere, self.upper_ocean, self.lower_ocean)
    }

    fn from_vector(mass: &Vector3<FloatValue>) -> Self {
        Self::new(mass[0], mass[1], mass[2])
    }
}

impl From<[FloatValue; 3]> for CarbonState {
    fn from(mass: [FloatValue; 3]) -> Self {
        Self::new(mass[0], mass[1], mass[2])
    }
}

/// First-order exchange matrix between the three reservoirs.
///
/// Every column sums to zero, so the exchange itself neither creates nor
/// destroys carbon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferMatrix(Matrix3<FloatValue>);

impl TransferMatrix {
    pub fn new(parameters: &BeamParameters, a: FloatValue, b: FloatValue) -> Self {
        let k_a = parameters.k_a;
        let k_d = parameters.k_d;
        let delta = parameters.delta;
        Self(Matrix3::new(
            -k_a,
            k_a * a * b,
            0.0,
            k_a,
            -(k_a * a * b) - k_d,
            k_d / delta,
            0.0,
            k_d,
            -k_d / delta,
        ))
    }

    pub fn matrix(&self) -> &Matrix3<FloatValue> {
        &self.0
    }

    pub fn phi11(&self) -> FloatValue {
        self.0[(0, 0)]
    }

    pub fn phi12(&self) -> FloatValue {
        self.0[(0, 1)]
    }

    pub fn phi21(&self) -> FloatValue {
        self.0[(1, 0)]
    }

    pub fn phi22(&self) -> FloatValue {
        self.0[(1, 1)]
    }
}

/// A single BEAM run, with all series lengths bound at construction.
#[derive(Debug, Clone)]
pub struct BeamIntegrator {
    parameters: BeamParameters,
    emissions: Vec<FloatValue>,
    time_step: Time,
    intervals: usize,
    temperature: TemperatureModel,
}

impl BeamIntegrator {
    /// Validate the run settings and bind the temperature model to the run length.
    ///
    /// `emissions` are annual rates (GtC/yr), one per reporting interval of
    /// `time_step` years. Each interval is split into `intervals` sub-steps.
    pub fn new(
        parameters: BeamParameters,
        emissions: Vec<FloatValue>,
        time_step: Time,
        intervals: usize,
    ) -> SimmodResult<Self> {
        parameters.validate()?;
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimmodError::configuration(format!(
                "time step must be positive and finite, got {}",
                time_step
            )));
        }
        if intervals == 0 {
            return Err(SimmodError::configuration(
                "at least one sub-step per interval is required",
            ));
        }
        if let Some(i) = emissions.iter().position(|e| !e.is_finite()) {
            return Err(SimmodError::configuration(format!(
                "emissions must be finite, got {} at interval {}",
                emissions[i], i
            )));
        }

        let temperature = TemperatureModel::new(
            parameters.temperature.clone(),
            parameters.linear_temperature,
            time_step,
            emissions.len(),
        )?;

        Ok(Self {
            parameters,
            emissions,
            time_step,
            intervals,
            temperature,
        })
    }

    pub fn parameters(&self) -> &BeamParameters {
        &self.parameters
    }

    pub fn emissions(&self) -> &[FloatValue] {
        &self.emissions
    }

    pub fn time_step(&self) -> Time {
        self.time_step
    }

    pub fn intervals(&self) -> usize {
        self.intervals
    }

    pub fn temperature_model(&self) -> &TemperatureModel {
        &self.temperature
    }

    pub fn initial_state(&self) -> CarbonState {
        CarbonState::from(self.parameters.initial_carbon)
    }

    fn transfer_matrix(
        &self,
        chemistry: &ChemistryConstants,
        mass_upper: FloatValue,
    ) -> SimmodResult<(TransferMatrix, FloatValue)> {
        let h = chemistry.hydrogen_ion(mass_upper, self.parameters.alkalinity)?;
        let b = chemistry.b(h);
        Ok((TransferMatrix::new(&self.parameters, chemistry.a, b), b))
    }

    /// Integrate the whole run.
    pub fn run(&self) -> SimmodResult<OutputSeries> {
        let parameters = &self.parameters;
        let n = self.emissions.len();
        info!(
            "Running BEAM: {} intervals of {} yr, {} sub-steps each, temperature dependent: {}",
            n, self.time_step, self.intervals, parameters.temperature_dependent
        );
        if n == 0 {
            warn!("No emissions supplied, BEAM output only holds the initial state");
        }

        let mut temperature = self.temperature.initial_temperature();
        let mut chemistry = ChemistryConstants::recalibrate(temperature.ocean, parameters)?;
        let mut mass = self.initial_state().as_vector();
        let (mut transfer, mut b) = self.transfer_matrix(&chemistry, mass[1])?;
        let mut cumulative = 0.0;

        let mut output = OutputSeries::new(
            self.time_step,
            self.row(&mass, &temperature, &transfer, cumulative, &chemistry, b),
        );

        let substeps = self.intervals as FloatValue;
        for (index, emission) in self.emissions.iter().enumerate() {
            if parameters.temperature_dependent {
                chemistry = ChemistryConstants::recalibrate(temperature.ocean, parameters)?;
            }

            let injection = Vector3::new(emission * self.time_step / substeps, 0.0, 0.0);
            for _ in 0..self.intervals {
                (transfer, b) = self.transfer_matrix(&chemistry, mass[1])?;
                mass += transfer.matrix() * (mass / substeps) + injection;
            }
            if mass.iter().any(|m| !m.is_finite() || *m <= 0.0) {
                return Err(SimmodError::numerical(format!(
                    "carbon mass left the physical range at interval {}: {:?}",
                    index,
                    CarbonState::from_vector(&mass)
                )));
            }

            cumulative += emission * self.time_step;
            temperature = self.temperature.advance(&TemperatureInputs {
                index,
                previous: temperature,
                mass_atmosphere: mass[0],
                cumulative_carbon: cumulative,
            })?;

            debug!(
                "interval {}: mass {:?}, temperature {:?}",
                index,
                CarbonState::from_vector(&mass),
                temperature
            );
            output.push(self.row(&mass, &temperature, &transfer, cumulative, &chemistry, b));
        }

        info!("BEAM finished: {} rows, cumulative emissions {:.2} GtC", output.len(), cumulative);
        Ok(output)
    }

    fn row(
        &self,
        mass: &Vector3<FloatValue>,
        temperature: &TemperatureState,
        transfer: &TransferMatrix,
        cumulative: FloatValue,
        chemistry: &ChemistryConstants,
        b: FloatValue,
    ) -> OutputRow {
        OutputRow {
            mass_atmosphere: mass[0],
            mass_upper: mass[1],
            mass_lower: mass[2],
            temp_atmosphere: temperature.atmosphere,
            temp_ocean: temperature.ocean,
            phi12: transfer.phi12(),
            phi22: transfer.phi22(),
            cumulative,
            a: chemistry.a,
            b,
        }
    }
}

/// Run BEAM with default parameters apart from the initial state and mode flags.
pub fn run(
    emissions: &[FloatValue],
    time_step: Time,
    intervals: usize,
    initial_state: CarbonState,
    temperature_dependent: bool,
    linear_temperature: bool,
) -> SimmodResult<OutputSeries> {
    let parameters = BeamParameters {
        initial_carbon: [
            initial_state.atmosphere,
            initial_state.upper_ocean,
            initial_state.lower_ocean,
        ],
        temperature_dependent,
        linear_temperature,
        ..Default::default()
    };
    BeamIntegrator::new(parameters, emissions.to_vec(), time_step, intervals)?.run()
}
