//! BEAM as an interchangeable carbon-cycle model.
//!
//! CH4 and N2O come from the pulse-decay model, CO2 from the BEAM
//! atmosphere reservoir at the start of each step.

use super::beam::BeamIntegrator;
use super::output::BeamVariable;
use super::pulse_decay::PulseDecay;
use crate::constants::{C_TO_CO2, MOLES_IN_ATMOSPHERE, PGC_TO_MOL};
use crate::parameters::{BeamParameters, PulseDecayParameters, INITIAL_CARBON_PREINDUSTRIAL};
use log::info;
use serde::{Deserialize, Serialize};
use simmod_core::carbon_cycle::{CarbonCycle, ConcentrationSeries};
use simmod_core::emissions::EmissionsTable;
use simmod_core::errors::SimmodResult;
use simmod_core::timeseries::{FloatValue, Time};

/// Sub-steps per reporting interval used when none is configured.
pub const DEFAULT_SUBSTEPS: usize = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamCarbonCycle {
    /// Carbon in atmosphere, upper ocean and lower ocean at the start of the run.
    ///
    /// Replaces `parameters.initial_carbon`, so a `[parameters]` table that
    /// only changes rates or mode flags still starts from pre-industrial.
    /// unit: GtC
    /// default: [596.0, 713.0, 35625.0]
    pub initial_carbon: [FloatValue; 3],
    /// BEAM rates, chemistry and temperature settings.
    pub parameters: BeamParameters,
    /// Forward Euler sub-steps per reporting interval.
    /// default: 100
    pub substeps: usize,
    /// Impulse responses used for CH4 and N2O.
    pub non_co2: PulseDecayParameters,
}

impl Default for BeamCarbonCycle {
    fn default() -> Self {
        Self {
            initial_carbon: INITIAL_CARBON_PREINDUSTRIAL,
            parameters: BeamParameters {
                initial_carbon: INITIAL_CARBON_PREINDUSTRIAL,
                ..Default::default()
            },
            substeps: DEFAULT_SUBSTEPS,
            non_co2: PulseDecayParameters::default(),
        }
    }
}

impl BeamCarbonCycle {
    pub fn from_parameters(parameters: BeamParameters, substeps: usize) -> Self {
        Self {
            initial_carbon: parameters.initial_carbon,
            parameters,
            substeps,
            ..Default::default()
        }
    }

    /// Annual carbon emission rates (GtC/yr) from per-step CO2 emissions (PgCO2).
    fn carbon_rates(emissions: &EmissionsTable, dt: Time) -> Vec<FloatValue> {
        emissions
            .co2_pg
            .iter()
            .map(|co2| co2 / C_TO_CO2 / dt)
            .collect()
    }
}

#[typetag::serde(name = "beam")]
impl CarbonCycle for BeamCarbonCycle {
    fn concentrations(
        &self,
        run_years: Time,
        dt: Time,
        emissions: &EmissionsTable,
    ) -> SimmodResult<ConcentrationSeries> {
        let mut concentrations =
            PulseDecay::from_parameters(self.non_co2.clone()).run(run_years, dt, emissions)?;

        let parameters = BeamParameters {
            initial_carbon: self.initial_carbon,
            ..self.parameters.clone()
        };
        let integrator = BeamIntegrator::new(
            parameters,
            Self::carbon_rates(emissions, dt),
            dt,
            self.substeps,
        )?;
        let output = integrator.run()?;
        info!("Replacing pulse-decay CO2 with BEAM atmospheric carbon");

        // Row i of the output is the state at the start of step i
        let n = concentrations.len();
        concentrations.co2_ppm = output
            .column(BeamVariable::MassAtmosphere)
            .into_iter()
            .take(n)
            .map(|mass| mass * PGC_TO_MOL * 1e6 / MOLES_IN_ATMOSPHERE)
            .collect();
        Ok(concentrations)
    }
}
