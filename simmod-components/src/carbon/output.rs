//! Reporting-interval output of the BEAM integrator.

use serde::{Deserialize, Serialize};
use simmod_core::errors::SimmodResult;
use simmod_core::standard_variables::{
    Variable, VAR_CARBON_MASS_ATMOSPHERE, VAR_CARBON_MASS_LOWER_OCEAN,
    VAR_CARBON_MASS_UPPER_OCEAN, VAR_CUMULATIVE_CO2_EMISSIONS, VAR_TEMPERATURE_ATMOSPHERE,
    VAR_TEMPERATURE_OCEAN,
};
use simmod_core::timeseries::{FloatValue, Time, Timeseries};
use simmod_core::timeseries_collection::{TimeseriesCollection, VariableType};

/// State of the coupled carbon/temperature system at the end of one
/// reporting interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputRow {
    /// unit: GtC
    pub mass_atmosphere: FloatValue,
    /// unit: GtC
    pub mass_upper: FloatValue,
    /// unit: GtC
    pub mass_lower: FloatValue,
    /// unit: °C
    pub temp_atmosphere: FloatValue,
    /// unit: °C
    pub temp_ocean: FloatValue,
    /// Transfer matrix entry (0, 1): upper ocean to atmosphere
    pub phi12: FloatValue,
    /// Transfer matrix entry (1, 1): upper ocean retention
    pub phi22: FloatValue,
    /// Carbon injected since the start of the run
    /// unit: GtC
    pub cumulative: FloatValue,
    pub a: FloatValue,
    pub b: FloatValue,
}

impl OutputRow {
    pub fn total_carbon(&self) -> FloatValue {
        self.mass_atmosphere + self.mass_upper + self.mass_lower
    }

    pub fn get(&self, variable: BeamVariable) -> FloatValue {
        match variable {
            BeamVariable::MassAtmosphere => self.mass_atmosphere,
            BeamVariable::MassUpper => self.mass_upper,
            BeamVariable::MassLower => self.mass_lower,
            BeamVariable::TempAtmosphere => self.temp_atmosphere,
            BeamVariable::TempOcean => self.temp_ocean,
            BeamVariable::Phi12 => self.phi12,
            BeamVariable::Phi22 => self.phi22,
            BeamVariable::Cumulative => self.cumulative,
            BeamVariable::A => self.a,
            BeamVariable::B => self.b,
        }
    }
}

/// Columns of an [`OutputSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamVariable {
    MassAtmosphere,
    MassUpper,
    MassLower,
    TempAtmosphere,
    TempOcean,
    Phi12,
    Phi22,
    Cumulative,
    A,
    B,
}

impl BeamVariable {
    /// Standard variable name, for the columns that have one.
    pub fn standard_variable(&self) -> Option<Variable> {
        match self {
            Self::MassAtmosphere => Some(VAR_CARBON_MASS_ATMOSPHERE),
            Self::MassUpper => Some(VAR_CARBON_MASS_UPPER_OCEAN),
            Self::MassLower => Some(VAR_CARBON_MASS_LOWER_OCEAN),
            Self::TempAtmosphere => Some(VAR_TEMPERATURE_ATMOSPHERE),
            Self::TempOcean => Some(VAR_TEMPERATURE_OCEAN),
            Self::Cumulative => Some(VAR_CUMULATIVE_CO2_EMISSIONS),
            Self::Phi12 | Self::Phi22 | Self::A | Self::B => None,
        }
    }
}

/// One row per reporting interval, the first row holding the initial state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSeries {
    time_step: Time,
    rows: Vec<OutputRow>,
}

impl OutputSeries {
    pub(crate) fn new(time_step: Time, initial: OutputRow) -> Self {
        Self {
            time_step,
            rows: vec![initial],
        }
    }

    pub(crate) fn push(&mut self, row: OutputRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[OutputRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn initial(&self) -> Option<&OutputRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&OutputRow> {
        self.rows.last()
    }

    pub fn time_step(&self) -> Time {
        self.time_step
    }

    /// Elapsed time of each row: `index * time_step`.
    pub fn time(&self) -> Vec<Time> {
        (0..self.rows.len())
            .map(|i| i as Time * self.time_step)
            .collect()
    }

    pub fn column(&self, variable: BeamVariable) -> Vec<FloatValue> {
        self.rows.iter().map(|row| row.get(variable)).collect()
    }

    /// Convert the columns with standard names into a collection indexed by elapsed time.
    pub fn to_collection(&self) -> SimmodResult<TimeseriesCollection> {
        let time = self.time();
        let mut collection = TimeseriesCollection::new();
        for variable in [
            BeamVariable::MassAtmosphere,
            BeamVariable::MassUpper,
            BeamVariable::MassLower,
            BeamVariable::TempAtmosphere,
            BeamVariable::TempOcean,
            BeamVariable::Cumulative,
        ] {
            if let Some(standard) = variable.standard_variable() {
                let ts = Timeseries::from_vecs(self.column(variable), time.clone())?;
                collection.add_timeseries(standard, ts, VariableType::Endogenous)?;
            }
        }
        Ok(collection)
    }
}
