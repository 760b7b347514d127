//! The boundary shared by all carbon-cycle models.
//!
//! The orchestrator only sees [`CarbonCycle`]: a model consumes an
//! [`EmissionsTable`] and produces a [`ConcentrationSeries`]. Whether the model
//! integrates reservoir masses or superposes impulse responses is an
//! implementation detail.

use crate::emissions::EmissionsTable;
use crate::errors::{SimmodError, SimmodResult};
use crate::standard_variables::{
    Variable, VAR_CH4_BURDEN, VAR_CH4_CONCENTRATION, VAR_CO2_BURDEN, VAR_CO2_CONCENTRATION,
    VAR_N2O_BURDEN, VAR_N2O_CONCENTRATION,
};
use crate::timeseries::{FloatValue, Time, Timeseries};
use crate::timeseries_collection::{TimeseriesCollection, VariableType};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A carbon-cycle model that can be swapped in at the orchestration boundary.
///
/// Implementations are serialised with `typetag` so the active model can be
/// selected from a configuration file.
#[typetag::serde(tag = "model")]
pub trait CarbonCycle: Debug + Send + Sync {
    /// Compute atmospheric concentrations for every row of `emissions`.
    ///
    /// `run_years` is the length of the run and `dt` the step length, both in years.
    fn concentrations(
        &self,
        run_years: Time,
        dt: Time,
        emissions: &EmissionsTable,
    ) -> SimmodResult<ConcentrationSeries>;
}

/// Atmospheric concentrations, one row per model step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationSeries {
    /// Years since the start of the run
    pub date: Vec<Time>,
    /// Calendar year
    pub year: Vec<Time>,
    /// unit: ppm
    pub co2_ppm: Vec<FloatValue>,
    /// unit: ppb
    pub ch4_ppb: Vec<FloatValue>,
    /// unit: ppb
    pub n2o_ppb: Vec<FloatValue>,
    /// Airborne CO2 from the impulse-response model
    /// unit: PgCO2
    pub co2_pg_atm: Vec<FloatValue>,
    /// unit: TgCH4
    pub ch4_tg_atm: Vec<FloatValue>,
    /// unit: TgN2O
    pub n2o_tg_atm: Vec<FloatValue>,
}

impl ConcentrationSeries {
    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// Shift each gas so that the modelled value at `year` matches the
    /// baseline concentration from `emissions` for that year.
    ///
    /// This removes the offset between the model's spin-up and the observed record.
    /// With sub-annual steps a year spans several rows; the smallest value in
    /// that year is used on both sides.
    pub fn normalize_to_year(&mut self, year: Time, emissions: &EmissionsTable) -> SimmodResult<()> {
        emissions.validate()?;
        let missing = || {
            SimmodError::configuration(format!("normalisation year {} is not part of the run", year))
        };
        if !self.year.contains(&year) || !emissions.year.contains(&year) {
            return Err(missing());
        }

        let co2 = min_in_year(&emissions.year, &emissions.co2_ppm, year)
            - min_in_year(&self.year, &self.co2_ppm, year);
        let ch4 = min_in_year(&emissions.year, &emissions.ch4_ppb, year)
            - min_in_year(&self.year, &self.ch4_ppb, year);
        let n2o = min_in_year(&emissions.year, &emissions.n2o_ppb, year)
            - min_in_year(&self.year, &self.n2o_ppb, year);

        shift(&mut self.co2_ppm, co2);
        shift(&mut self.ch4_ppb, ch4);
        shift(&mut self.n2o_ppb, n2o);
        Ok(())
    }

    /// Convert into named timeseries indexed by years since the start of the run.
    ///
    /// The `date` axis is used rather than `year` because sub-annual steps
    /// repeat calendar years.
    pub fn to_collection(&self) -> SimmodResult<TimeseriesCollection> {
        let mut collection = TimeseriesCollection::new();
        let columns: [(Variable, &Vec<FloatValue>); 6] = [
            (VAR_CO2_CONCENTRATION, &self.co2_ppm),
            (VAR_CH4_CONCENTRATION, &self.ch4_ppb),
            (VAR_N2O_CONCENTRATION, &self.n2o_ppb),
            (VAR_CO2_BURDEN, &self.co2_pg_atm),
            (VAR_CH4_BURDEN, &self.ch4_tg_atm),
            (VAR_N2O_BURDEN, &self.n2o_tg_atm),
        ];
        for (variable, values) in columns {
            let ts = Timeseries::from_vecs(values.clone(), self.date.clone())?;
            collection.add_timeseries(variable, ts, VariableType::Endogenous)?;
        }
        Ok(collection)
    }
}

fn min_in_year(years: &[Time], values: &[FloatValue], year: Time) -> FloatValue {
    years
        .iter()
        .zip(values.iter())
        .filter(|(y, _)| **y == year)
        .map(|(_, v)| *v)
        .fold(FloatValue::INFINITY, FloatValue::min)
}

fn shift(values: &mut [FloatValue], offset: FloatValue) {
    values.iter_mut().for_each(|v| *v += offset);
}
