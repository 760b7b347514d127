//! Emissions input table.
//!
//! The table is the hand-off point from scenario loading (which lives outside
//! this workspace) to the carbon-cycle models. One row per model time step.

use crate::errors::{SimmodError, SimmodResult};
use crate::timeseries::{FloatValue, Time};
use log::warn;
use serde::{Deserialize, Serialize};

/// Columnar emissions table.
///
/// Emission columns hold the amount emitted during each step (already multiplied
/// by the step length), the baseline columns hold observed or scenario
/// concentrations used to anchor the modelled concentrations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmissionsTable {
    /// Years since the start of the run
    pub date: Vec<Time>,
    /// Calendar year of each row
    pub year: Vec<Time>,
    /// CO2 emissions
    /// unit: PgCO2 per step
    pub co2_pg: Vec<FloatValue>,
    /// CH4 emissions
    /// unit: TgCH4 per step
    pub ch4_tg: Vec<FloatValue>,
    /// N2O emissions
    /// unit: TgN2O per step
    pub n2o_tg: Vec<FloatValue>,
    /// Baseline CO2 concentration
    /// unit: ppm
    pub co2_ppm: Vec<FloatValue>,
    /// Baseline CH4 concentration
    /// unit: ppb
    pub ch4_ppb: Vec<FloatValue>,
    /// Baseline N2O concentration
    /// unit: ppb
    pub n2o_ppb: Vec<FloatValue>,
}

impl EmissionsTable {
    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    fn columns(&self) -> [(&'static str, &Vec<FloatValue>); 8] {
        [
            ("date", &self.date),
            ("year", &self.year),
            ("co2_pg", &self.co2_pg),
            ("ch4_tg", &self.ch4_tg),
            ("n2o_tg", &self.n2o_tg),
            ("co2_ppm", &self.co2_ppm),
            ("ch4_ppb", &self.ch4_ppb),
            ("n2o_ppb", &self.n2o_ppb),
        ]
    }

    /// Check that every column has one entry per row and that all values are finite.
    pub fn validate(&self) -> SimmodResult<()> {
        let n = self.len();
        for (name, column) in self.columns() {
            if column.len() != n {
                return Err(SimmodError::configuration(format!(
                    "emissions column `{}` has {} rows, expected {}",
                    name,
                    column.len(),
                    n
                )));
            }
            if let Some(i) = column.iter().position(|v| !v.is_finite()) {
                return Err(SimmodError::configuration(format!(
                    "emissions column `{}` has a non-finite value at row {}",
                    name, i
                )));
            }
        }
        Ok(())
    }

    /// Add fixed amounts to the emissions of every row whose year lies in
    /// `start_year..=end_year`.
    ///
    /// Used to build mitigation experiments: negative amounts remove emissions.
    /// Amounts are per step, in the same units as the emission columns.
    pub fn adjust(
        &mut self,
        start_year: Time,
        end_year: Time,
        co2_pg: FloatValue,
        ch4_tg: FloatValue,
        n2o_tg: FloatValue,
    ) -> SimmodResult<()> {
        if end_year < start_year {
            return Err(SimmodError::configuration(format!(
                "adjustment ends ({}) before it starts ({})",
                end_year, start_year
            )));
        }
        self.validate()?;

        let mut adjusted = 0;
        for (i, year) in self.year.iter().enumerate() {
            if *year >= start_year && *year <= end_year {
                self.co2_pg[i] += co2_pg;
                self.ch4_tg[i] += ch4_tg;
                self.n2o_tg[i] += n2o_tg;
                adjusted += 1;
            }
        }
        if adjusted == 0 {
            warn!("emissions adjustment for {} - {} matched no rows", start_year, end_year);
        }
        Ok(())
    }
}
