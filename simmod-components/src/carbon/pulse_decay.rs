//! Pulse-Decay Carbon Cycle
//!
//! Superposes impulse responses of every elapsed emission pulse to obtain
//! atmospheric burdens of CO2, CH4 and N2O (Myhrvold and Caldeira 2012, after
//! Joos et al. 1996).
//!
//! # What This Component Does
//!
//! For pulse $k$ emitted at $t_k = k \Delta t$ and every row $i \ge k$ with
//! $s = date_i - t_k$:
//!
//! 1. CH4 decays with a single e-folding time: $CH_4(s) = E_k e^{-s/\tau}$
//! 2. Oxidised CH4 becomes CO2. The per-row increase of the oxidised amount
//!    is added to a marginal CO2 emission for that row
//! 3. CO2 (including the marginal CH4 contribution of row $k$) follows the
//!    four-term airborne fraction kernel
//! 4. N2O decays with a single e-folding time
//!
//! Burdens are converted to concentrations above the first-row baseline.

use crate::constants::{GRAMS_PER_PG, GRAMS_PER_TG};
use crate::parameters::PulseDecayParameters;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use simmod_core::carbon_cycle::{CarbonCycle, ConcentrationSeries};
use simmod_core::emissions::EmissionsTable;
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::{FloatValue, Time};

/// Impulse-response carbon cycle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PulseDecay {
    #[serde(default)]
    parameters: PulseDecayParameters,
}

impl PulseDecay {
    pub fn new() -> Self {
        Self::from_parameters(PulseDecayParameters::default())
    }

    pub fn from_parameters(parameters: PulseDecayParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &PulseDecayParameters {
        &self.parameters
    }

    /// Number of pulses for a run: one per step, `ceil(run_years / dt)`.
    fn pulse_count(run_years: Time, dt: Time) -> SimmodResult<usize> {
        if !dt.is_finite() || dt <= 0.0 {
            return Err(SimmodError::configuration(format!(
                "time step must be positive and finite, got {}",
                dt
            )));
        }
        if !run_years.is_finite() || run_years < 0.0 {
            return Err(SimmodError::configuration(format!(
                "run length must be non-negative and finite, got {}",
                run_years
            )));
        }
        Ok((run_years / dt).ceil() as usize)
    }

    /// Burdens and concentrations for every row of `emissions`.
    pub fn run(
        &self,
        run_years: Time,
        dt: Time,
        emissions: &EmissionsTable,
    ) -> SimmodResult<ConcentrationSeries> {
        self.parameters.validate()?;
        emissions.validate()?;
        let pulses = Self::pulse_count(run_years, dt)?;
        let n = emissions.len();
        if pulses != n {
            return Err(SimmodError::configuration(format!(
                "a {} year run with dt = {} needs {} emission rows, got {}",
                run_years, dt, pulses, n
            )));
        }
        info!("Running pulse decay: {} pulses", pulses);

        let p = &self.parameters;
        let mut co2_pg_atm = vec![0.0; n];
        let mut ch4_tg_atm = vec![0.0; n];
        let mut n2o_tg_atm = vec![0.0; n];
        let mut ch4_co2_marginal = vec![0.0; n];
        let mut ch4_co2_decay = vec![0.0; n];

        for k in 0..pulses {
            let pulse_time = k as Time * dt;

            for i in k..n {
                let s = emissions.date[i] - pulse_time;
                let remaining = emissions.ch4_tg[k] * (-s / p.ch4_efold).exp();
                ch4_tg_atm[i] += remaining;
                // Tg CH4 -> Pg CO2
                ch4_co2_decay[i] = (emissions.ch4_tg[k] - remaining) * p.co2_per_ton_ch4 / 1e3;
            }
            for i in k..n.saturating_sub(1) {
                ch4_co2_marginal[i] += ch4_co2_decay[i + 1] - ch4_co2_decay[i];
            }

            let co2_pulse = emissions.co2_pg[k] + ch4_co2_marginal[k];
            for i in k..n {
                let s = emissions.date[i] - pulse_time;
                co2_pg_atm[i] += co2_pulse * p.co2_airborne_fraction(s);
                n2o_tg_atm[i] += emissions.n2o_tg[k] * (-s / p.n2o_efold).exp();
            }
        }

        let (co2_0, ch4_0, n2o_0) = match n {
            0 => (0.0, 0.0, 0.0),
            _ => (emissions.co2_ppm[0], emissions.ch4_ppb[0], emissions.n2o_ppb[0]),
        };
        let co2_ppm = co2_pg_atm
            .iter()
            .map(|b| co2_0 + self.mixing_ratio(b * GRAMS_PER_PG, p.grams_per_mole_co2) * 1e6)
            .collect();
        let ch4_ppb = ch4_tg_atm
            .iter()
            .map(|b| ch4_0 + self.mixing_ratio(b * GRAMS_PER_TG, p.grams_per_mole_ch4) * 1e9)
            .collect();
        let n2o_ppb = n2o_tg_atm
            .iter()
            .map(|b| n2o_0 + self.mixing_ratio(b * GRAMS_PER_TG, p.grams_per_mole_n2o) * 1e9)
            .collect();

        if let Some(last) = co2_pg_atm.last() {
            debug!("final airborne CO2 from pulses: {:.2} PgCO2", last);
        }

        Ok(ConcentrationSeries {
            date: emissions.date.clone(),
            year: emissions.year.clone(),
            co2_ppm,
            ch4_ppb,
            n2o_ppb,
            co2_pg_atm,
            ch4_tg_atm,
            n2o_tg_atm,
        })
    }

    /// Mole fraction of `grams` of a gas with the given molar mass.
    fn mixing_ratio(&self, grams: FloatValue, grams_per_mole: FloatValue) -> FloatValue {
        grams / grams_per_mole / self.parameters.moles_in_atmosphere
    }
}

#[typetag::serde(name = "pulse-decay")]
impl CarbonCycle for PulseDecay {
    fn concentrations(
        &self,
        run_years: Time,
        dt: Time,
        emissions: &EmissionsTable,
    ) -> SimmodResult<ConcentrationSeries> {
        self.run(run_years, dt, emissions)
    }
}
