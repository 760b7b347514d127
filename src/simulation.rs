//! Simulation orchestrator
//!
//! Wires an [`EmissionsTable`] through the configured carbon-cycle model,
//! anchors the concentrations to a reference year and hands them to the
//! forcing and heat-diffusion stages.

use crate::collaborators::{HeatDiffusion, RadiativeForcing};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use simmod_components::carbon::PulseDecay;
use simmod_core::carbon_cycle::{CarbonCycle, ConcentrationSeries};
use simmod_core::emissions::EmissionsTable;
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::standard_variables::{VAR_SURFACE_TEMPERATURE, VAR_TOTAL_FORCING};
use simmod_core::timeseries::{Time, Timeseries};
use simmod_core::timeseries_collection::{TimeseriesCollection, VariableType};

/// Run settings.
///
/// Loaded from TOML with [`SimulationConfig::from_toml`]. The carbon-cycle
/// model is selected by its `model` tag:
///
/// ```toml
/// run_start_year = 1765
/// run_end_year = 2100
///
/// [carbon_model]
/// model = "beam"
/// substeps = 100
/// ```
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// First year of the run.
    /// default: 1765
    pub run_start_year: Time,
    /// Last year of the run, inclusive.
    /// default: 2100
    pub run_end_year: Time,
    /// Step length.
    /// unit: yr
    /// default: 1
    pub dt: Time,
    /// Shift concentrations so they match the baseline in `normalize_year`.
    /// default: true
    pub normalize_concentrations: bool,
    /// default: 2000
    pub normalize_year: Time,
    /// default: pulse decay
    pub carbon_model: Box<dyn CarbonCycle>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            run_start_year: 1765.0,
            run_end_year: 2100.0,
            dt: 1.0,
            normalize_concentrations: true,
            normalize_year: 2000.0,
            carbon_model: Box::new(PulseDecay::new()),
        }
    }
}

impl SimulationConfig {
    pub fn from_toml(document: &str) -> SimmodResult<Self> {
        let config: Self = simmod_core::config::from_toml(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Length of the run in years, both end points included.
    pub fn run_years(&self) -> Time {
        self.run_end_year - self.run_start_year + 1.0
    }

    pub fn validate(&self) -> SimmodResult<()> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(SimmodError::configuration(format!(
                "dt must be positive and finite, got {}",
                self.dt
            )));
        }
        if !self.run_start_year.is_finite()
            || !self.run_end_year.is_finite()
            || self.run_end_year < self.run_start_year
        {
            return Err(SimmodError::configuration(format!(
                "invalid run period {} - {}",
                self.run_start_year, self.run_end_year
            )));
        }
        if self.normalize_concentrations
            && (self.normalize_year < self.run_start_year || self.normalize_year > self.run_end_year)
        {
            return Err(SimmodError::configuration(format!(
                "normalisation year {} is outside the run period {} - {}",
                self.normalize_year, self.run_start_year, self.run_end_year
            )));
        }
        Ok(())
    }
}

/// Everything produced by a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResults {
    pub concentrations: ConcentrationSeries,
    pub forcing: Timeseries,
    pub warming: Timeseries,
}

impl SimulationResults {
    pub fn to_collection(&self) -> SimmodResult<TimeseriesCollection> {
        let mut collection = self.concentrations.to_collection()?;
        collection.add_timeseries(
            VAR_TOTAL_FORCING,
            self.forcing.clone(),
            VariableType::Endogenous,
        )?;
        collection.add_timeseries(
            VAR_SURFACE_TEMPERATURE,
            self.warming.clone(),
            VariableType::Endogenous,
        )?;
        Ok(collection)
    }
}

#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> SimmodResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Concentrations from the configured carbon-cycle model, normalised to the
    /// reference year when enabled.
    pub fn concentrations(&self, emissions: &EmissionsTable) -> SimmodResult<ConcentrationSeries> {
        let config = &self.config;
        info!(
            "Computing concentrations for {} - {} (dt = {})",
            config.run_start_year, config.run_end_year, config.dt
        );
        let mut concentrations =
            config
                .carbon_model
                .concentrations(config.run_years(), config.dt, emissions)?;

        if config.normalize_concentrations {
            concentrations.normalize_to_year(config.normalize_year, emissions)?;
        } else {
            warn!("Concentrations are not normalised to an observed reference year");
        }
        Ok(concentrations)
    }

    pub fn run(
        &self,
        emissions: &EmissionsTable,
        radiative_forcing: &dyn RadiativeForcing,
        heat_diffusion: &dyn HeatDiffusion,
    ) -> SimmodResult<SimulationResults> {
        let concentrations = self.concentrations(emissions)?;
        let forcing = radiative_forcing.forcing(&concentrations)?;
        let warming =
            heat_diffusion.warming(&forcing, self.config.run_years(), self.config.dt)?;
        info!("Simulation finished with {} steps", concentrations.len());

        Ok(SimulationResults {
            concentrations,
            forcing,
            warming,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.run_years(), 336.0);
    }

    #[test]
    fn normalisation_year_outside_run_is_rejected() {
        let err = SimulationConfig::from_toml(
            r#"
            run_start_year = 2010
            run_end_year = 2050
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, SimmodError::Configuration(_)));
    }

    #[test]
    fn normalisation_can_be_disabled() {
        let config = SimulationConfig::from_toml(
            r#"
            run_start_year = 2010
            run_end_year = 2050
            normalize_concentrations = false
            "#,
        )
        .unwrap();
        assert_eq!(config.run_years(), 41.0);
    }

    #[test]
    fn carbon_model_selected_by_tag() {
        let config = SimulationConfig::from_toml(
            r#"
            dt = 0.5

            [carbon_model]
            model = "beam"
            substeps = 10
            "#,
        )
        .unwrap();
        let json = serde_json::to_string(&config.carbon_model).unwrap();
        assert!(json.contains("\"model\":\"beam\""));
    }

    #[test]
    fn non_positive_dt_is_rejected() {
        assert!(SimulationConfig::from_toml("dt = 0.0").is_err());
    }
}
