//! Full runs through the orchestrator with simple forcing and warming stages.

use approx::assert_relative_eq;
use simmod::{HeatDiffusion, RadiativeForcing, Simulation, SimulationConfig};
use simmod_components::carbon::{BeamCarbonCycle, PulseDecay};
use simmod_core::carbon_cycle::{CarbonCycle, ConcentrationSeries};
use simmod_core::emissions::EmissionsTable;
use simmod_core::errors::{SimmodError, SimmodResult};
use simmod_core::timeseries::{Time, Timeseries};

/// Logarithmic CO2 forcing only.
#[derive(Debug)]
struct Co2Forcing;

impl RadiativeForcing for Co2Forcing {
    fn forcing(&self, concentrations: &ConcentrationSeries) -> SimmodResult<Timeseries> {
        let values = concentrations
            .co2_ppm
            .iter()
            .map(|c| 5.35 * (c / 278.0).ln())
            .collect();
        Timeseries::from_vecs(values, concentrations.date.clone())
    }
}

/// Instantaneous equilibrium response, T = F / lambda.
#[derive(Debug)]
struct Equilibrium {
    lambda: f64,
}

impl HeatDiffusion for Equilibrium {
    fn warming(&self, forcing: &Timeseries, _run_years: Time, _dt: Time) -> SimmodResult<Timeseries> {
        Ok(forcing.map(|f| f / self.lambda))
    }
}

fn emissions(start: f64, years: usize) -> EmissionsTable {
    EmissionsTable {
        date: (0..years).map(|i| i as f64).collect(),
        year: (0..years).map(|i| start + i as f64).collect(),
        co2_pg: (0..years).map(|i| 20.0 + 0.2 * i as f64).collect(),
        ch4_tg: vec![300.0; years],
        n2o_tg: vec![8.0; years],
        co2_ppm: (0..years).map(|i| 360.0 + 2.0 * i as f64).collect(),
        ch4_ppb: vec![1750.0; years],
        n2o_ppb: vec![315.0; years],
    }
}

fn config(carbon_model: &str) -> String {
    format!(
        r#"
        run_start_year = 1990
        run_end_year = 2020

        [carbon_model]
        model = "{}"
        "#,
        carbon_model
    )
}

#[test]
fn pulse_decay_run_is_anchored_to_2000() {
    let simulation =
        Simulation::new(SimulationConfig::from_toml(&config("pulse-decay")).unwrap()).unwrap();
    let table = emissions(1990.0, 31);

    let results = simulation
        .run(&table, &Co2Forcing, &Equilibrium { lambda: 1.25 })
        .unwrap();

    assert_eq!(results.concentrations.len(), 31);
    assert_relative_eq!(results.concentrations.co2_ppm[10], 380.0, epsilon = 1e-9);
    assert_relative_eq!(results.concentrations.ch4_ppb[10], 1750.0, epsilon = 1e-9);
    assert_relative_eq!(results.warming.at(30).unwrap(), results.forcing.at(30).unwrap() / 1.25);

    let collection = results.to_collection().unwrap();
    assert!(collection.require("Surface Temperature").is_ok());
    assert!(collection.require("Radiative Forcing").is_ok());
    assert!(collection.require("Atmospheric Concentration|N2O").is_ok());
}

#[test]
fn beam_and_pulse_decay_agree_on_non_co2_gases() {
    let table = emissions(1990.0, 31);
    let pulse = Simulation::new(SimulationConfig::from_toml(&config("pulse-decay")).unwrap())
        .unwrap()
        .concentrations(&table)
        .unwrap();
    let beam = Simulation::new(SimulationConfig::from_toml(&config("beam")).unwrap())
        .unwrap()
        .concentrations(&table)
        .unwrap();

    assert_eq!(pulse.ch4_ppb, beam.ch4_ppb);
    assert_eq!(pulse.n2o_ppb, beam.n2o_ppb);
    // Both are anchored to the same observed value
    assert_relative_eq!(beam.co2_ppm[10], 380.0, epsilon = 1e-9);
    assert_ne!(pulse.co2_ppm[30], beam.co2_ppm[30]);
}

#[test]
fn models_can_be_swapped_in_code() {
    let table = emissions(1990.0, 31);
    for carbon_model in [
        Box::new(PulseDecay::new()) as Box<dyn CarbonCycle>,
        Box::new(BeamCarbonCycle::default()) as Box<dyn CarbonCycle>,
    ] {
        let simulation = Simulation::new(SimulationConfig {
            run_start_year: 1990.0,
            run_end_year: 2020.0,
            carbon_model,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(simulation.concentrations(&table).unwrap().len(), 31);
    }
}

#[test]
fn mismatched_table_is_rejected() {
    let simulation =
        Simulation::new(SimulationConfig::from_toml(&config("pulse-decay")).unwrap()).unwrap();
    let err = simulation.concentrations(&emissions(1990.0, 20)).unwrap_err();
    assert!(matches!(err, SimmodError::Configuration(_)));
}

#[test]
fn mitigation_lowers_concentrations() {
    let simulation =
        Simulation::new(SimulationConfig::from_toml(&config("beam")).unwrap()).unwrap();
    let baseline = emissions(1990.0, 31);
    let mut mitigated = baseline.clone();
    mitigated.adjust(2005.0, 2020.0, -5.0, -50.0, 0.0).unwrap();

    let before = simulation.concentrations(&baseline).unwrap();
    let after = simulation.concentrations(&mitigated).unwrap();

    assert!(after.co2_ppm[30] < before.co2_ppm[30]);
    assert!(after.ch4_ppb[30] < before.ch4_ppb[30]);
    // Emissions before the adjustment are untouched
    assert_relative_eq!(after.co2_ppm[10], before.co2_ppm[10], epsilon = 1e-9);
}
