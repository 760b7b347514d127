//! End-to-end BEAM runs.

use approx::assert_relative_eq;
use simmod_components::carbon::{beam, BeamIntegrator, BeamVariable, CarbonState};
use simmod_components::climate::TemperatureModel;
use simmod_components::parameters::{BeamParameters, INITIAL_CARBON_2005};

/// Decadal emissions for 2005-2105 (GtC/yr).
const DECADAL_EMISSIONS: [f64; 10] = [
    9.58, 12.25, 14.72, 16.07, 17.43, 19.16, 20.89, 23.22, 26.15, 29.09,
];

/// Atmosphere, upper ocean, lower ocean (GtC), atmosphere and ocean
/// temperature (°C) for the decadal scenario without chemistry feedback.
const DECADAL_REFERENCE: [[f64; 5]; 11] = [
    [808.9000000000, 725.0000000000, 35641.0000000000, 0.7307000000, 0.0068000000],
    [899.5885515260, 729.3944687658, 35641.7169797082, 1.1530496790, 0.0429950000],
    [1016.2575421433, 734.2769527625, 35642.6655050942, 1.5742098991, 0.0984977339],
    [1157.2072111738, 739.3300439021, 35643.8627449242, 2.0048480185, 0.1722833422],
    [1311.7314507542, 744.0639211703, 35645.3046280755, 2.4380088871, 0.2639115760],
    [1479.9840921185, 748.4433009471, 35646.9726069344, 2.8687489717, 0.3726164416],
    [1665.5590227954, 752.5893391455, 35648.8516380591, 3.2960111953, 0.4974230681],
    [1868.4329172854, 756.5361745993, 35650.9309081153, 3.7182792485, 0.6373524744],
    [2094.4972754301, 760.3997112351, 35653.2030133349, 4.1372562466, 0.7913988131],
    [2349.6629850452, 764.2710441635, 35655.6659707913, 4.5557269081, 0.9586916848],
    [2634.0339220991, 768.1460838836, 35658.3199940173, 4.9738891644, 1.1385434460],
];

fn scenario() -> BeamIntegrator {
    scenario_with_feedback(false)
}

fn scenario_with_feedback(temperature_dependent: bool) -> BeamIntegrator {
    let parameters = BeamParameters {
        initial_carbon: INITIAL_CARBON_2005,
        temperature_dependent,
        linear_temperature: false,
        ..Default::default()
    };
    BeamIntegrator::new(parameters, DECADAL_EMISSIONS.to_vec(), 10.0, 200).unwrap()
}

#[test]
fn test_decadal_scenario() {
    let output = scenario().run().unwrap();

    assert_eq!(output.len(), 11);
    assert_eq!(output.time(), (0..11).map(|i| i as f64 * 10.0).collect::<Vec<_>>());

    let initial = output.initial().unwrap();
    let last = output.last().unwrap();
    assert_relative_eq!(last.cumulative, 1885.6, max_relative = 1e-12);
    assert_relative_eq!(last.total_carbon(), initial.total_carbon() + 1885.6, max_relative = 1e-10);
    assert!(last.mass_atmosphere > initial.mass_atmosphere);
    assert!(last.temp_atmosphere > initial.temp_atmosphere);

    // Chemistry is held at its initial calibration
    for row in output.rows() {
        assert_eq!(row.a, initial.a);
        assert!(row.b > 0.0 && row.b < 1.0);
        assert_relative_eq!(row.phi12, 0.2 * row.a * row.b, max_relative = 1e-12);
    }
}

#[test]
fn test_decadal_scenario_reference_values() {
    let output = scenario().run().unwrap();

    for (row, expected) in output.rows().iter().zip(DECADAL_REFERENCE.iter()) {
        assert_relative_eq!(row.mass_atmosphere, expected[0], max_relative = 1e-9);
        assert_relative_eq!(row.mass_upper, expected[1], max_relative = 1e-9);
        assert_relative_eq!(row.mass_lower, expected[2], max_relative = 1e-9);
        assert_relative_eq!(row.temp_atmosphere, expected[3], max_relative = 1e-9);
        assert_relative_eq!(row.temp_ocean, expected[4], max_relative = 1e-9);
    }
}

#[test]
fn test_decadal_scenario_with_feedback_reference_values() {
    let output = scenario_with_feedback(true).run().unwrap();
    let last = output.last().unwrap();

    assert_eq!(output.len(), 11);
    assert_relative_eq!(last.mass_atmosphere, 2635.5219733592, max_relative = 1e-9);
    assert_relative_eq!(last.mass_upper, 766.9073801639, max_relative = 1e-9);
    assert_relative_eq!(last.mass_lower, 35658.0706464769, max_relative = 1e-9);
    assert_relative_eq!(last.temp_atmosphere, 4.9755410853, max_relative = 1e-9);
    assert_relative_eq!(last.temp_ocean, 1.1388006904, max_relative = 1e-9);
}

#[test]
fn test_scenario_is_deterministic() {
    let first = scenario().run().unwrap();
    let second = scenario().run().unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_emissions_give_initial_row() {
    let initial = CarbonState::from(INITIAL_CARBON_2005);
    let output = beam::run(&[], 10.0, 200, initial, true, false).unwrap();

    assert_eq!(output.len(), 1);
    let row = output.initial().unwrap();
    assert_eq!(row.mass_atmosphere, 808.9);
    assert_eq!(row.mass_upper, 725.0);
    assert_eq!(row.mass_lower, 35641.0);
    assert_eq!(row.temp_atmosphere, 0.7307);
    assert_eq!(row.temp_ocean, 0.0068);
    assert_eq!(row.cumulative, 0.0);
}

/// Without chemistry feedback the temperature variant cannot affect carbon.
#[test]
fn test_variant_switch_without_feedback() {
    let initial = CarbonState::from(INITIAL_CARBON_2005);
    let dice = beam::run(&DECADAL_EMISSIONS, 10.0, 100, initial, false, false).unwrap();
    let linear = beam::run(&DECADAL_EMISSIONS, 10.0, 100, initial, false, true).unwrap();

    for variable in [
        BeamVariable::MassAtmosphere,
        BeamVariable::MassUpper,
        BeamVariable::MassLower,
    ] {
        assert_eq!(dice.column(variable), linear.column(variable));
    }
    assert_ne!(
        dice.column(BeamVariable::TempAtmosphere),
        linear.column(BeamVariable::TempAtmosphere)
    );
}

/// With chemistry feedback, a different temperature path changes the carbon path.
#[test]
fn test_variant_switch_with_feedback() {
    let initial = CarbonState::from(INITIAL_CARBON_2005);
    let emissions = &DECADAL_EMISSIONS[..5];
    let dice = beam::run(emissions, 10.0, 100, initial, true, false).unwrap();
    let linear = beam::run(emissions, 10.0, 100, initial, true, true).unwrap();

    let dice_last = dice.last().unwrap();
    let linear_last = linear.last().unwrap();
    assert_ne!(dice_last.mass_atmosphere, linear_last.mass_atmosphere);
    assert_ne!(dice_last.temp_atmosphere, linear_last.temp_atmosphere);
    assert_ne!(dice_last.a, linear_last.a);
}

#[test]
fn test_integrator_binds_schedule_to_run_length() {
    let integrator = scenario();
    match integrator.temperature_model() {
        TemperatureModel::Dice(model) => {
            assert_eq!(model.exogenous_forcing().len(), DECADAL_EMISSIONS.len())
        }
        TemperatureModel::Linear(_) => panic!("expected the forcing-driven variant"),
    }
}
