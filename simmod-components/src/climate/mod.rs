//! Temperature response coupled to the carbon cycle

mod temperature;

pub use temperature::{
    DiceTemperature, LinearTemperature, TemperatureInputs, TemperatureModel, TemperatureState,
};
