//! Standard variable definitions for SimMod.
//!
//! Variable names follow the MAGICC convention using `|` as a hierarchical separator,
//! e.g. `Atmospheric Concentration|CO2` or `Carbon Mass|Upper Ocean`.

use serde::Serialize;

/// A named variable together with the unit its values are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: &'static str,
    pub unit: &'static str,
}

// Emissions

pub const VAR_CUMULATIVE_CO2_EMISSIONS: Variable = Variable {
    name: "Cumulative Emissions|CO2",
    unit: "GtC",
};

// Concentrations

pub const VAR_CO2_CONCENTRATION: Variable = Variable {
    name: "Atmospheric Concentration|CO2",
    unit: "ppm",
};

pub const VAR_CH4_CONCENTRATION: Variable = Variable {
    name: "Atmospheric Concentration|CH4",
    unit: "ppb",
};

pub const VAR_N2O_CONCENTRATION: Variable = Variable {
    name: "Atmospheric Concentration|N2O",
    unit: "ppb",
};

// Atmospheric burdens from the pulse-response model

pub const VAR_CO2_BURDEN: Variable = Variable {
    name: "Atmospheric Burden|CO2",
    unit: "PgCO2",
};

pub const VAR_CH4_BURDEN: Variable = Variable {
    name: "Atmospheric Burden|CH4",
    unit: "TgCH4",
};

pub const VAR_N2O_BURDEN: Variable = Variable {
    name: "Atmospheric Burden|N2O",
    unit: "TgN2O",
};

// Carbon reservoirs

pub const VAR_CARBON_MASS_ATMOSPHERE: Variable = Variable {
    name: "Carbon Mass|Atmosphere",
    unit: "GtC",
};

pub const VAR_CARBON_MASS_UPPER_OCEAN: Variable = Variable {
    name: "Carbon Mass|Upper Ocean",
    unit: "GtC",
};

pub const VAR_CARBON_MASS_LOWER_OCEAN: Variable = Variable {
    name: "Carbon Mass|Lower Ocean",
    unit: "GtC",
};

// Temperature

pub const VAR_TEMPERATURE_ATMOSPHERE: Variable = Variable {
    name: "Temperature Anomaly|Atmosphere",
    unit: "K",
};

pub const VAR_TEMPERATURE_OCEAN: Variable = Variable {
    name: "Temperature Anomaly|Ocean",
    unit: "K",
};

pub const VAR_SURFACE_TEMPERATURE: Variable = Variable {
    name: "Surface Temperature",
    unit: "K",
};

// Forcing

pub const VAR_TOTAL_FORCING: Variable = Variable {
    name: "Radiative Forcing",
    unit: "W / m^2",
};
