use crate::errors::{SimmodError, SimmodResult};
use crate::standard_variables::Variable;
use crate::timeseries::Timeseries;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialOrd, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum VariableType {
    /// Values that are defined outside of the model
    Exogenous,
    /// Values that are determined within the model
    Endogenous,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesItem {
    pub timeseries: Timeseries,
    pub name: String,
    pub unit: String,
    pub variable_type: VariableType,
}

/// A collection of time series data.
/// Allows for easy access to time series data by name across a whole simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeseriesCollection {
    items: Vec<TimeseriesItem>,
}

impl TimeseriesCollection {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a new timeseries to the collection
    ///
    /// Fails if a timeseries with the same name already exists in the collection
    pub fn add_timeseries(
        &mut self,
        variable: Variable,
        timeseries: Timeseries,
        variable_type: VariableType,
    ) -> SimmodResult<()> {
        if self.get_by_name(variable.name).is_some() {
            return Err(SimmodError::Timeseries(format!(
                "timeseries {} already exists",
                variable.name
            )));
        }

        self.items.push(TimeseriesItem {
            timeseries,
            name: variable.name.to_string(),
            unit: variable.unit.to_string(),
            variable_type,
        });
        Ok(())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&TimeseriesItem> {
        self.items.iter().find(|x| x.name == name)
    }

    pub fn get_timeseries_by_name(&self, name: &str) -> Option<&Timeseries> {
        self.get_by_name(name).map(|item| &item.timeseries)
    }

    /// Like [`Self::get_timeseries_by_name`] but reports a missing series as an error.
    pub fn require(&self, name: &str) -> SimmodResult<&Timeseries> {
        self.get_timeseries_by_name(name)
            .ok_or_else(|| SimmodError::Timeseries(format!("timeseries {} not found", name)))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
