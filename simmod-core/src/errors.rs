use thiserror::Error;

/// Error type for invalid model setups and failed integrations.
///
/// Every variant is fatal for the run that raised it. There are no transient
/// failures: a run is deterministic, so retrying with the same input fails
/// the same way.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimmodError {
    /// The run was set up with invalid parameters or inconsistent inputs.
    /// Raised before any integration step is taken.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
    /// The model reached a physically invalid state (e.g. no real root for the
    /// carbonate chemistry or a non-positive carbon mass inside a logarithm).
    #[error("Numerical error: {0}")]
    Numerical(String),
    #[error("Timeseries error: {0}")]
    Timeseries(String),
}

impl SimmodError {
    pub fn configuration(message: impl Into<String>) -> Self {
        SimmodError::Configuration(message.into())
    }

    pub fn numerical(message: impl Into<String>) -> Self {
        SimmodError::Numerical(message.into())
    }
}

impl From<toml::de::Error> for SimmodError {
    fn from(value: toml::de::Error) -> Self {
        SimmodError::Configuration(value.to_string())
    }
}

/// Convenience type for `Result<T, SimmodError>`.
pub type SimmodResult<T> = Result<T, SimmodError>;
