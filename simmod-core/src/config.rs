//! Loading parameter sets from TOML.
//!
//! Every parameter struct in the workspace derives `Deserialize` with
//! `#[serde(default)]`, so a configuration file only needs to list the values
//! it overrides.

use crate::errors::SimmodResult;
use serde::de::DeserializeOwned;

/// Parse a parameter set from a TOML document.
///
/// Syntax errors and type mismatches (e.g. a mode flag that is not a boolean)
/// are reported as [`crate::errors::SimmodError::Configuration`].
pub fn from_toml<T: DeserializeOwned>(document: &str) -> SimmodResult<T> {
    let value = toml::from_str(document)?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimmodError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(default)]
    struct Switches {
        enabled: bool,
        steps: usize,
    }

    impl Default for Switches {
        fn default() -> Self {
            Self {
                enabled: true,
                steps: 10,
            }
        }
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let parsed: Switches = from_toml("steps = 4").unwrap();
        assert_eq!(
            parsed,
            Switches {
                enabled: true,
                steps: 4
            }
        );
    }

    #[test]
    fn non_boolean_flag_is_a_configuration_error() {
        let err = from_toml::<Switches>("enabled = \"yes\"").unwrap_err();
        assert!(matches!(err, SimmodError::Configuration(_)));
    }
}
