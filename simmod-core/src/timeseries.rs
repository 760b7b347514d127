use crate::errors::{SimmodError, SimmodResult};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub type FloatValue = f64;
pub type Time = f64;

/// A single variable sampled on a time axis.
///
/// Values and times are stored as `ndarray` vectors so that whole-series
/// arithmetic (normalisation, unit conversion) stays vectorised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeseries {
    values: Array1<FloatValue>,
    time: Array1<Time>,
}

impl Timeseries {
    /// Create a timeseries, checking that the values line up with the time axis.
    pub fn new(values: Array1<FloatValue>, time: Array1<Time>) -> SimmodResult<Self> {
        if values.len() != time.len() {
            return Err(SimmodError::Timeseries(format!(
                "{} values supplied for a time axis of length {}",
                values.len(),
                time.len()
            )));
        }
        if time.iter().zip(time.iter().skip(1)).any(|(a, b)| b <= a) {
            return Err(SimmodError::Timeseries(
                "time axis must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { values, time })
    }

    pub fn from_vecs(values: Vec<FloatValue>, time: Vec<Time>) -> SimmodResult<Self> {
        Self::new(Array1::from(values), Array1::from(time))
    }

    pub fn values(&self) -> &Array1<FloatValue> {
        &self.values
    }

    pub fn time(&self) -> &Array1<Time> {
        &self.time
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn at(&self, index: usize) -> Option<FloatValue> {
        self.values.get(index).copied()
    }

    /// Index of the sample taken exactly at `time`, if any.
    pub fn index_of(&self, time: Time) -> Option<usize> {
        self.time.iter().position(|t| *t == time)
    }

    /// Value at an exact time, if the axis contains it.
    pub fn at_time(&self, time: Time) -> Option<FloatValue> {
        self.index_of(time).and_then(|i| self.at(i))
    }

    /// Apply `f` to every value, keeping the time axis.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(FloatValue) -> FloatValue,
    {
        Self {
            values: self.values.mapv(f),
            time: self.time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = Timeseries::new(array![1.0, 2.0], array![2000.0]).unwrap_err();
        assert!(matches!(err, SimmodError::Timeseries(_)));
    }

    #[test]
    fn non_monotonic_time_is_rejected() {
        assert!(Timeseries::new(array![1.0, 2.0], array![2001.0, 2000.0]).is_err());
    }

    #[test]
    fn lookup_by_time() {
        let ts = Timeseries::new(array![1.0, 2.0, 3.0], array![2000.0, 2001.0, 2002.0]).unwrap();
        assert_eq!(ts.at_time(2001.0), Some(2.0));
        assert_eq!(ts.at_time(1999.0), None);
        assert_eq!(ts.at(2), Some(3.0));
    }

    #[test]
    fn serialization() {
        let ts = Timeseries::new(array![1.5, 2.0, 2.5], array![0.0, 0.5, 1.0]).unwrap();
        let json = serde_json::to_string(&ts).expect("Serialization failed");
        let parsed: Timeseries = serde_json::from_str(&json).expect("Deserialization failed");
        assert_eq!(parsed, ts);
    }

    #[test]
    fn map_keeps_time_axis() {
        let ts = Timeseries::new(array![1.0, 2.0], array![0.0, 10.0]).unwrap();
        let doubled = ts.map(|v| v * 2.0);
        assert_eq!(doubled.values(), &array![2.0, 4.0]);
        assert_eq!(doubled.time(), ts.time());
    }
}
