//! ObservationSeries data structure for representing regularly spaced samples.

use crate::error::{ModelError, Result};
use chrono::{DateTime, Duration, Utc};

/// An ordered sequence of real-valued samples at a regular time step.
///
/// The series is immutable once constructed. Time indexing is implicit:
/// observation `i` sits at `origin + i * step` when an origin is attached,
/// and at plain index `i` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSeries {
    values: Vec<f64>,
    origin: Option<(DateTime<Utc>, Duration)>,
}

impl ObservationSeries {
    /// Create a series from raw values with an implicit integer time index.
    ///
    /// Rejects empty input and non-finite values.
    pub fn from_values(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(ModelError::EmptyData);
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFiniteData);
        }
        Ok(Self {
            values,
            origin: None,
        })
    }

    /// Create a series anchored at a start instant with a fixed step.
    pub fn with_origin(values: Vec<f64>, start: DateTime<Utc>, step: Duration) -> Result<Self> {
        if step <= Duration::zero() {
            return Err(ModelError::InvalidParameter(
                "time step must be positive".to_string(),
            ));
        }
        let mut series = Self::from_values(values)?;
        series.origin = Some((start, step));
        Ok(series)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The observation values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The timestamp of observation `index`, if an origin is attached.
    pub fn timestamp(&self, index: usize) -> Option<DateTime<Utc>> {
        self.origin
            .map(|(start, step)| start + step * index as i32)
    }

    /// The regular step between observations, if an origin is attached.
    pub fn step(&self) -> Option<Duration> {
        self.origin.map(|(_, step)| step)
    }

    /// Sample mean of the observations.
    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Sample variance (n-1 denominator). Returns 0.0 for a single sample.
    pub fn variance(&self) -> f64 {
        if self.values.len() < 2 {
            return 0.0;
        }
        let m = self.mean();
        self.values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (self.values.len() - 1) as f64
    }

    /// Whether every observation equals the first (zero variance).
    pub fn is_constant(&self) -> bool {
        self.values.iter().all(|&v| v == self.values[0])
    }
}
