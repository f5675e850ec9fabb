//! Forecast result structure holding point predictions and interval bounds.

use crate::error::{ModelError, Result};

/// A single forecast step: point estimate with its interval bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastStep {
    pub point: f64,
    pub lower: f64,
    pub upper: f64,
}

/// An h-step-ahead forecast with prediction intervals at a fixed level.
#[derive(Debug, Clone)]
pub struct Forecast {
    steps: Vec<ForecastStep>,
    level: f64,
}

impl Forecast {
    /// Assemble a forecast from parallel point/lower/upper vectors.
    pub fn new(point: Vec<f64>, lower: Vec<f64>, upper: Vec<f64>, level: f64) -> Result<Self> {
        if lower.len() != point.len() || upper.len() != point.len() {
            return Err(ModelError::DimensionMismatch {
                expected: point.len(),
                got: lower.len().min(upper.len()),
            });
        }
        if !(0.0..1.0).contains(&level) {
            return Err(ModelError::InvalidParameter(
                "confidence level must lie in (0, 1)".to_string(),
            ));
        }
        let steps = point
            .into_iter()
            .zip(lower)
            .zip(upper)
            .map(|((point, lower), upper)| ForecastStep {
                point,
                lower,
                upper,
            })
            .collect();
        Ok(Self { steps, level })
    }

    /// The forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The confidence level of the interval bounds.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// All steps in horizon order.
    pub fn steps(&self) -> &[ForecastStep] {
        &self.steps
    }

    /// Point estimates in horizon order.
    pub fn point(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.point).collect()
    }

    /// Lower interval bounds in horizon order.
    pub fn lower(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.lower).collect()
    }

    /// Upper interval bounds in horizon order.
    pub fn upper(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.upper).collect()
    }

    /// Interval width at each horizon step.
    pub fn widths(&self) -> Vec<f64> {
        self.steps.iter().map(|s| s.upper - s.lower).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forecast_assembles_steps() {
        let forecast = Forecast::new(
            vec![2.0, 3.0],
            vec![1.0, 1.5],
            vec![3.0, 4.5],
            0.95,
        )
        .unwrap();

        assert_eq!(forecast.horizon(), 2);
        assert!(!forecast.is_empty());
        assert_relative_eq!(forecast.level(), 0.95, epsilon = 1e-12);
        assert_eq!(forecast.point(), vec![2.0, 3.0]);
        assert_eq!(forecast.lower(), vec![1.0, 1.5]);
        assert_eq!(forecast.upper(), vec![3.0, 4.5]);
        assert_eq!(forecast.widths(), vec![2.0, 3.0]);
    }

    #[test]
    fn forecast_rejects_mismatched_bounds() {
        let result = Forecast::new(vec![1.0, 2.0], vec![0.5], vec![1.5, 2.5], 0.95);
        assert!(matches!(result, Err(ModelError::DimensionMismatch { .. })));
    }

    #[test]
    fn forecast_rejects_invalid_level() {
        let result = Forecast::new(vec![1.0], vec![0.5], vec![1.5], 1.0);
        assert!(matches!(result, Err(ModelError::InvalidParameter(_))));
    }

    #[test]
    fn forecast_zero_horizon() {
        let forecast = Forecast::new(vec![], vec![], vec![], 0.95).unwrap();
        assert_eq!(forecast.horizon(), 0);
        assert!(forecast.is_empty());
    }
}
