//! Named exogenous regressor columns aligned with a target series.

use crate::error::{ModelError, Result};
use std::collections::BTreeMap;

/// A set of named regressor columns.
///
/// Columns are stored in name order, which fixes the parameter layout of
/// any model fitted against them and keeps selection output deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CovariateSet {
    columns: BTreeMap<String, Vec<f64>>,
}

impl CovariateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a regressor column, replacing any existing column of the same name.
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.insert(name.into(), values);
        self
    }

    /// Number of regressors.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Regressor names in deterministic (sorted) order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Values of a named regressor.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Iterate over `(name, values)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Check every column has exactly `n` observations.
    pub fn validate_length(&self, n: usize) -> Result<()> {
        for values in self.columns.values() {
            if values.len() != n {
                return Err(ModelError::DimensionMismatch {
                    expected: n,
                    got: values.len(),
                });
            }
        }
        Ok(())
    }

    /// Check this set provides every name in `names`, each with `n` values.
    ///
    /// Used when forecasting: future regressor rows must cover exactly the
    /// columns the model was fitted with.
    pub fn validate_covers(&self, names: &[String], n: usize) -> Result<()> {
        for name in names {
            let values = self
                .column(name)
                .ok_or_else(|| ModelError::MissingCovariate(name.clone()))?;
            if values.len() != n {
                return Err(ModelError::DimensionMismatch {
                    expected: n,
                    got: values.len(),
                });
            }
        }
        Ok(())
    }
}
