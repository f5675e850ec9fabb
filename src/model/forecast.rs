//! h-step-ahead forecasting from a fitted model.
//!
//! Point forecasts come from recursive substitution into the fitted ARMA
//! recurrence with future innovations at their zero expectation,
//! re-integrated when the model was fitted on differences. Interval widths
//! follow the ψ-weight (MA-representation) variance recursion of the full
//! generalized AR polynomial, so they grow monotonically with the horizon.

use crate::core::{CovariateSet, Forecast};
use crate::error::{ModelError, Result};
use crate::model::diff::{difference, integrate};
use crate::model::fitted::FittedModel;
use crate::model::spec::{integrate_ar_polynomial, stability_margin};
use statrs::distribution::{ContinuousCDF, Normal};

/// Default confidence level for prediction intervals.
const DEFAULT_LEVEL: f64 = 0.95;

/// Largest differencing order the forecaster will re-integrate. Beyond
/// this the unit-root configuration amplifies forecast-error variance too
/// fast to extrapolate meaningfully.
const MAX_INTEGRATION: usize = 2;

/// Forecast `horizon` steps ahead with 95% prediction intervals.
///
/// Fails with `MissingCovariate` when the model was fitted with
/// covariates; use [`forecast_with_covariates`] and supply future
/// regressor rows instead.
pub fn forecast(model: &FittedModel, horizon: usize) -> Result<Forecast> {
    forecast_with_level(model, horizon, DEFAULT_LEVEL)
}

/// Forecast with prediction intervals at a caller-chosen level.
pub fn forecast_with_level(model: &FittedModel, horizon: usize, level: f64) -> Result<Forecast> {
    if model.has_covariates() {
        return Err(ModelError::MissingCovariate(
            model.covariates[0].name.clone(),
        ));
    }
    forecast_inner(model, horizon, None, level)
}

/// Forecast a covariate-bearing model, supplying future regressor rows
/// (`horizon` values per fitted covariate) with 95% intervals.
pub fn forecast_with_covariates(
    model: &FittedModel,
    horizon: usize,
    future: &CovariateSet,
) -> Result<Forecast> {
    forecast_with_covariates_level(model, horizon, future, DEFAULT_LEVEL)
}

/// Forecast a covariate-bearing model at a caller-chosen level.
pub fn forecast_with_covariates_level(
    model: &FittedModel,
    horizon: usize,
    future: &CovariateSet,
    level: f64,
) -> Result<Forecast> {
    forecast_inner(model, horizon, Some(future), level)
}

fn forecast_inner(
    model: &FittedModel,
    horizon: usize,
    future: Option<&CovariateSet>,
    level: f64,
) -> Result<Forecast> {
    if !(0.0..1.0).contains(&level) {
        return Err(ModelError::InvalidParameter(
            "confidence level must lie in (0, 1)".to_string(),
        ));
    }

    let d = model.orders.d;
    if d > MAX_INTEGRATION {
        return Err(ModelError::NonStationary(format!(
            "cannot safely re-integrate d={d} (maximum supported is {MAX_INTEGRATION})"
        )));
    }
    if stability_margin(&model.ar).is_none() {
        return Err(ModelError::NonStationary(
            "stored AR polynomial has a unit root; extrapolation is unsafe".to_string(),
        ));
    }

    if horizon == 0 {
        return Forecast::new(vec![], vec![], vec![], level);
    }

    // Regression contribution per future step, on the differenced scale.
    let regression = future_regression(model, horizon, future)?;

    // ARMA-error recursion with future innovations at zero.
    let p = model.orders.p;
    let q = model.orders.q;
    let mut u = model.arma_process.clone();
    let mut e = model.innovations.clone();
    let history = u.len();
    for _ in 0..horizon {
        let t = u.len();
        let mut pred = 0.0;
        for (i, &phi) in model.ar.iter().enumerate() {
            if t > i {
                pred += phi * u[t - 1 - i];
            }
        }
        for (j, &theta) in model.ma.iter().enumerate() {
            if t > j {
                pred += theta * e[t - 1 - j];
            }
        }
        u.push(pred);
        e.push(0.0);
    }

    let w_future: Vec<f64> = u[history..]
        .iter()
        .zip(&regression)
        .map(|(u_hat, reg)| reg + u_hat)
        .collect();

    let point = integrate(&w_future, &model.original, d);

    // Forecast-error variance from the psi weights of φ(B)(1−B)^d.
    let psi = psi_weights(&model.ar, &model.ma, d, horizon);
    let z = Normal::new(0.0, 1.0)
        .expect("standard normal")
        .inverse_cdf((1.0 + level) / 2.0);

    let mut lower = Vec::with_capacity(horizon);
    let mut upper = Vec::with_capacity(horizon);
    let mut cumulative = 0.0;
    for (k, &forecast_point) in point.iter().enumerate() {
        cumulative += psi[k] * psi[k];
        let se = (model.sigma2 * cumulative).sqrt();
        lower.push(forecast_point - z * se);
        upper.push(forecast_point + z * se);
    }

    Forecast::new(point, lower, upper, level)
}

/// Intercept plus covariate effect for each future step, on the
/// differenced scale. Future covariate columns are differenced against the
/// stored original-scale tails so their coefficients keep meaning.
fn future_regression(
    model: &FittedModel,
    horizon: usize,
    future: Option<&CovariateSet>,
) -> Result<Vec<f64>> {
    let mut regression = vec![model.intercept; horizon];
    if !model.has_covariates() {
        return Ok(regression);
    }

    let future = future.ok_or_else(|| {
        ModelError::MissingCovariate(model.covariates[0].name.clone())
    })?;
    future.validate_covers(&model.covariate_names(), horizon)?;

    let d = model.orders.d;
    for (term, (name, tail)) in model.covariates.iter().zip(&model.covariate_tails) {
        debug_assert_eq!(&term.name, name);
        let future_col = future.column(name).expect("validated above");

        let mut extended = Vec::with_capacity(d + horizon);
        extended.extend_from_slice(tail);
        extended.extend_from_slice(future_col);
        let differenced = difference(&extended, d);

        // After d passes the extension shrinks back to exactly `horizon`.
        for (reg, x) in regression.iter_mut().zip(differenced.iter()) {
            *reg += term.coefficient * x;
        }
    }

    Ok(regression)
}

/// ψ weights of the MA(∞) representation of the integrated model, the
/// first `horizon` of them.
fn psi_weights(ar: &[f64], ma: &[f64], d: usize, horizon: usize) -> Vec<f64> {
    let g = integrate_ar_polynomial(ar, d);
    let mut psi = Vec::with_capacity(horizon);
    psi.push(1.0);
    for j in 1..horizon {
        let mut weight = if j <= ma.len() { ma[j - 1] } else { 0.0 };
        for (i, &gi) in g.iter().enumerate().take(j) {
            weight += gi * psi[j - 1 - i];
        }
        psi.push(weight);
    }
    psi
}
