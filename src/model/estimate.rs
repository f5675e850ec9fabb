//! Maximum-likelihood ARIMA estimation, optionally with covariates.
//!
//! Estimation maximises the Gaussian conditional log-likelihood with the
//! innovation variance concentrated out, seeded from OLS and Yule-Walker
//! starting values and refined by bounded Nelder-Mead. Covariate
//! coefficients are part of the same parameter vector as the ARMA
//! structure: residual autocorrelation from an under-specified ARMA part
//! would bias covariate significance if regression ran as a separate
//! stage.

use crate::core::{CovariateSet, ObservationSeries};
use crate::error::{ModelError, Result};
use crate::model::diff::difference;
use crate::model::fitted::{CovariateEstimate, FittedModel};
use crate::model::spec::stability_margin;
use crate::model::ModelOrders;
use crate::utils::linalg::{invert_symmetric, numeric_hessian, solve_symmetric};
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};
use statrs::distribution::{ContinuousCDF, StudentsT};
use tracing::warn;

/// Coefficient bound keeping each AR/MA parameter inside the unit interval
/// during optimization. Joint stationarity of higher-order polynomials is
/// verified after the fit.
const COEFF_BOUND: f64 = 0.995;

/// Reflection-coefficient magnitude above which a fitted polynomial is
/// treated as near-non-invertible and flagged.
const NEAR_UNIT_ROOT: f64 = 0.99;

/// Variance floor preventing the concentrated likelihood from diverging on
/// a perfect in-sample fit.
const SIGMA2_FLOOR: f64 = 1e-12;

/// Fit an ARIMA model of the given orders to a series by conditional
/// maximum likelihood.
///
/// When `covariates` are supplied, their coefficients are estimated
/// jointly with the ARMA structure (regression with ARMA errors); the
/// regressors are differenced alongside the target so the coefficients
/// keep their original-scale interpretation.
///
/// # Errors
///
/// - `ConstantData` for a zero-variance series.
/// - `DimensionMismatch` when a covariate column length differs from the
///   series length.
/// - `InsufficientData` when the effective sample cannot identify the
///   parameter count.
/// - `NonConvergence` when the optimizer exhausts its iteration bound.
/// - `NonStationary` when the optimum violates stationarity or
///   invertibility outright.
/// - `SingularInformation` when the observed information matrix cannot be
///   inverted, leaving standard errors undefined.
pub fn fit(
    series: &ObservationSeries,
    orders: ModelOrders,
    covariates: Option<&CovariateSet>,
) -> Result<FittedModel> {
    let values = series.values();
    let n = values.len();
    let (p, d, q) = (orders.p, orders.d, orders.q);

    if series.is_constant() {
        return Err(ModelError::ConstantData);
    }

    let num_cov = covariates.map(CovariateSet::len).unwrap_or(0);
    if let Some(set) = covariates {
        set.validate_length(n)?;
    }

    let start = p.max(q);
    let needed = d + start + p + q + num_cov + 2;
    if n < needed {
        return Err(ModelError::InsufficientData { needed, got: n });
    }

    // Difference target and regressors alike.
    let w = difference(values, d);
    let x_cols: Vec<(String, Vec<f64>)> = covariates
        .map(|set| {
            set.iter()
                .map(|(name, col)| (name.to_string(), difference(col, d)))
                .collect()
        })
        .unwrap_or_default();

    let m = w.len();
    let n_eff = m - start;

    // Parameter layout: [intercept, ar(p), ma(q), beta(num_cov)].
    let dim = 1 + p + q + num_cov;
    let initial = seed_parameters(&w, &x_cols, p, q);

    let mut bounds = vec![(f64::NEG_INFINITY, f64::INFINITY)];
    bounds.extend(std::iter::repeat((-COEFF_BOUND, COEFF_BOUND)).take(p + q));
    bounds.extend(std::iter::repeat((f64::NEG_INFINITY, f64::INFINITY)).take(num_cov));
    debug_assert_eq!(initial.len(), dim);

    let objective = |params: &[f64]| negative_log_likelihood(&w, &x_cols, p, q, params);

    let config = NelderMeadConfig {
        max_iter: 5000,
        tolerance: 1e-8,
        ..Default::default()
    };
    let result = nelder_mead(objective, &initial, Some(&bounds), &config);

    if !result.converged || !result.optimal_value.is_finite() {
        return Err(ModelError::NonConvergence {
            iterations: result.iterations,
        });
    }

    let params = result.optimal_point;
    let ar = params[1..1 + p].to_vec();
    let ma = params[1 + p..1 + p + q].to_vec();
    let beta = &params[1 + p + q..];

    check_polynomials(orders, &ar, &ma)?;

    let (u, e) = innovations(&w, &x_cols, p, q, &params);
    let css: f64 = e[start..].iter().map(|v| v * v).sum();
    let sigma2 = (css / n_eff as f64).max(SIGMA2_FLOOR);
    let log_likelihood =
        -0.5 * n_eff as f64 * ((2.0 * std::f64::consts::PI).ln() + sigma2.ln() + 1.0);
    let k = orders.num_params(num_cov);
    let aic = -2.0 * log_likelihood + 2.0 * k as f64;

    // Observed information from the curvature of the concentrated
    // negative log-likelihood at the optimum.
    let hessian = numeric_hessian(objective, &params);
    let covariance = invert_symmetric(&hessian).ok_or(ModelError::SingularInformation)?;
    let mut std_errors = Vec::with_capacity(dim);
    for (i, row) in covariance.iter().enumerate() {
        let var = row[i];
        if !var.is_finite() || var <= 0.0 {
            return Err(ModelError::SingularInformation);
        }
        std_errors.push(var.sqrt());
    }

    // degrees of freedom for covariate t-statistics
    let df = n_eff.saturating_sub(1 + p + q + num_cov).max(1) as f64;
    let covariate_estimates: Vec<CovariateEstimate> = x_cols
        .iter()
        .enumerate()
        .map(|(j, (name, _))| {
            let coefficient = beta[j];
            let std_error = std_errors[1 + p + q + j];
            let t_stat = coefficient / std_error;
            CovariateEstimate {
                name: name.clone(),
                coefficient,
                std_error,
                p_value: two_sided_t_p_value(t_stat, df),
            }
        })
        .collect();

    let covariate_tails = covariates
        .map(|set| {
            set.iter()
                .map(|(name, col)| (name.to_string(), col[n - d..].to_vec()))
                .collect()
        })
        .unwrap_or_default();

    // One-step fitted values on the original scale: observation minus its
    // innovation, undefined until the conditioning window has filled.
    let mut fitted = vec![f64::NAN; n];
    for t in (d + start)..n {
        fitted[t] = values[t] - e[t - d];
    }

    Ok(FittedModel {
        orders,
        intercept: params[0],
        ar,
        ma,
        std_errors: std_errors[..1 + p + q].to_vec(),
        covariates: covariate_estimates,
        residuals: e[start..].to_vec(),
        sigma2,
        log_likelihood,
        aic,
        n_effective: n_eff,
        original: values.to_vec(),
        arma_process: u,
        innovations: e,
        covariate_tails,
        fitted,
    })
}

/// Regression-adjusted process and innovation sequence implied by a
/// parameter vector. Innovations before `max(p, q)` are zero by the
/// conditional convention.
fn innovations(
    w: &[f64],
    x_cols: &[(String, Vec<f64>)],
    p: usize,
    q: usize,
    params: &[f64],
) -> (Vec<f64>, Vec<f64>) {
    let c = params[0];
    let ar = &params[1..1 + p];
    let ma = &params[1 + p..1 + p + q];
    let beta = &params[1 + p + q..];
    let m = w.len();
    let start = p.max(q);

    let mut u = Vec::with_capacity(m);
    for t in 0..m {
        let mut regression = c;
        for (j, (_, col)) in x_cols.iter().enumerate() {
            regression += beta[j] * col[t];
        }
        u.push(w[t] - regression);
    }

    let mut e = vec![0.0; m];
    for t in start..m {
        let mut pred = 0.0;
        for (i, &phi) in ar.iter().enumerate() {
            pred += phi * u[t - 1 - i];
        }
        for (j, &theta) in ma.iter().enumerate() {
            pred += theta * e[t - 1 - j];
        }
        e[t] = u[t] - pred;
    }

    (u, e)
}

/// Concentrated Gaussian negative log-likelihood of a parameter vector.
fn negative_log_likelihood(
    w: &[f64],
    x_cols: &[(String, Vec<f64>)],
    p: usize,
    q: usize,
    params: &[f64],
) -> f64 {
    let start = p.max(q);
    let n_eff = w.len() - start;
    let (_, e) = innovations(w, x_cols, p, q, params);
    let css: f64 = e[start..].iter().map(|v| v * v).sum();

    if !css.is_finite() {
        return f64::MAX;
    }
    let sigma2 = (css / n_eff as f64).max(SIGMA2_FLOOR);
    0.5 * n_eff as f64 * ((2.0 * std::f64::consts::PI).ln() + sigma2.ln() + 1.0)
}

/// Starting values: OLS for intercept and regression coefficients,
/// Yule-Walker on the OLS residuals for the AR part, damped seeds for the
/// MA part.
fn seed_parameters(w: &[f64], x_cols: &[(String, Vec<f64>)], p: usize, q: usize) -> Vec<f64> {
    let m = w.len();
    let k = x_cols.len();

    // OLS of w on [1, x...] via the normal equations, lightly ridged.
    let dim = k + 1;
    let mut xtx = vec![vec![0.0; dim]; dim];
    let mut xty = vec![0.0; dim];
    for t in 0..m {
        let mut row = Vec::with_capacity(dim);
        row.push(1.0);
        for (_, col) in x_cols {
            row.push(col[t]);
        }
        for i in 0..dim {
            xty[i] += row[i] * w[t];
            for j in 0..dim {
                xtx[i][j] += row[i] * row[j];
            }
        }
    }
    for i in 0..dim {
        xtx[i][i] += 1e-8;
    }

    let mean = w.iter().sum::<f64>() / m as f64;
    let ols = solve_symmetric(&xtx, &xty).unwrap_or_else(|| {
        let mut fallback = vec![0.0; dim];
        fallback[0] = mean;
        fallback
    });

    // Residuals after the OLS stage, used only for AR seeding.
    let resid: Vec<f64> = (0..m)
        .map(|t| {
            let mut fit = ols[0];
            for (j, (_, col)) in x_cols.iter().enumerate() {
                fit += ols[1 + j] * col[t];
            }
            w[t] - fit
        })
        .collect();

    let ar_seed = yule_walker(&resid, p);

    let mut params = Vec::with_capacity(1 + p + q + k);
    params.push(ols[0]);
    params.extend(ar_seed);
    for j in 0..q {
        params.push(0.1 / (j + 1) as f64);
    }
    params.extend_from_slice(&ols[1..]);
    params
}

/// Yule-Walker AR(p) coefficients from sample autocovariances, clamped
/// away from the unit circle. Falls back to damped seeds when the
/// Toeplitz system is not solvable.
fn yule_walker(series: &[f64], p: usize) -> Vec<f64> {
    if p == 0 {
        return vec![];
    }
    let m = series.len();
    let mean = series.iter().sum::<f64>() / m as f64;
    let gamma: Vec<f64> = (0..=p)
        .map(|lag| {
            series
                .iter()
                .skip(lag)
                .zip(series.iter())
                .map(|(&a, &b)| (a - mean) * (b - mean))
                .sum::<f64>()
                / m as f64
        })
        .collect();

    let mut toeplitz = vec![vec![0.0; p]; p];
    for i in 0..p {
        for j in 0..p {
            toeplitz[i][j] = gamma[i.abs_diff(j)];
        }
        toeplitz[i][i] += 1e-8;
    }
    let rhs: Vec<f64> = gamma[1..=p].to_vec();

    match solve_symmetric(&toeplitz, &rhs) {
        Some(phi) => phi.iter().map(|&c| c.clamp(-0.9, 0.9)).collect(),
        None => (0..p).map(|i| 0.1 / (i + 1) as f64).collect(),
    }
}

/// Reject outright non-stationary/non-invertible optima; flag
/// near-unit-root ones.
fn check_polynomials(orders: ModelOrders, ar: &[f64], ma: &[f64]) -> Result<()> {
    let ar_margin = stability_margin(ar).ok_or_else(|| {
        ModelError::NonStationary(format!("{orders}: fitted AR polynomial is non-stationary"))
    })?;
    let ma_flipped: Vec<f64> = ma.iter().map(|&t| -t).collect();
    let ma_margin = stability_margin(&ma_flipped).ok_or_else(|| {
        ModelError::NonStationary(format!("{orders}: fitted MA polynomial is non-invertible"))
    })?;

    if ar_margin > NEAR_UNIT_ROOT {
        warn!(margin = ar_margin, %orders, "fitted AR polynomial is near a unit root");
    }
    if ma_margin > NEAR_UNIT_ROOT {
        warn!(margin = ma_margin, %orders, "fitted MA polynomial is near non-invertibility");
    }
    Ok(())
}

fn two_sided_t_p_value(t_stat: f64, df: f64) -> f64 {
    let dist = StudentsT::new(0.0, 1.0, df).expect("df >= 1");
    (2.0 * dist.sf(t_stat.abs())).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn simulate(
        p: usize,
        d: usize,
        q: usize,
        ar: Vec<f64>,
        ma: Vec<f64>,
        n: usize,
        seed: u64,
    ) -> ObservationSeries {
        let spec = ModelSpec::new(ModelOrders::new(p, d, q), ar, ma).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        spec.simulate(n, 1.0, &mut rng).unwrap()
    }

    #[test]
    fn fit_recovers_ar1_coefficient() {
        let series = simulate(1, 0, 0, vec![0.7], vec![], 800, 42);
        let model = fit(&series, ModelOrders::new(1, 0, 0), None).unwrap();

        assert!(
            (model.ar()[0] - 0.7).abs() < 0.15,
            "ar estimate = {}",
            model.ar()[0]
        );
        assert!(model.sigma2() > 0.5 && model.sigma2() < 1.5);
        assert!(model.log_likelihood().is_finite());
        assert!(model.aic().is_finite());
    }

    #[test]
    fn fit_recovers_ma1_coefficient() {
        let series = simulate(0, 0, 1, vec![], vec![0.5], 800, 7);
        let model = fit(&series, ModelOrders::new(0, 0, 1), None).unwrap();

        assert!(
            (model.ma()[0] - 0.5).abs() < 0.25,
            "ma estimate = {}",
            model.ma()[0]
        );
    }

    #[test]
    fn fit_mean_only_model() {
        let series = simulate(0, 0, 0, vec![], vec![], 200, 3);
        let model = fit(&series, ModelOrders::new(0, 0, 0), None).unwrap();

        assert!(model.ar().is_empty());
        assert!(model.ma().is_empty());
        assert!((model.intercept() - series.mean()).abs() < 0.05);
    }

    #[test]
    fn fit_with_differencing() {
        let series = simulate(1, 1, 0, vec![0.5], vec![], 600, 11);
        let model = fit(&series, ModelOrders::new(1, 1, 0), None).unwrap();

        assert!(
            (model.ar()[0] - 0.5).abs() < 0.2,
            "ar estimate = {}",
            model.ar()[0]
        );
        assert_eq!(model.orders().d, 1);
    }

    #[test]
    fn fit_rejects_constant_series() {
        let series = ObservationSeries::from_values(vec![5.0; 50]).unwrap();
        let result = fit(&series, ModelOrders::new(1, 0, 0), None);
        assert!(matches!(result, Err(ModelError::ConstantData)));
    }

    #[test]
    fn fit_rejects_short_series() {
        let series = ObservationSeries::from_values(vec![1.0, 2.0, 3.0]).unwrap();
        let result = fit(&series, ModelOrders::new(2, 1, 1), None);
        assert!(matches!(result, Err(ModelError::InsufficientData { .. })));
    }

    #[test]
    fn fit_rejects_misaligned_covariates() {
        let series = simulate(1, 0, 0, vec![0.5], vec![], 100, 5);
        let covariates = CovariateSet::new().with_column("x", vec![1.0; 50]);
        let result = fit(&series, ModelOrders::new(1, 0, 0), Some(&covariates));
        assert!(matches!(result, Err(ModelError::DimensionMismatch { .. })));
    }

    #[test]
    fn fit_estimates_covariate_jointly() {
        // Target is 1.5 * x plus AR(1) noise; the regression coefficient
        // must be recovered with a small standard error.
        let noise = simulate(1, 0, 0, vec![0.6], vec![], 400, 21);
        let x: Vec<f64> = (0..400).map(|i| (i as f64 * 0.37).sin() * 2.0).collect();
        let y: Vec<f64> = noise
            .values()
            .iter()
            .zip(&x)
            .map(|(u, xi)| 1.5 * xi + u)
            .collect();
        let series = ObservationSeries::from_values(y).unwrap();
        let covariates = CovariateSet::new().with_column("x", x);

        let model = fit(&series, ModelOrders::new(1, 0, 0), Some(&covariates)).unwrap();

        assert!(model.has_covariates());
        let term = &model.covariates()[0];
        assert_eq!(term.name, "x");
        assert!(
            (term.coefficient - 1.5).abs() < 0.2,
            "coefficient = {}",
            term.coefficient
        );
        assert!(term.p_value < 0.01, "p-value = {}", term.p_value);
    }

    #[test]
    fn fit_reports_standard_errors() {
        let series = simulate(1, 0, 0, vec![0.7], vec![], 500, 13);
        let model = fit(&series, ModelOrders::new(1, 0, 0), None).unwrap();

        // [intercept, ar]
        assert_eq!(model.std_errors().len(), 2);
        assert!(model.std_errors().iter().all(|&se| se > 0.0 && se.is_finite()));
        // AR(1) standard error should be in the vicinity of sqrt((1-φ²)/n).
        let rough = ((1.0 - 0.49) / 500.0_f64).sqrt();
        assert!(model.std_errors()[1] < rough * 5.0);
    }

    #[test]
    fn fit_residuals_span_effective_sample() {
        let series = simulate(1, 0, 1, vec![0.5], vec![0.3], 300, 17);
        let model = fit(&series, ModelOrders::new(1, 0, 1), None).unwrap();

        assert_eq!(model.residuals().len(), model.n_effective());
        assert_eq!(model.n_effective(), 300 - 1);
    }

    #[test]
    fn yule_walker_ar1_seed() {
        let series = simulate(1, 0, 0, vec![0.8], vec![], 2000, 31);
        let seed = yule_walker(series.values(), 1);
        assert!((seed[0] - 0.8).abs() < 0.1, "seed = {}", seed[0]);
    }
}
