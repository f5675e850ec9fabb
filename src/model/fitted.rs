//! Fitted ARIMA model results.

use crate::model::ModelOrders;

/// A jointly estimated regression term for one covariate.
#[derive(Debug, Clone, PartialEq)]
pub struct CovariateEstimate {
    /// Covariate name.
    pub name: String,
    /// Estimated regression coefficient.
    pub coefficient: f64,
    /// Standard error of the coefficient.
    pub std_error: f64,
    /// Two-sided p-value against a zero coefficient.
    pub p_value: f64,
}

/// A fitted ARIMA model produced by [`fit`](crate::model::fit).
///
/// Immutable: consumed by the diagnostics and forecasting layers through
/// read-only accessors. Standard errors are aligned with the parameter
/// layout `[intercept, ar..., ma...]`; covariate terms carry their own.
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub(crate) orders: ModelOrders,
    pub(crate) intercept: f64,
    pub(crate) ar: Vec<f64>,
    pub(crate) ma: Vec<f64>,
    pub(crate) std_errors: Vec<f64>,
    pub(crate) covariates: Vec<CovariateEstimate>,
    /// One-step residuals over the effective sample.
    pub(crate) residuals: Vec<f64>,
    /// Innovation variance estimate.
    pub(crate) sigma2: f64,
    pub(crate) log_likelihood: f64,
    pub(crate) aic: f64,
    pub(crate) n_effective: usize,
    /// Original (undifferenced) observations, kept for re-integration.
    pub(crate) original: Vec<f64>,
    /// Regression-adjusted process on the differenced scale.
    pub(crate) arma_process: Vec<f64>,
    /// Full innovation sequence on the differenced scale (leading
    /// `max(p, q)` entries are zero by the conditional convention).
    pub(crate) innovations: Vec<f64>,
    /// Last `d` original-scale values of each fitted covariate column,
    /// needed to difference future regressor blocks when forecasting.
    pub(crate) covariate_tails: Vec<(String, Vec<f64>)>,
    /// In-sample one-step fitted values on the original scale (NaN where
    /// the conditioning window has not filled yet).
    pub(crate) fitted: Vec<f64>,
}

impl FittedModel {
    /// The (p, d, q) orders this model was fitted with.
    pub fn orders(&self) -> ModelOrders {
        self.orders
    }

    /// Estimated intercept of the differenced series.
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Estimated AR coefficients.
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Estimated MA coefficients.
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Standard errors aligned with `[intercept, ar..., ma...]`.
    pub fn std_errors(&self) -> &[f64] {
        &self.std_errors
    }

    /// Jointly estimated covariate terms, in covariate-name order.
    pub fn covariates(&self) -> &[CovariateEstimate] {
        &self.covariates
    }

    /// Whether the model was fitted with covariates.
    pub fn has_covariates(&self) -> bool {
        !self.covariates.is_empty()
    }

    /// Names of the fitted covariates, in order.
    pub fn covariate_names(&self) -> Vec<String> {
        self.covariates.iter().map(|c| c.name.clone()).collect()
    }

    /// One-step-ahead residuals over the effective sample.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Estimated innovation variance.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Maximised (conditional) log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Akaike Information Criterion, `-2ℓ + 2k`.
    pub fn aic(&self) -> f64 {
        self.aic
    }

    /// Number of estimated parameters `k` entering the AIC penalty.
    pub fn num_params(&self) -> usize {
        self.orders.num_params(self.covariates.len())
    }

    /// Effective sample size after differencing and conditioning.
    pub fn n_effective(&self) -> usize {
        self.n_effective
    }

    /// In-sample one-step fitted values on the original scale. Entries
    /// before the conditioning window has filled are NaN.
    pub fn fitted_values(&self) -> &[f64] {
        &self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dummy_model() -> FittedModel {
        FittedModel {
            orders: ModelOrders::new(1, 0, 1),
            intercept: 0.5,
            ar: vec![0.6],
            ma: vec![-0.2],
            std_errors: vec![0.1, 0.05, 0.07],
            covariates: vec![CovariateEstimate {
                name: "x".to_string(),
                coefficient: 1.5,
                std_error: 0.2,
                p_value: 0.001,
            }],
            residuals: vec![0.1, -0.2, 0.3],
            sigma2: 1.0,
            log_likelihood: -50.0,
            aic: 110.0,
            n_effective: 3,
            original: vec![1.0, 2.0, 3.0, 4.0],
            arma_process: vec![0.0; 4],
            innovations: vec![0.0; 4],
            covariate_tails: vec![],
            fitted: vec![f64::NAN, 2.0, 3.0, 4.0],
        }
    }

    #[test]
    fn accessors_round_trip() {
        let model = dummy_model();
        assert_eq!(model.orders(), ModelOrders::new(1, 0, 1));
        assert_eq!(model.intercept(), 0.5);
        assert_eq!(model.ar(), &[0.6]);
        assert_eq!(model.ma(), &[-0.2]);
        assert_eq!(model.std_errors(), &[0.1, 0.05, 0.07]);
        assert_eq!(model.residuals(), &[0.1, -0.2, 0.3]);
        assert_eq!(model.sigma2(), 1.0);
        assert_eq!(model.log_likelihood(), -50.0);
        assert_eq!(model.aic(), 110.0);
        assert_eq!(model.n_effective(), 3);
        assert!(model.has_covariates());
        assert_eq!(model.covariate_names(), vec!["x".to_string()]);
        // p + q + intercept + 1 covariate + variance
        assert_eq!(model.num_params(), 5);
    }

    #[test]
    fn model_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<FittedModel>();
    }
}
