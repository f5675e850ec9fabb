//! Grid-search order selection ranked by penalized AIC.

use crate::core::{CovariateSet, ObservationSeries};
use crate::error::{ModelError, Result};
use crate::model::estimate::fit;
use crate::model::fitted::FittedModel;
use crate::model::ModelOrders;
use tracing::debug;

/// Configuration for a selection run.
///
/// The differencing order is fixed by the caller rather than searched:
/// AIC values are not comparable across series differenced to different
/// lengths. Use [`suggest_differencing`](crate::model::diff::suggest_differencing)
/// (or a stationarity test) to choose `d` beforehand.
#[derive(Debug, Clone)]
pub struct SelectionConfig {
    /// Maximum AR order to consider.
    pub max_p: usize,
    /// Maximum MA order to consider.
    pub max_q: usize,
    /// Differencing order applied to every candidate.
    pub d: usize,
    /// Multiplier on the `2k` complexity penalty. Values above 1 bias the
    /// ranking toward simpler models; unpenalized AIC search tends to
    /// favour over-parameterized fits.
    pub penalty_weight: f64,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            max_p: 3,
            max_q: 3,
            d: 0,
            penalty_weight: 1.0,
        }
    }
}

impl SelectionConfig {
    pub fn new(max_p: usize, max_q: usize, d: usize) -> Self {
        Self {
            max_p,
            max_q,
            d,
            ..Default::default()
        }
    }

    /// Scale the complexity penalty.
    pub fn with_penalty_weight(mut self, weight: f64) -> Self {
        self.penalty_weight = weight;
        self
    }
}

/// A converged candidate in the ranking.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub orders: ModelOrders,
    /// Plain AIC, `-2ℓ + 2k`.
    pub aic: f64,
    /// Penalized ranking score, `-2ℓ + penalty_weight · 2k`.
    pub score: f64,
    /// Parameter count `k`.
    pub num_params: usize,
}

/// A candidate excluded from the ranking, with the error that excluded it.
#[derive(Debug, Clone)]
pub struct CandidateFailure {
    pub orders: ModelOrders,
    pub error: ModelError,
}

/// Outcome of a selection run: the winning fit, the full ranking, and the
/// candidates that failed.
#[derive(Debug, Clone)]
pub struct SelectionReport {
    best: FittedModel,
    ranked: Vec<Candidate>,
    failures: Vec<CandidateFailure>,
}

impl SelectionReport {
    /// The winning fitted model (lowest penalized score).
    pub fn best(&self) -> &FittedModel {
        &self.best
    }

    /// Consume the report, keeping only the winning model.
    pub fn into_best(self) -> FittedModel {
        self.best
    }

    /// All converged candidates, best first.
    pub fn ranked(&self) -> &[Candidate] {
        &self.ranked
    }

    /// Candidates excluded because fitting failed. Never folded into the
    /// ranking as pseudo-infinite scores.
    pub fn failures(&self) -> &[CandidateFailure] {
        &self.failures
    }
}

/// Fit every (p, q) in `0..=max_p × 0..=max_q` at the configured `d` and
/// rank the survivors by penalized AIC ascending, ties broken by fewer
/// parameters and then by (p, q).
///
/// The tie-break makes the ranking a total order, so the result is
/// deterministic for a fixed input regardless of fit order. Candidates
/// that fail to converge (or fail validation) are reported in the result,
/// not silently dropped.
pub fn select(
    series: &ObservationSeries,
    config: &SelectionConfig,
    covariates: Option<&CovariateSet>,
) -> Result<SelectionReport> {
    if !config.penalty_weight.is_finite() || config.penalty_weight <= 0.0 {
        return Err(ModelError::InvalidParameter(
            "penalty weight must be positive".to_string(),
        ));
    }

    let num_cov = covariates.map(CovariateSet::len).unwrap_or(0);
    let mut survivors: Vec<(Candidate, FittedModel)> = Vec::new();
    let mut failures = Vec::new();
    let mut attempted = 0;

    for p in 0..=config.max_p {
        for q in 0..=config.max_q {
            let orders = ModelOrders::new(p, config.d, q);
            attempted += 1;

            match fit(series, orders, covariates) {
                Ok(model) => {
                    let k = orders.num_params(num_cov);
                    let score = -2.0 * model.log_likelihood()
                        + config.penalty_weight * 2.0 * k as f64;
                    survivors.push((
                        Candidate {
                            orders,
                            aic: model.aic(),
                            score,
                            num_params: k,
                        },
                        model,
                    ));
                }
                Err(error) => {
                    debug!(%orders, %error, "candidate excluded from selection");
                    failures.push(CandidateFailure { orders, error });
                }
            }
        }
    }

    if survivors.is_empty() {
        return Err(ModelError::AllCandidatesFailed {
            attempted,
            max_p: config.max_p,
            max_q: config.max_q,
        });
    }

    survivors.sort_by(|(a, _), (b, _)| {
        a.score
            .partial_cmp(&b.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.num_params.cmp(&b.num_params))
            .then((a.orders.p, a.orders.q).cmp(&(b.orders.p, b.orders.q)))
    });

    let ranked: Vec<Candidate> = survivors.iter().map(|(c, _)| c.clone()).collect();
    let best = survivors.swap_remove(0).1;

    Ok(SelectionReport {
        best,
        ranked,
        failures,
    })
}
