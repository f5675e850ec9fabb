//! Ljung-Box portmanteau test for residual autocorrelation.

use crate::error::{ModelError, Result};
use statrs::distribution::{ChiSquared, ContinuousCDF};

/// The portmanteau statistic at one lag.
#[derive(Debug, Clone, PartialEq)]
pub struct LagStatistic {
    /// Lag up to which autocorrelations enter the statistic.
    pub lag: usize,
    /// Cumulative Ljung-Box Q statistic.
    pub statistic: f64,
    /// Survival probability of Q under the chi-squared null.
    pub p_value: f64,
}

/// Per-lag adequacy classification of a residual series.
///
/// Lags are reported individually: a model that passes at some lags and
/// fails at others is *partially* adequate, which is a finding in itself,
/// never averaged away.
#[derive(Debug, Clone)]
pub struct AdequacyReport {
    /// Significance threshold the lags were judged against.
    pub alpha: f64,
    /// Lags whose p-value stayed above `alpha`.
    pub passed: Vec<usize>,
    /// Lags whose p-value fell to `alpha` or below.
    pub failed: Vec<usize>,
}

impl AdequacyReport {
    /// Whether every tested lag passed.
    pub fn is_adequate(&self) -> bool {
        !self.passed.is_empty() && self.failed.is_empty()
    }

    /// Whether some lags passed and others failed.
    pub fn is_partial(&self) -> bool {
        !self.passed.is_empty() && !self.failed.is_empty()
    }
}

/// Ljung-Box test of joint zero autocorrelation, evaluated cumulatively
/// at every lag `1..=lags`.
///
/// `fitted_params` reduces the chi-squared degrees of freedom when the
/// residuals come from a fitted model (`p + q` for an ARMA fit); the
/// degrees of freedom are floored at 1 for the early lags.
///
/// Residuals with exactly zero variance trivially pass every lag.
pub fn ljung_box(
    residuals: &[f64],
    lags: usize,
    fitted_params: usize,
) -> Result<Vec<LagStatistic>> {
    let n = residuals.len();
    if n < 3 {
        return Err(ModelError::InsufficientData { needed: 3, got: n });
    }
    if lags == 0 {
        return Err(ModelError::InvalidParameter(
            "portmanteau test needs at least one lag".to_string(),
        ));
    }
    let lags = lags.min(n - 1);

    let mean = residuals.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = residuals.iter().map(|&x| x - mean).collect();
    let variance: f64 = centered.iter().map(|&x| x * x).sum();

    if variance == 0.0 {
        return Ok((1..=lags)
            .map(|lag| LagStatistic {
                lag,
                statistic: 0.0,
                p_value: 1.0,
            })
            .collect());
    }

    let mut result = Vec::with_capacity(lags);
    let mut q = 0.0;
    for lag in 1..=lags {
        let rho: f64 = centered
            .iter()
            .skip(lag)
            .zip(centered.iter())
            .map(|(&a, &b)| a * b)
            .sum::<f64>()
            / variance;

        q += rho * rho / (n - lag) as f64;
        let statistic = q * n as f64 * (n + 2) as f64;

        let df = lag.saturating_sub(fitted_params).max(1);
        let chi2 = ChiSquared::new(df as f64).expect("positive df");
        result.push(LagStatistic {
            lag,
            statistic,
            p_value: chi2.sf(statistic),
        });
    }

    Ok(result)
}

/// Classify each tested lag against a significance threshold.
pub fn adequacy(statistics: &[LagStatistic], alpha: f64) -> AdequacyReport {
    let mut passed = Vec::new();
    let mut failed = Vec::new();
    for stat in statistics {
        if stat.p_value > alpha {
            passed.push(stat.lag);
        } else {
            failed.push(stat.lag);
        }
    }
    AdequacyReport {
        alpha,
        passed,
        failed,
    }
}
