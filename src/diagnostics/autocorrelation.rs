//! Sample autocorrelation and partial autocorrelation functions.

use crate::error::{ModelError, Result};
use statrs::distribution::{ContinuousCDF, Normal};

/// Sample autocorrelation function for lags `0..=max_lag`.
///
/// `acf[k]` is the sample correlation between the series and itself
/// shifted by `k`; `acf[0]` is 1 by definition.
pub fn acf(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    validate(series, max_lag)?;

    let n = series.len();
    let mean = series.iter().sum::<f64>() / n as f64;
    let denominator: f64 = series.iter().map(|x| (x - mean).powi(2)).sum();
    if denominator < 1e-300 {
        return Err(ModelError::ConstantData);
    }

    let result = (0..=max_lag)
        .map(|lag| {
            let numerator: f64 = series
                .iter()
                .skip(lag)
                .zip(series.iter())
                .map(|(&a, &b)| (a - mean) * (b - mean))
                .sum();
            numerator / denominator
        })
        .collect();

    Ok(result)
}

/// Sample partial autocorrelation function for lags `0..=max_lag`,
/// computed by the Durbin-Levinson recursion. `pacf[0]` is 1 by
/// convention; `pacf[k]` is the correlation at lag `k` after controlling
/// for lags `1..k`.
pub fn pacf(series: &[f64], max_lag: usize) -> Result<Vec<f64>> {
    let rho = acf(series, max_lag)?;
    let mut result = vec![1.0];
    if max_lag == 0 {
        return Ok(result);
    }

    // phi[k][j]: coefficient j of the order-k autoregression.
    let mut phi = vec![vec![0.0; max_lag + 1]; max_lag + 1];
    phi[1][1] = rho[1];
    result.push(rho[1]);

    for k in 2..=max_lag {
        let mut numerator = rho[k];
        let mut denominator = 1.0;
        for j in 1..k {
            numerator -= phi[k - 1][j] * rho[k - j];
            denominator -= phi[k - 1][j] * rho[j];
        }

        if denominator.abs() < 1e-12 {
            return Err(ModelError::SingularInformation);
        }

        phi[k][k] = numerator / denominator;
        for j in 1..k {
            phi[k][j] = phi[k - 1][j] - phi[k][k] * phi[k - 1][k - j];
        }
        result.push(phi[k][k]);
    }

    Ok(result)
}

/// ACF and PACF together, the usual identification pair.
pub fn acf_pacf(series: &[f64], max_lag: usize) -> Result<(Vec<f64>, Vec<f64>)> {
    Ok((acf(series, max_lag)?, pacf(series, max_lag)?))
}

/// Half-width of the white-noise confidence band for a sample of size `n`
/// at the given two-sided level: `z_{(1+level)/2} / √n`. Sample
/// autocorrelations of white noise fall inside `±band` with probability
/// `level` at each lag.
pub fn white_noise_band(n: usize, level: f64) -> Result<f64> {
    if n == 0 {
        return Err(ModelError::EmptyData);
    }
    if !(0.0..1.0).contains(&level) {
        return Err(ModelError::InvalidParameter(
            "confidence level must lie in (0, 1)".to_string(),
        ));
    }
    let z = Normal::new(0.0, 1.0)
        .expect("standard normal")
        .inverse_cdf((1.0 + level) / 2.0);
    Ok(z / (n as f64).sqrt())
}

fn validate(series: &[f64], max_lag: usize) -> Result<()> {
    if series.is_empty() {
        return Err(ModelError::EmptyData);
    }
    if series.len() <= max_lag {
        return Err(ModelError::InsufficientData {
            needed: max_lag + 1,
            got: series.len(),
        });
    }
    Ok(())
}
