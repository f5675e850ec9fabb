//! Differencing and re-integration for ARIMA models.

/// Difference a series `d` times.
///
/// Each pass shortens the series by one; a series shorter than two
/// observations stops differencing early.
pub fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut result = series.to_vec();
    for _ in 0..d {
        if result.len() <= 1 {
            break;
        }
        result = result.windows(2).map(|w| w[1] - w[0]).collect();
    }
    result
}

/// Reverse `d`-fold differencing of a continuation sequence.
///
/// `continuation` holds values on the `d`-times-differenced scale that
/// extend past the end of `original`; the integration constants at each
/// level are taken from the tail of `original`'s intermediate differences.
pub fn integrate(continuation: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 || continuation.is_empty() {
        return continuation.to_vec();
    }

    let mut result = continuation.to_vec();
    for level in (0..d).rev() {
        let init = *difference(original, level).last().unwrap_or(&0.0);
        let mut cumsum = init;
        for value in &mut result {
            cumsum += *value;
            *value = cumsum;
        }
    }
    result
}

/// Suggest a differencing order (0, 1, or 2) via the variance-ratio
/// heuristic: difference as long as it substantially reduces variance.
pub fn suggest_differencing(series: &[f64]) -> usize {
    if series.len() < 3 {
        return 0;
    }

    let var_0 = variance(series);
    let diff_1 = difference(series, 1);
    if diff_1.len() < 2 {
        return 0;
    }
    let var_1 = variance(&diff_1);

    if var_0 > 0.0 && var_1 / var_0 < 0.9 {
        let diff_2 = difference(&diff_1, 1);
        if diff_2.len() >= 2 {
            let var_2 = variance(&diff_2);
            if var_2 / var_1 < 0.9 && var_2 < var_0 {
                return 2;
            }
        }
        return 1;
    }

    0
}

fn variance(series: &[f64]) -> f64 {
    if series.len() < 2 {
        return 0.0;
    }
    let mean = series.iter().sum::<f64>() / series.len() as f64;
    series.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (series.len() - 1) as f64
}
