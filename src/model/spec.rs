//! ARIMA model specification and polynomial stability checks.

use crate::error::{ModelError, Result};

/// ARIMA model orders (p, d, q).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelOrders {
    /// AR order.
    pub p: usize,
    /// Differencing order.
    pub d: usize,
    /// MA order.
    pub q: usize,
}

impl ModelOrders {
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self { p, d, q }
    }

    /// Number of estimated parameters: AR + MA + intercept + covariates
    /// + innovation variance.
    pub fn num_params(&self, num_covariates: usize) -> usize {
        self.p + self.q + 1 + num_covariates + 1
    }
}

impl std::fmt::Display for ModelOrders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ARIMA({},{},{})", self.p, self.d, self.q)
    }
}

/// A fully specified ARIMA model: orders plus AR/MA coefficients.
///
/// This is the simulator's input. Coefficient counts must match the
/// orders; stationarity and invertibility are checked at simulation time.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    orders: ModelOrders,
    ar: Vec<f64>,
    ma: Vec<f64>,
}

impl ModelSpec {
    /// Create a specification, validating coefficient counts against orders.
    pub fn new(orders: ModelOrders, ar: Vec<f64>, ma: Vec<f64>) -> Result<Self> {
        if ar.len() != orders.p {
            return Err(ModelError::InvalidSpec(format!(
                "ar coefficient count {} != order p={}",
                ar.len(),
                orders.p
            )));
        }
        if ma.len() != orders.q {
            return Err(ModelError::InvalidSpec(format!(
                "ma coefficient count {} != order q={}",
                ma.len(),
                orders.q
            )));
        }
        if ar.iter().chain(ma.iter()).any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidSpec(
                "coefficients must be finite".to_string(),
            ));
        }
        Ok(Self { orders, ar, ma })
    }

    pub fn orders(&self) -> ModelOrders {
        self.orders
    }

    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    pub fn ma(&self) -> &[f64] {
        &self.ma
    }
}

/// Reflection coefficients of an AR polynomial via the Levinson step-down
/// recursion. Returns `None` as soon as a coefficient reaches the unit
/// circle, i.e. when the polynomial has a root on or inside it.
fn reflection_coefficients(ar: &[f64]) -> Option<Vec<f64>> {
    let mut coeffs = ar.to_vec();
    let mut reflections = Vec::with_capacity(ar.len());

    for k in (1..=ar.len()).rev() {
        let r = coeffs[k - 1];
        if !r.is_finite() || r.abs() >= 1.0 {
            return None;
        }
        reflections.push(r);
        let denom = 1.0 - r * r;
        let mut next = vec![0.0; k - 1];
        for i in 0..k - 1 {
            next[i] = (coeffs[i] + r * coeffs[k - 2 - i]) / denom;
        }
        coeffs = next;
    }

    Some(reflections)
}

/// Whether the AR polynomial `1 - φ₁z - … - φₚzᵖ` has all roots outside
/// the unit circle.
pub fn ar_is_stationary(ar: &[f64]) -> bool {
    reflection_coefficients(ar).is_some()
}

/// Whether the MA polynomial `1 + θ₁z + … + θ_q z^q` has all roots outside
/// the unit circle. Equivalent to stationarity of the sign-flipped
/// coefficients in AR form.
pub fn ma_is_invertible(ma: &[f64]) -> bool {
    let flipped: Vec<f64> = ma.iter().map(|&t| -t).collect();
    ar_is_stationary(&flipped)
}

/// Largest reflection-coefficient magnitude of the AR-form polynomial,
/// or `None` when the polynomial is unstable. Values near 1 indicate a
/// near-unit root.
pub(crate) fn stability_margin(ar_form: &[f64]) -> Option<f64> {
    reflection_coefficients(ar_form)
        .map(|r| r.iter().fold(0.0f64, |acc, c| acc.max(c.abs())))
}

/// Coefficients of `φ(B)·(1−B)^d` in AR form: the returned vector `g`
/// satisfies `1 − Σ gᵢ Bⁱ = (1 − Σ φᵢ Bⁱ)(1−B)^d`, so the integrated
/// process obeys `y_t = Σ gᵢ y_{t−i} + …`.
pub(crate) fn integrate_ar_polynomial(ar: &[f64], d: usize) -> Vec<f64> {
    // Full polynomial coefficients, constant term first: [1, -φ1, ..., -φp]
    let mut poly: Vec<f64> = std::iter::once(1.0).chain(ar.iter().map(|&c| -c)).collect();

    for _ in 0..d {
        // Multiply by (1 - B)
        let mut product = vec![0.0; poly.len() + 1];
        for (i, &c) in poly.iter().enumerate() {
            product[i] += c;
            product[i + 1] -= c;
        }
        poly = product;
    }

    poly.iter().skip(1).map(|&c| -c).collect()
}
