//! Error types for the boxjenkins library.

use thiserror::Error;

/// Result type alias for modeling operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur during simulation, estimation, forecasting, or
/// model selection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Insufficient data points for the operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Input data contains NaN or infinite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Input data has zero variance.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Malformed model specification (order/coefficient mismatch).
    #[error("invalid model spec: {0}")]
    InvalidSpec(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between data structures.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// The likelihood optimizer exceeded its iteration bound or diverged.
    #[error("estimation did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },

    /// The observed information matrix is not invertible at the optimum,
    /// so standard errors are undefined (near-unidentified model).
    #[error("singular information matrix: standard errors are undefined")]
    SingularInformation,

    /// The model violates stationarity or invertibility constraints.
    #[error("model is non-stationary or non-invertible: {0}")]
    NonStationary(String),

    /// A covariate required for fitting or forecasting is missing.
    #[error("missing covariate '{0}'")]
    MissingCovariate(String),

    /// Every candidate order in a selection grid failed to fit.
    #[error("all {attempted} candidate orders failed (max_p={max_p}, max_q={max_q})")]
    AllCandidatesFailed {
        attempted: usize,
        max_p: usize,
        max_q: usize,
    },
}
