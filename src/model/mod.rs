//! ARIMA modeling: specification, simulation, estimation, forecasting,
//! and order selection.

pub mod diff;
mod estimate;
mod fitted;
mod forecast;
mod select;
mod simulate;
mod spec;

pub use diff::{difference, integrate, suggest_differencing};
pub use estimate::fit;
pub use fitted::{CovariateEstimate, FittedModel};
pub use forecast::{
    forecast, forecast_with_covariates, forecast_with_covariates_level, forecast_with_level,
};
pub use select::{select, Candidate, CandidateFailure, SelectionConfig, SelectionReport};
pub use spec::{ar_is_stationary, ma_is_invertible, ModelOrders, ModelSpec};
