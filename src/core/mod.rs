//! Core data structures for ARIMA modeling.

mod covariates;
mod forecast;
mod series;

pub use covariates::CovariateSet;
pub use forecast::{Forecast, ForecastStep};
pub use series::ObservationSeries;
