//! # boxjenkins
//!
//! A small ARIMA time-series modeling engine covering the Box–Jenkins
//! workflow: simulate synthetic series from a known model, estimate
//! ARMA/ARIMA parameters by conditional maximum likelihood (optionally
//! with covariates), diagnose residuals with ACF/PACF and the Ljung-Box
//! portmanteau test, forecast with widening prediction intervals, and
//! select orders over a bounded grid ranked by AIC.
//!
//! ```
//! use boxjenkins::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! // Simulate an AR(1) process, refit it, and forecast ahead.
//! let spec = ModelSpec::new(ModelOrders::new(1, 0, 0), vec![0.7], vec![])?;
//! let mut rng = StdRng::seed_from_u64(42);
//! let series = spec.simulate(500, 1.0, &mut rng)?;
//!
//! let model = fit(&series, ModelOrders::new(1, 0, 0), None)?;
//! let ahead = forecast(&model, 12)?;
//! assert_eq!(ahead.horizon(), 12);
//! # Ok::<(), boxjenkins::ModelError>(())
//! ```

pub mod core;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod utils;

pub use error::{ModelError, Result};

pub mod prelude {
    pub use crate::core::{CovariateSet, Forecast, ObservationSeries};
    pub use crate::diagnostics::{acf_pacf, adequacy, ljung_box};
    pub use crate::error::{ModelError, Result};
    pub use crate::model::{
        fit, forecast, forecast_with_covariates, select, FittedModel, ModelOrders, ModelSpec,
        SelectionConfig,
    };
}
