//! Residual and identification diagnostics.
//!
//! ACF/PACF for order identification, the Ljung-Box portmanteau test for
//! judging whether a fitted model has captured all linear dependence.

pub mod autocorrelation;
pub mod portmanteau;

pub use autocorrelation::{acf, acf_pacf, pacf, white_noise_band};
pub use portmanteau::{adequacy, ljung_box, AdequacyReport, LagStatistic};
