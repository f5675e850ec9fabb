//! Numerical utilities shared across the engine.

pub mod linalg;
pub mod optimization;

pub use linalg::{invert_symmetric, numeric_hessian, solve_symmetric};
pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
