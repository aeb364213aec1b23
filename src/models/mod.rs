//! Pre-trained artifacts: column scalers and regressors.
//!
//! Both are loaded once, validated against the feature schema, and then only
//! ever read.

pub mod regressor;
pub mod scaler;

pub use regressor::*;
pub use scaler::*;
