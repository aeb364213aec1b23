//! `premium-predictor` library crate.
//!
//! The binary (`premium`) is a thin wrapper around this library so that:
//!
//! - the encoding/routing pipeline is testable without spawning processes
//! - other front ends (a web form, a notebook bridge) can call
//!   [`predictor::predict`] directly
//!
//! Pipeline: `domain::UserInput` → `features::encode` → per-tier scaler →
//! per-tier model → `predictor::Prediction`.

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod features;
pub mod io;
pub mod models;
pub mod predictor;
pub mod report;
pub mod routing;

#[cfg(test)]
mod testing;
