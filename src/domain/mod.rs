//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the categorical answer enums (`Gender`, `Region`, `InsurancePlan`, ...)
//! - the per-request applicant record (`UserInput`)

pub mod types;

pub use types::*;
