//! Input/output helpers.
//!
//! - artifact JSON read/write (`artifacts`)
//! - applicant JSON/CSV ingest (`ingest`)
//! - batch prediction export (`export`)

pub mod artifacts;
pub mod export;
pub mod ingest;

pub use artifacts::*;
pub use export::*;
pub use ingest::*;
