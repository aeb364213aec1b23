//! Feature engineering: applicant answers → fixed-schema model input.
//!
//! - `risk`: medical-history text → normalized risk score
//! - `schema`: the 18 named columns and the `FeatureRow` container
//! - `encoder`: `UserInput` → `FeatureRow`

pub mod encoder;
pub mod risk;
pub mod schema;

pub use encoder::encode;
pub use risk::normalize;
pub use schema::*;
