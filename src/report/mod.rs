//! Reporting utilities: currency rendering and formatted terminal output.
//!
//! We keep formatting code in one place so the prediction code stays free of
//! presentation concerns.

pub mod format;

pub use format::*;

use crate::predictor::Prediction;

/// Currency symbol used for premiums.
pub const CURRENCY: &str = "₹";

/// Render a premium. By default the truncated whole amount is shown, as the
/// questionnaire does; `precise` shows the raw model output.
pub fn format_amount(prediction: &Prediction, precise: bool) -> String {
    if precise {
        format!("{CURRENCY}{:.2}", prediction.value)
    } else {
        format!("{CURRENCY}{:.2}", prediction.amount() as f64)
    }
}
