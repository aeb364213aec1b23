//! Export batch predictions to CSV.
//!
//! One row per successfully predicted applicant, keyed by the input CSV line.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::BatchPrediction;
use crate::error::AppError;

/// Write batch predictions to a CSV file.
pub fn write_predictions_csv(path: &Path, predictions: &[BatchPrediction]) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_predictions(file, predictions)
}

pub fn write_predictions<W: Write>(mut out: W, predictions: &[BatchPrediction]) -> Result<(), AppError> {
    writeln!(out, "line,age,tier,prediction,amount")
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;

    for p in predictions {
        writeln!(
            out,
            "{},{},{},{:.4},{}",
            p.line,
            p.age,
            p.prediction.tier,
            p.prediction.value,
            p.prediction.amount(),
        )
        .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
