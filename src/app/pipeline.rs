//! Shared batch pipeline used by the `batch` command.
//!
//! CSV ingest -> parallel prediction over the shared predictor -> results
//! ordered by input line. The predictor is read-only, so rows are predicted
//! independently on the rayon pool.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::io::ingest::{ApplicantRecord, IngestedApplicants, RowError};
use crate::predictor::{Prediction, Predictor};

/// One successfully predicted applicant.
#[derive(Debug, Clone)]
pub struct BatchPrediction {
    pub line: usize,
    pub age: u32,
    pub prediction: Prediction,
}

/// All computed outputs of a single batch run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub rows_read: usize,
    pub predictions: Vec<BatchPrediction>,
    /// Ingest and prediction failures, ordered by line.
    pub row_errors: Vec<RowError>,
}

impl BatchOutput {
    /// Number of predictions served by each tier.
    pub fn tier_counts(&self) -> BTreeMap<&str, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.predictions {
            *counts.entry(p.prediction.tier.as_str()).or_insert(0) += 1;
        }
        counts
    }
}

/// Predict every ingested applicant.
pub fn run_batch(predictor: &Predictor, ingested: IngestedApplicants) -> BatchOutput {
    let results: Vec<(usize, u32, Result<Prediction, _>)> = ingested
        .records
        .par_iter()
        .map(|ApplicantRecord { line, input }| (*line, input.age, predictor.predict(input)))
        .collect();

    let mut predictions = Vec::with_capacity(results.len());
    let mut row_errors = ingested.row_errors;
    for (line, age, result) in results {
        match result {
            Ok(prediction) => predictions.push(BatchPrediction { line, age, prediction }),
            Err(e) => {
                log::warn!("line {line}: {e}");
                row_errors.push(RowError::from((line, e)));
            }
        }
    }
    row_errors.sort_by_key(|e| e.line);

    BatchOutput {
        rows_read: ingested.rows_read,
        predictions,
        row_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::read_applicants_csv;
    use crate::testing::reference_router;

    #[test]
    fn batch_keeps_line_order_and_routes_each_row() {
        let csv = "age,gender,region,marital_status,bmi_category,smoking_status,employment_status,income_lakhs,medical_history,insurance_plan,number_of_dependants,genetical_risk\n\
                   22,Male,Northeast,Unmarried,Normal,No Smoking,Salaried,10,No Disease,Silver,0,No Risk\n\
                   60,Female,Southeast,Married,Obesity,Regular,Freelancer,40,Heart disease,Gold,2,Medium\n\
                   30,Male,Nowhere,Married,Normal,No Smoking,Salaried,10,None,Silver,0,Low\n\
                   25,Female,Northwest,Unmarried,Overweight,Occasional,Self-Employed,5,Thyroid,Bronze,1,Low\n";
        let ingested = read_applicants_csv(csv.as_bytes()).unwrap();
        let predictor = Predictor::new(reference_router());

        let output = run_batch(&predictor, ingested);
        assert_eq!(output.rows_read, 4);

        let lines: Vec<usize> = output.predictions.iter().map(|p| p.line).collect();
        assert_eq!(lines, vec![2, 3, 5]);
        let tiers: Vec<&str> = output.predictions.iter().map(|p| p.prediction.tier.as_str()).collect();
        assert_eq!(tiers, vec!["young", "rest", "young"]);

        assert_eq!(output.row_errors.len(), 1);
        assert_eq!(output.row_errors[0].line, 4);

        let counts = output.tier_counts();
        assert_eq!(counts["young"], 2);
        assert_eq!(counts["rest"], 1);
    }
}
