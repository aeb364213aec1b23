//! Applicant ingest from JSON and CSV.
//!
//! CSV batches use the `UserInput` field names as headers. Rows that fail to
//! deserialize (unknown category, missing column, bad number) are recorded as
//! row errors and skipped; the rest of the batch still runs.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::UserInput;
use crate::error::{AppError, PredictError};

/// An applicant together with the CSV line it came from.
#[derive(Debug, Clone)]
pub struct ApplicantRecord {
    pub line: usize,
    pub input: UserInput,
}

/// A row-level error encountered during ingest or prediction.
#[derive(Debug, Clone)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct IngestedApplicants {
    pub records: Vec<ApplicantRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Read a single applicant from a JSON object.
pub fn read_applicant_json(path: &Path) -> Result<UserInput, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open applicant JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| {
        let code = if e.is_data() { 3 } else { 2 };
        AppError::new(code, format!("Invalid applicant JSON '{}': {e}", path.display()))
    })
}

pub fn load_applicants_csv(path: &Path) -> Result<IngestedApplicants, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    read_applicants_csv(file)
}

pub fn read_applicants_csv<R: Read>(reader: R) -> Result<IngestedApplicants, AppError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV header: {e}")))?
        .clone();
    if headers.is_empty() {
        return Err(AppError::new(2, "CSV has no header row."));
    }

    let mut records = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0;

    for (i, result) in rdr.deserialize::<UserInput>().enumerate() {
        rows_read += 1;
        // Header is line 1.
        let line = i + 2;
        match result {
            Ok(input) => records.push(ApplicantRecord { line, input }),
            Err(e) => row_errors.push(RowError {
                line,
                message: e.to_string(),
            }),
        }
    }

    Ok(IngestedApplicants {
        records,
        row_errors,
        rows_read,
    })
}

impl From<(usize, PredictError)> for RowError {
    fn from((line, err): (usize, PredictError)) -> Self {
        RowError {
            line,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmploymentStatus, Region};

    const HEADER: &str = "age,gender,region,marital_status,bmi_category,smoking_status,employment_status,income_lakhs,medical_history,insurance_plan,number_of_dependants,genetical_risk";

    #[test]
    fn reads_valid_rows() {
        let csv = format!(
            "{HEADER}\n\
             22,Male,Northeast,Unmarried,Normal,No Smoking,Salaried,10,No Disease,Silver,0,No Risk\n\
             48, Female , Southwest ,Married,Obesity,Regular,Self-Employed,35,Diabetes & Heart disease,Gold,3,High\n"
        );
        let ingested = read_applicants_csv(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 2);
        assert!(ingested.row_errors.is_empty());
        assert_eq!(ingested.records[1].line, 3);
        assert_eq!(ingested.records[1].input.region, Region::Southwest);
        assert_eq!(ingested.records[1].input.employment_status, EmploymentStatus::SelfEmployed);
        assert_eq!(ingested.records[1].input.medical_history, "Diabetes & Heart disease");
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let csv = format!(
            "{HEADER}\n\
             30,Male,Midwest,Married,Normal,No Smoking,Salaried,10,None,Silver,0,Low\n\
             31,Male,Northwest,Married,Normal,No Smoking,Salaried,ten,None,Silver,0,Low\n\
             32,Male,Northwest,Married,Normal,No Smoking,Salaried,10,None,Silver,0,Low\n"
        );
        let ingested = read_applicants_csv(csv.as_bytes()).unwrap();
        assert_eq!(ingested.rows_read, 3);
        assert_eq!(ingested.records.len(), 1);
        assert_eq!(ingested.records[0].line, 4);

        assert_eq!(ingested.row_errors.len(), 2);
        assert_eq!(ingested.row_errors[0].line, 2);
        assert!(ingested.row_errors[0].message.contains("Midwest"));
        assert_eq!(ingested.row_errors[1].line, 3);
    }

    #[test]
    fn applicant_json_with_unknown_category_is_a_data_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applicant.json");
        std::fs::write(
            &path,
            r#"{"age": 30, "gender": "Male", "region": "Northeast", "marital_status": "Married",
                "bmi_category": "Normal", "smoking_status": "No Smoking", "employment_status": "Retired",
                "income_lakhs": 5, "medical_history": "None", "insurance_plan": "Bronze",
                "number_of_dependants": 1, "genetical_risk": "Low"}"#,
        )
        .unwrap();

        let err = read_applicant_json(&path).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("Retired"));
    }
}
