//! Command-line parsing for the premium predictor.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! encoding/prediction code. Applicant flags carry the same bounds and
//! defaults as the questionnaire form.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    BmiCategory, EmploymentStatus, Gender, GeneticalRisk, InsurancePlan, MaritalStatus, Region,
    SmokingStatus, UserInput,
};
use crate::error::AppError;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "premium", version, about = "Health insurance premium predictor")]
pub struct Cli {
    /// Artifact directory (overrides PREMIUM_ARTIFACT_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict the premium for one applicant.
    Predict(PredictArgs),
    /// Show the tier, encoded row, scaled row and prediction for one applicant.
    Explain(ApplicantArgs),
    /// Predict every applicant in a CSV file.
    Batch(BatchArgs),
    /// Print the model feature columns in schema order.
    Schema,
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub applicant: ApplicantArgs,

    /// Print the untruncated model output instead of the whole amount.
    #[arg(long)]
    pub precise: bool,
}

/// One applicant, either as flags or as a JSON file.
#[derive(Debug, Args, Clone)]
pub struct ApplicantArgs {
    /// Read the applicant from a JSON object instead of flags.
    #[arg(long, value_name = "JSON")]
    pub input: Option<PathBuf>,

    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(18..=100))]
    pub age: u32,

    /// Male | Female
    #[arg(long, required_unless_present = "input")]
    pub gender: Option<Gender>,

    /// Northeast | Northwest | Southeast | Southwest
    #[arg(long, required_unless_present = "input")]
    pub region: Option<Region>,

    /// Married | Unmarried
    #[arg(long, required_unless_present = "input")]
    pub marital_status: Option<MaritalStatus>,

    /// Normal | Overweight | Underweight | Obesity
    #[arg(long, required_unless_present = "input")]
    pub bmi_category: Option<BmiCategory>,

    /// "No Smoking" | Regular | Occasional
    #[arg(long, required_unless_present = "input")]
    pub smoking_status: Option<SmokingStatus>,

    /// Salaried | Self-Employed | Freelancer
    #[arg(long, required_unless_present = "input")]
    pub employment_status: Option<EmploymentStatus>,

    /// Annual income in lakhs.
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u32).range(0..=100))]
    pub income_lakhs: u32,

    /// Conditions joined by " & ", e.g. "Diabetes & Thyroid".
    #[arg(long, required_unless_present = "input")]
    pub medical_history: Option<String>,

    /// Bronze | Silver | Gold
    #[arg(long, required_unless_present = "input")]
    pub insurance_plan: Option<InsurancePlan>,

    #[arg(
        long,
        visible_alias = "dependants",
        default_value_t = 0,
        value_parser = clap::value_parser!(u32).range(0..=10)
    )]
    pub number_of_dependants: u32,

    /// "No Risk" | Low | Medium | High
    #[arg(long, required_unless_present = "input")]
    pub genetical_risk: Option<GeneticalRisk>,
}

fn required<T>(value: Option<T>, flag: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::new(2, format!("Missing --{flag}.")))
}

impl ApplicantArgs {
    /// Build the applicant from `--input` or from the individual flags.
    pub fn resolve(&self) -> Result<UserInput, AppError> {
        if let Some(path) = &self.input {
            return crate::io::ingest::read_applicant_json(path);
        }
        Ok(UserInput {
            age: self.age,
            gender: required(self.gender, "gender")?,
            region: required(self.region, "region")?,
            marital_status: required(self.marital_status, "marital-status")?,
            bmi_category: required(self.bmi_category, "bmi-category")?,
            smoking_status: required(self.smoking_status, "smoking-status")?,
            employment_status: required(self.employment_status, "employment-status")?,
            income_lakhs: self.income_lakhs,
            medical_history: required(self.medical_history.clone(), "medical-history")?,
            insurance_plan: required(self.insurance_plan, "insurance-plan")?,
            number_of_dependants: self.number_of_dependants,
            genetical_risk: required(self.genetical_risk, "genetical-risk")?,
        })
    }
}

#[derive(Debug, Args, Clone)]
pub struct BatchArgs {
    /// Applicant CSV with a header row of field names.
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,

    /// Write per-applicant predictions to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Print untruncated model outputs.
    #[arg(long)]
    pub precise: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("premium").chain(args.iter().copied()))
    }

    const REFERENCE_FLAGS: [&str; 21] = [
        "predict",
        "--age",
        "22",
        "--gender",
        "Male",
        "--region",
        "Northeast",
        "--marital-status",
        "Unmarried",
        "--bmi-category",
        "Normal",
        "--smoking-status",
        "No Smoking",
        "--employment-status",
        "Salaried",
        "--income-lakhs",
        "10",
        "--medical-history",
        "No Disease",
        "--insurance-plan",
        "Silver",
    ];

    #[test]
    fn flags_build_the_applicant() {
        let mut args = REFERENCE_FLAGS.to_vec();
        args.extend(["--genetical-risk", "No Risk"]);
        let cli = parse(&args).unwrap();
        let Command::Predict(predict) = cli.command else {
            panic!("expected predict");
        };
        let input = predict.applicant.resolve().unwrap();
        assert_eq!(input, crate::testing::reference_applicant());
    }

    #[test]
    fn missing_category_flag_is_rejected_by_clap() {
        assert!(parse(&REFERENCE_FLAGS).is_err());
    }

    #[test]
    fn unknown_category_is_rejected_by_clap() {
        let mut args = REFERENCE_FLAGS.to_vec();
        args.extend(["--genetical-risk", "Extreme"]);
        let err = parse(&args).unwrap_err();
        assert!(err.to_string().contains("Extreme"));
    }

    #[test]
    fn age_outside_form_bounds_is_rejected() {
        let mut args = REFERENCE_FLAGS.to_vec();
        args.extend(["--genetical-risk", "Low"]);
        args[2] = "17";
        assert!(parse(&args).is_err());
    }

    #[test]
    fn json_input_replaces_flags() {
        let cli = parse(&["explain", "--input", "applicant.json", "--artifacts", "models"]).unwrap();
        assert_eq!(cli.artifacts, Some(PathBuf::from("models")));
        let Command::Explain(applicant) = cli.command else {
            panic!("expected explain");
        };
        assert_eq!(applicant.input, Some(PathBuf::from("applicant.json")));
    }
}
