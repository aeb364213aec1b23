//! Shared domain types.
//!
//! Every categorical answer is a closed enum with a canonical label. The label
//! is what the applicant sees, what JSON/CSV inputs carry, and what parsing
//! accepts (case-insensitive). Anything else is rejected at the boundary with
//! [`PredictError::UnrecognizedCategory`], so the encoder only ever sees valid
//! variants.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PredictError;

/// Declare a categorical enum together with its label table.
///
/// Generates `ALL`, `label()`, `Display`, `FromStr` and string-based serde.
/// Extra `| "alias"` labels are accepted when parsing but never produced.
/// Clap parses these through `FromStr` rather than `ValueEnum`: labels such
/// as `"No Smoking"` contain spaces and must match the serde form exactly.
macro_rules! labelled_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($field:literal) {
            $($(#[$vmeta:meta])* $variant:ident => $label:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical label.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = PredictError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $(
                    if needle.eq_ignore_ascii_case($label) $(|| needle.eq_ignore_ascii_case($alias))* {
                        return Ok($name::$variant);
                    }
                )+
                Err(PredictError::UnrecognizedCategory {
                    field: $field,
                    value: s.to_string(),
                })
            }
        }

        impl TryFrom<String> for $name {
            type Error = PredictError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.label().to_string()
            }
        }
    };
}

labelled_enum! {
    pub enum Gender("gender") {
        Male => "Male",
        Female => "Female",
    }
}

labelled_enum! {
    pub enum Region("region") {
        Northeast => "Northeast",
        Northwest => "Northwest",
        Southeast => "Southeast",
        Southwest => "Southwest",
    }
}

labelled_enum! {
    pub enum MaritalStatus("marital_status") {
        Married => "Married",
        Unmarried => "Unmarried",
    }
}

labelled_enum! {
    pub enum BmiCategory("bmi_category") {
        Normal => "Normal",
        Overweight => "Overweight",
        Underweight => "Underweight",
        Obesity => "Obesity",
    }
}

labelled_enum! {
    pub enum SmokingStatus("smoking_status") {
        NoSmoking => "No Smoking",
        /// `Smoking=0` appears in the raw training data and was encoded as regular.
        Regular => "Regular" | "Smoking=0",
        Occasional => "Occasional",
    }
}

labelled_enum! {
    pub enum EmploymentStatus("employment_status") {
        Salaried => "Salaried",
        SelfEmployed => "Self-Employed",
        Freelancer => "Freelancer",
    }
}

labelled_enum! {
    pub enum InsurancePlan("insurance_plan") {
        Bronze => "Bronze",
        Silver => "Silver",
        Gold => "Gold",
    }
}

labelled_enum! {
    pub enum GeneticalRisk("genetical_risk") {
        NoRisk => "No Risk",
        Low => "Low",
        Medium => "Medium",
        High => "High",
    }
}

impl InsurancePlan {
    /// Ordinal code used by the trained models.
    pub fn ordinal(self) -> f64 {
        match self {
            InsurancePlan::Bronze => 1.0,
            InsurancePlan::Silver => 2.0,
            InsurancePlan::Gold => 3.0,
        }
    }
}

impl GeneticalRisk {
    /// Ordinal code used by the trained models.
    pub fn ordinal(self) -> f64 {
        match self {
            GeneticalRisk::NoRisk => 0.0,
            GeneticalRisk::Low => 1.0,
            GeneticalRisk::Medium => 2.0,
            GeneticalRisk::High => 3.0,
        }
    }
}

/// Medical-history answers offered by the questionnaire.
///
/// `medical_history` itself stays free text; these are the combinations the
/// models were trained on.
pub const MEDICAL_HISTORY_CHOICES: [&str; 9] = [
    "High blood pressure",
    "No Disease",
    "Diabetes & High blood pressure",
    "Diabetes & Heart disease",
    "Diabetes",
    "Diabetes & Thyroid",
    "Heart disease",
    "Thyroid",
    "High blood pressure & Heart disease",
];

/// One applicant's answers.
///
/// Field names match the JSON/CSV keys. Numeric bounds (age 18–100, income
/// 0–100 lakhs, dependants 0–10) are enforced by the front end, not here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub age: u32,
    pub gender: Gender,
    pub region: Region,
    pub marital_status: MaritalStatus,
    pub bmi_category: BmiCategory,
    pub smoking_status: SmokingStatus,
    pub employment_status: EmploymentStatus,
    pub income_lakhs: u32,
    pub medical_history: String,
    pub insurance_plan: InsurancePlan,
    pub number_of_dependants: u32,
    pub genetical_risk: GeneticalRisk,
}
