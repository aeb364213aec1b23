//! The fixed feature schema shared by the encoder, the scalers and the models.
//!
//! The trained models were fitted on exactly these 18 columns, in exactly this
//! order. `FeatureColumn` is closed so the schema cannot drift at runtime.

use std::fmt;

/// Number of columns in a [`FeatureRow`].
pub const FEATURE_COUNT: usize = 18;

/// One column of the model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureColumn {
    Age,
    NumberOfDependants,
    IncomeLakhs,
    InsurancePlan,
    GeneticalRisk,
    NormalizedRiskScore,
    GenderMale,
    RegionNorthwest,
    RegionSoutheast,
    RegionSouthwest,
    MaritalStatusUnmarried,
    BmiCategoryObesity,
    BmiCategoryOverweight,
    BmiCategoryUnderweight,
    SmokingStatusOccasional,
    SmokingStatusRegular,
    EmploymentStatusSalaried,
    EmploymentStatusSelfEmployed,
}

impl FeatureColumn {
    /// Schema order.
    pub const ALL: [FeatureColumn; FEATURE_COUNT] = [
        FeatureColumn::Age,
        FeatureColumn::NumberOfDependants,
        FeatureColumn::IncomeLakhs,
        FeatureColumn::InsurancePlan,
        FeatureColumn::GeneticalRisk,
        FeatureColumn::NormalizedRiskScore,
        FeatureColumn::GenderMale,
        FeatureColumn::RegionNorthwest,
        FeatureColumn::RegionSoutheast,
        FeatureColumn::RegionSouthwest,
        FeatureColumn::MaritalStatusUnmarried,
        FeatureColumn::BmiCategoryObesity,
        FeatureColumn::BmiCategoryOverweight,
        FeatureColumn::BmiCategoryUnderweight,
        FeatureColumn::SmokingStatusOccasional,
        FeatureColumn::SmokingStatusRegular,
        FeatureColumn::EmploymentStatusSalaried,
        FeatureColumn::EmploymentStatusSelfEmployed,
    ];

    /// Column name as recorded in the training-time schema.
    pub fn name(self) -> &'static str {
        match self {
            FeatureColumn::Age => "age",
            FeatureColumn::NumberOfDependants => "number_of_dependants",
            FeatureColumn::IncomeLakhs => "income_lakhs",
            FeatureColumn::InsurancePlan => "insurance_plan",
            FeatureColumn::GeneticalRisk => "genetical_risk",
            FeatureColumn::NormalizedRiskScore => "normalized_risk_score",
            FeatureColumn::GenderMale => "gender_Male",
            FeatureColumn::RegionNorthwest => "region_Northwest",
            FeatureColumn::RegionSoutheast => "region_Southeast",
            FeatureColumn::RegionSouthwest => "region_Southwest",
            FeatureColumn::MaritalStatusUnmarried => "marital_status_Unmarried",
            FeatureColumn::BmiCategoryObesity => "bmi_category_Obesity",
            FeatureColumn::BmiCategoryOverweight => "bmi_category_Overweight",
            FeatureColumn::BmiCategoryUnderweight => "bmi_category_Underweight",
            FeatureColumn::SmokingStatusOccasional => "smoking_status_Occasional",
            FeatureColumn::SmokingStatusRegular => "smoking_status_Regular",
            FeatureColumn::EmploymentStatusSalaried => "employment_status_Salaried",
            FeatureColumn::EmploymentStatusSelfEmployed => "employment_status_Self-Employed",
        }
    }

    /// Position in the row.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<FeatureColumn> {
        FeatureColumn::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Column names in schema order.
pub fn column_names() -> [&'static str; FEATURE_COUNT] {
    FeatureColumn::ALL.map(FeatureColumn::name)
}

/// A fully populated model input row.
///
/// Columns start at 0 and are only ever overwritten, never added or removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    values: [f64; FEATURE_COUNT],
}

impl FeatureRow {
    pub fn zeroed() -> Self {
        Self {
            values: [0.0; FEATURE_COUNT],
        }
    }

    pub fn get(&self, column: FeatureColumn) -> f64 {
        self.values[column.index()]
    }

    pub fn set(&mut self, column: FeatureColumn, value: f64) {
        self.values[column.index()] = value;
    }

    /// Values in schema order.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// `(column, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureColumn, f64)> + '_ {
        FeatureColumn::ALL.into_iter().zip(self.values.iter().copied())
    }
}

impl Default for FeatureRow {
    fn default() -> Self {
        Self::zeroed()
    }
}
