//! Turn an applicant's answers into the fixed model input row.
//!
//! Continuous answers are copied, the two ordinal answers use their code
//! tables, and every other categorical answer goes through an indicator table
//! that maps each variant to its column. The baseline variant of each group
//! maps to `None` and leaves the whole group at 0.

use crate::domain::{
    BmiCategory, EmploymentStatus, Gender, MaritalStatus, Region, SmokingStatus, UserInput,
};
use crate::features::risk;
use crate::features::schema::{FeatureColumn, FeatureRow};

fn gender_column(v: Gender) -> Option<FeatureColumn> {
    match v {
        Gender::Male => Some(FeatureColumn::GenderMale),
        Gender::Female => None,
    }
}

fn region_column(v: Region) -> Option<FeatureColumn> {
    match v {
        Region::Northeast => None,
        Region::Northwest => Some(FeatureColumn::RegionNorthwest),
        Region::Southeast => Some(FeatureColumn::RegionSoutheast),
        Region::Southwest => Some(FeatureColumn::RegionSouthwest),
    }
}

fn marital_status_column(v: MaritalStatus) -> Option<FeatureColumn> {
    match v {
        MaritalStatus::Married => None,
        MaritalStatus::Unmarried => Some(FeatureColumn::MaritalStatusUnmarried),
    }
}

fn bmi_category_column(v: BmiCategory) -> Option<FeatureColumn> {
    match v {
        BmiCategory::Normal => None,
        BmiCategory::Obesity => Some(FeatureColumn::BmiCategoryObesity),
        BmiCategory::Overweight => Some(FeatureColumn::BmiCategoryOverweight),
        BmiCategory::Underweight => Some(FeatureColumn::BmiCategoryUnderweight),
    }
}

fn smoking_status_column(v: SmokingStatus) -> Option<FeatureColumn> {
    match v {
        SmokingStatus::NoSmoking => None,
        SmokingStatus::Occasional => Some(FeatureColumn::SmokingStatusOccasional),
        SmokingStatus::Regular => Some(FeatureColumn::SmokingStatusRegular),
    }
}

fn employment_status_column(v: EmploymentStatus) -> Option<FeatureColumn> {
    match v {
        EmploymentStatus::Freelancer => None,
        EmploymentStatus::Salaried => Some(FeatureColumn::EmploymentStatusSalaried),
        EmploymentStatus::SelfEmployed => Some(FeatureColumn::EmploymentStatusSelfEmployed),
    }
}

/// Encode one applicant.
///
/// Total over valid inputs: invalid categories cannot reach this point
/// because they fail to parse into the domain enums.
pub fn encode(input: &UserInput) -> FeatureRow {
    let mut row = FeatureRow::zeroed();

    row.set(FeatureColumn::Age, f64::from(input.age));
    row.set(FeatureColumn::NumberOfDependants, f64::from(input.number_of_dependants));
    row.set(FeatureColumn::IncomeLakhs, f64::from(input.income_lakhs));

    row.set(FeatureColumn::InsurancePlan, input.insurance_plan.ordinal());
    row.set(FeatureColumn::GeneticalRisk, input.genetical_risk.ordinal());

    let unknown = risk::unknown_tokens(&input.medical_history);
    if !unknown.is_empty() {
        log::warn!(
            "medical history '{}' has unweighted tokens {:?}; they score 0",
            input.medical_history,
            unknown
        );
    }
    row.set(FeatureColumn::NormalizedRiskScore, risk::normalize(&input.medical_history));

    let indicators = [
        gender_column(input.gender),
        region_column(input.region),
        marital_status_column(input.marital_status),
        bmi_category_column(input.bmi_category),
        smoking_status_column(input.smoking_status),
        employment_status_column(input.employment_status),
    ];
    for column in indicators.into_iter().flatten() {
        row.set(column, 1.0);
    }

    row
}
