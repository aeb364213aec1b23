//! Fixtures shared by unit tests.

use std::path::Path;

use crate::domain::{
    BmiCategory, EmploymentStatus, Gender, GeneticalRisk, InsurancePlan, MaritalStatus, Region,
    SmokingStatus, UserInput,
};
use crate::features::{FEATURE_COUNT, FeatureColumn};
use crate::io::artifacts::write_json;
use crate::models::{FittedTransform, ModelArtifact, Regressor, ScalerArtifact, Tree, TreeNode};
use crate::routing::{Router, Tier, TierBound};

/// The 22-year-old salaried applicant used throughout the tests.
pub(crate) fn reference_applicant() -> UserInput {
    UserInput {
        age: 22,
        gender: Gender::Male,
        region: Region::Northeast,
        marital_status: MaritalStatus::Unmarried,
        bmi_category: BmiCategory::Normal,
        smoking_status: SmokingStatus::NoSmoking,
        employment_status: EmploymentStatus::Salaried,
        income_lakhs: 10,
        medical_history: "No Disease".to_string(),
        insurance_plan: InsurancePlan::Silver,
        number_of_dependants: 0,
        genetical_risk: GeneticalRisk::NoRisk,
    }
}

fn names(cols: &[&str]) -> Vec<String> {
    cols.iter().map(|c| c.to_string()).collect()
}

fn linear_model(intercept: f64, weights: &[(FeatureColumn, f64)]) -> ModelArtifact {
    let mut coefficients = vec![0.0; FEATURE_COUNT];
    for (column, w) in weights {
        coefficients[column.index()] = *w;
    }
    ModelArtifact::for_schema(Regressor::Linear {
        intercept,
        coefficients,
    })
    .unwrap()
}

/// Tier with an identity scaler on `age` and a linear model.
pub(crate) fn linear_tier(
    name: &str,
    max_age: Option<u32>,
    intercept: f64,
    weights: &[(FeatureColumn, f64)],
) -> Tier {
    let scaler = ScalerArtifact::new(
        names(&["age"]),
        FittedTransform::Standard {
            mean: vec![0.0],
            scale: vec![1.0],
        },
    )
    .unwrap();
    Tier {
        bound: TierBound::new(name, max_age),
        scaler,
        model: linear_model(intercept, weights),
    }
}

pub(crate) fn constant_tier(name: &str, max_age: Option<u32>, value: f64) -> Tier {
    linear_tier(name, max_age, value, &[])
}

/// Young tier: min-max scaler (with the auxiliary `income_level` column) and a linear model.
pub(crate) fn young_artifacts() -> (ScalerArtifact, ModelArtifact) {
    let scaler = ScalerArtifact::new(
        names(&["age", "number_of_dependants", "income_level", "income_lakhs", "insurance_plan"]),
        FittedTransform::MinMax {
            data_min: vec![18.0, 0.0, 1.0, 1.0, 1.0],
            data_max: vec![25.0, 5.0, 4.0, 100.0, 3.0],
            feature_range: [0.0, 1.0],
        },
    )
    .unwrap();
    let model = linear_model(
        3000.0,
        &[
            (FeatureColumn::Age, 500.0),
            (FeatureColumn::NumberOfDependants, 200.0),
            (FeatureColumn::IncomeLakhs, 300.0),
            (FeatureColumn::InsurancePlan, 2000.0),
            (FeatureColumn::GeneticalRisk, 400.0),
            (FeatureColumn::NormalizedRiskScore, 1500.0),
            (FeatureColumn::GenderMale, 50.0),
            (FeatureColumn::SmokingStatusOccasional, 600.0),
            (FeatureColumn::SmokingStatusRegular, 1200.0),
        ],
    );
    (scaler, model)
}

/// Rest tier: standard scaler over a different column list and a tree ensemble.
pub(crate) fn rest_artifacts() -> (ScalerArtifact, ModelArtifact) {
    let scaler = ScalerArtifact::new(
        names(&["age", "number_of_dependants", "income_lakhs", "genetical_risk"]),
        FittedTransform::Standard {
            mean: vec![45.0, 2.0, 30.0, 1.0],
            scale: vec![15.0, 1.5, 25.0, 1.0],
        },
    )
    .unwrap();
    let trees = vec![
        Tree {
            nodes: vec![
                TreeNode::Split {
                    feature: FeatureColumn::NormalizedRiskScore.index(),
                    threshold: 0.4,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: 0.0 },
                TreeNode::Leaf { value: 2500.0 },
            ],
        },
        Tree {
            nodes: vec![
                TreeNode::Split {
                    feature: FeatureColumn::Age.index(),
                    threshold: 0.0,
                    left: 1,
                    right: 2,
                },
                TreeNode::Leaf { value: -500.0 },
                TreeNode::Leaf { value: 1500.0 },
            ],
        },
    ];
    let model = ModelArtifact::for_schema(Regressor::TreeEnsemble {
        base_score: 12000.0,
        trees,
    })
    .unwrap();
    (scaler, model)
}

pub(crate) fn reference_router() -> Router {
    let (young_scaler, young_model) = young_artifacts();
    let (rest_scaler, rest_model) = rest_artifacts();
    Router::new(vec![
        Tier {
            bound: TierBound::new("young", Some(25)),
            scaler: young_scaler,
            model: young_model,
        },
        Tier {
            bound: TierBound::new("rest", None),
            scaler: rest_scaler,
            model: rest_model,
        },
    ])
    .unwrap()
}

/// Persist the reference artifacts under their conventional file names.
pub(crate) fn write_reference_artifacts(dir: &Path) {
    let (young_scaler, young_model) = young_artifacts();
    let (rest_scaler, rest_model) = rest_artifacts();
    write_json(&dir.join("scaler_young.json"), &young_scaler).unwrap();
    write_json(&dir.join("model_young.json"), &young_model).unwrap();
    write_json(&dir.join("scaler_rest.json"), &rest_scaler).unwrap();
    write_json(&dir.join("model_rest.json"), &rest_model).unwrap();
}
