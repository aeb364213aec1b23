//! Pre-fitted column scalers.
//!
//! A scaler artifact pairs a fitted transform with the ordered list of column
//! names it was fitted on. Applying it:
//!
//! - gathers those columns from the row into one vector (in the scaler's order)
//! - runs the fitted transform on the vector
//! - writes the results back to the same columns
//!
//! Columns not named by the scaler pass through untouched. A scaler may name
//! columns outside the model schema (the reference artifacts were fitted with
//! an extra `income_level` column); those are fed as 0 and their output is
//! dropped.

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::features::{FeatureColumn, FeatureRow};

fn unit_range() -> [f64; 2] {
    [0.0, 1.0]
}

/// Fitted parameters of a column-wise transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FittedTransform {
    /// `x' = (x - min) / (max - min) * (hi - lo) + lo`.
    MinMax {
        data_min: Vec<f64>,
        data_max: Vec<f64>,
        #[serde(default = "unit_range")]
        feature_range: [f64; 2],
    },
    /// `x' = (x - mean) / scale`.
    Standard { mean: Vec<f64>, scale: Vec<f64> },
}

impl FittedTransform {
    /// Number of columns the transform was fitted on.
    pub fn width(&self) -> usize {
        match self {
            FittedTransform::MinMax { data_min, .. } => data_min.len(),
            FittedTransform::Standard { mean, .. } => mean.len(),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let (a, b, names) = match self {
            FittedTransform::MinMax { data_min, data_max, feature_range } => {
                if !(feature_range[0].is_finite() && feature_range[1].is_finite())
                    || feature_range[0] >= feature_range[1]
                {
                    return Err(format!("invalid feature_range {feature_range:?}"));
                }
                (data_min, data_max, ("data_min", "data_max"))
            }
            FittedTransform::Standard { mean, scale } => (mean, scale, ("mean", "scale")),
        };
        if a.len() != b.len() {
            return Err(format!(
                "{} has {} entries but {} has {}",
                names.0,
                a.len(),
                names.1,
                b.len()
            ));
        }
        if !a.iter().chain(b.iter()).all(|v| v.is_finite()) {
            return Err("fitted parameters must be finite".to_string());
        }
        Ok(())
    }

    /// Apply the transform to a vector laid out in fitted-column order.
    ///
    /// Zero ranges and zero scales are treated as 1, so constant training
    /// columns map to a shift only.
    pub fn transform(&self, x: &DVector<f64>) -> DVector<f64> {
        match self {
            FittedTransform::MinMax { data_min, data_max, feature_range } => {
                let min = DVector::from_column_slice(data_min);
                let range = DVector::from_iterator(
                    data_min.len(),
                    data_min.iter().zip(data_max).map(|(lo, hi)| non_zero(hi - lo)),
                );
                let [lo, hi] = *feature_range;
                ((x - min).component_div(&range) * (hi - lo)).add_scalar(lo)
            }
            FittedTransform::Standard { mean, scale } => {
                let mean = DVector::from_column_slice(mean);
                let scale = DVector::from_iterator(scale.len(), scale.iter().map(|s| non_zero(*s)));
                (x - mean).component_div(&scale)
            }
        }
    }
}

fn non_zero(v: f64) -> f64 {
    if v == 0.0 { 1.0 } else { v }
}

#[derive(Debug, Clone, Deserialize)]
struct RawScaler {
    cols_to_scale: Vec<String>,
    scaler: FittedTransform,
}

/// A fitted transform bound to the columns it scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScaler")]
pub struct ScalerArtifact {
    cols_to_scale: Vec<String>,
    scaler: FittedTransform,
    /// Resolved target per entry of `cols_to_scale`; `None` for auxiliary columns.
    #[serde(skip)]
    targets: Vec<Option<FeatureColumn>>,
}

impl TryFrom<RawScaler> for ScalerArtifact {
    type Error = String;

    fn try_from(raw: RawScaler) -> Result<Self, Self::Error> {
        ScalerArtifact::new(raw.cols_to_scale, raw.scaler)
    }
}

impl ScalerArtifact {
    pub fn new(cols_to_scale: Vec<String>, scaler: FittedTransform) -> Result<Self, String> {
        scaler.validate()?;
        if cols_to_scale.is_empty() {
            return Err("cols_to_scale is empty".to_string());
        }
        if cols_to_scale.len() != scaler.width() {
            return Err(format!(
                "cols_to_scale lists {} columns but the scaler was fitted on {}",
                cols_to_scale.len(),
                scaler.width()
            ));
        }
        let mut targets = Vec::with_capacity(cols_to_scale.len());
        for name in &cols_to_scale {
            let target = FeatureColumn::from_name(name);
            if let Some(col) = target {
                if targets.contains(&Some(col)) {
                    return Err(format!("column '{name}' listed twice in cols_to_scale"));
                }
            }
            targets.push(target);
        }
        if targets.iter().all(Option::is_none) {
            return Err("cols_to_scale names no model column".to_string());
        }
        Ok(Self {
            cols_to_scale,
            scaler,
            targets,
        })
    }

    pub fn cols_to_scale(&self) -> &[String] {
        &self.cols_to_scale
    }

    pub fn transform(&self) -> &FittedTransform {
        &self.scaler
    }

    /// Schema columns this scaler rewrites.
    pub fn scaled_columns(&self) -> impl Iterator<Item = FeatureColumn> + '_ {
        self.targets.iter().flatten().copied()
    }

    /// Scale the listed columns of `row`; every other column is copied as is.
    pub fn apply(&self, row: &FeatureRow) -> FeatureRow {
        let input = DVector::from_iterator(
            self.targets.len(),
            self.targets.iter().map(|t| t.map_or(0.0, |c| row.get(c))),
        );
        let output = self.scaler.transform(&input);

        let mut scaled = *row;
        for (target, value) in self.targets.iter().zip(output.iter()) {
            if let Some(col) = target {
                scaled.set(*col, *value);
            }
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn min_max_scales_only_listed_columns() {
        let scaler = ScalerArtifact::new(
            names(&["age", "income_lakhs"]),
            FittedTransform::MinMax {
                data_min: vec![18.0, 0.0],
                data_max: vec![25.0, 100.0],
                feature_range: [0.0, 1.0],
            },
        )
        .unwrap();

        let mut row = FeatureRow::zeroed();
        row.set(FeatureColumn::Age, 22.0);
        row.set(FeatureColumn::IncomeLakhs, 10.0);
        row.set(FeatureColumn::InsurancePlan, 2.0);

        let scaled = scaler.apply(&row);
        assert!((scaled.get(FeatureColumn::Age) - 4.0 / 7.0).abs() < 1e-12);
        assert!((scaled.get(FeatureColumn::IncomeLakhs) - 0.1).abs() < 1e-12);
        assert_eq!(scaled.get(FeatureColumn::InsurancePlan), 2.0);
        // Input row is left as it was.
        assert_eq!(row.get(FeatureColumn::Age), 22.0);
    }

    #[test]
    fn auxiliary_columns_are_fed_zero_and_dropped() {
        let scaler = ScalerArtifact::new(
            names(&["age", "income_level", "income_lakhs"]),
            FittedTransform::Standard {
                mean: vec![40.0, 2.0, 20.0],
                scale: vec![10.0, 1.0, 5.0],
            },
        )
        .unwrap();

        let mut row = FeatureRow::zeroed();
        row.set(FeatureColumn::Age, 50.0);
        row.set(FeatureColumn::IncomeLakhs, 30.0);

        let scaled = scaler.apply(&row);
        assert!((scaled.get(FeatureColumn::Age) - 1.0).abs() < 1e-12);
        assert!((scaled.get(FeatureColumn::IncomeLakhs) - 2.0).abs() < 1e-12);
        assert_eq!(
            scaler.scaled_columns().collect::<Vec<_>>(),
            vec![FeatureColumn::Age, FeatureColumn::IncomeLakhs]
        );
    }

    #[test]
    fn zero_range_is_treated_as_one() {
        let t = FittedTransform::MinMax {
            data_min: vec![3.0],
            data_max: vec![3.0],
            feature_range: [0.0, 1.0],
        };
        let out = t.transform(&DVector::from_vec(vec![5.0]));
        assert_eq!(out[0], 2.0);
    }

    #[test]
    fn custom_feature_range() {
        let t = FittedTransform::MinMax {
            data_min: vec![0.0],
            data_max: vec![10.0],
            feature_range: [-1.0, 1.0],
        };
        let out = t.transform(&DVector::from_vec(vec![5.0]));
        assert!(out[0].abs() < 1e-12);
    }

    #[test]
    fn rejects_inconsistent_artifacts() {
        let err = ScalerArtifact::new(
            names(&["age"]),
            FittedTransform::Standard { mean: vec![1.0, 2.0], scale: vec![1.0, 1.0] },
        )
        .unwrap_err();
        assert!(err.contains("fitted on 2"));

        let err = ScalerArtifact::new(
            names(&["age", "age"]),
            FittedTransform::Standard { mean: vec![1.0, 2.0], scale: vec![1.0, 1.0] },
        )
        .unwrap_err();
        assert!(err.contains("twice"));

        let err = ScalerArtifact::new(
            names(&["income_level"]),
            FittedTransform::Standard { mean: vec![1.0], scale: vec![1.0] },
        )
        .unwrap_err();
        assert!(err.contains("no model column"));
    }

    #[test]
    fn reads_scaler_json() {
        let json = r#"{
            "cols_to_scale": ["age", "number_of_dependants", "income_level", "income_lakhs", "insurance_plan"],
            "scaler": {
                "kind": "min_max",
                "data_min": [18, 0, 1, 1, 1],
                "data_max": [25, 5, 4, 100, 3]
            }
        }"#;
        let scaler: ScalerArtifact = serde_json::from_str(json).unwrap();
        assert_eq!(scaler.cols_to_scale().len(), 5);
        assert_eq!(scaler.scaled_columns().count(), 4);

        let bad = r#"{ "cols_to_scale": ["age"], "scaler": { "kind": "min_max", "data_min": [1, 2], "data_max": [3, 4] } }"#;
        assert!(serde_json::from_str::<ScalerArtifact>(bad).is_err());
    }
}
