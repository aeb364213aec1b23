//! End-to-end prediction: encode → route → scale → model.
//!
//! `Predictor` owns the loaded tiers and is read-only once built, so a single
//! instance can serve any number of threads. The process-wide instance lives
//! behind [`init`]; [`predict`] is the entry point front ends call.

use std::sync::{Mutex, OnceLock};

use crate::config::ArtifactConfig;
use crate::domain::UserInput;
use crate::error::PredictError;
use crate::features::{self, FeatureRow};
use crate::io::artifacts::load_router;
use crate::routing::{Router, Tier};

/// A model output and the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub tier: String,
    /// Untruncated model output.
    pub value: f64,
}

impl Prediction {
    /// Whole-currency amount; the fractional part is discarded, not rounded.
    pub fn amount(&self) -> i64 {
        self.value.trunc() as i64
    }
}

/// Every intermediate of one prediction.
#[derive(Debug, Clone)]
pub struct Explanation {
    pub tier: String,
    pub scaled_columns: Vec<String>,
    pub encoded: FeatureRow,
    pub scaled: FeatureRow,
    pub unknown_tokens: Vec<String>,
    pub prediction: Prediction,
}

#[derive(Debug, Clone)]
pub struct Predictor {
    router: Router,
}

impl Predictor {
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Load every artifact named by `config`.
    pub fn load(config: &ArtifactConfig) -> Result<Self, PredictError> {
        Ok(Self::new(load_router(config)?))
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Tier serving `age`; the same tier supplies both scaler and model.
    pub fn tier_for(&self, age: u32) -> &Tier {
        self.router.route(age)
    }

    /// Scale `row` with the scaler of the tier `age` routes to.
    pub fn scale(&self, row: &FeatureRow, age: u32) -> FeatureRow {
        self.tier_for(age).scaler.apply(row)
    }

    pub fn predict(&self, input: &UserInput) -> Result<Prediction, PredictError> {
        let tier = self.tier_for(input.age);
        let scaled = tier.scaler.apply(&features::encode(input));
        evaluate(tier, &scaled)
    }

    pub fn explain(&self, input: &UserInput) -> Result<Explanation, PredictError> {
        let tier = self.tier_for(input.age);
        let encoded = features::encode(input);
        let scaled = tier.scaler.apply(&encoded);
        let prediction = evaluate(tier, &scaled)?;
        Ok(Explanation {
            tier: tier.name().to_string(),
            scaled_columns: tier.scaler.cols_to_scale().to_vec(),
            encoded,
            scaled,
            unknown_tokens: features::risk::unknown_tokens(&input.medical_history),
            prediction,
        })
    }
}

fn evaluate(tier: &Tier, row: &FeatureRow) -> Result<Prediction, PredictError> {
    let value = tier.model.predict(row);
    if !value.is_finite() {
        return Err(PredictError::NonFinite {
            tier: tier.name().to_string(),
        });
    }
    Ok(Prediction {
        tier: tier.name().to_string(),
        value,
    })
}

static PREDICTOR: OnceLock<Predictor> = OnceLock::new();
static LOAD_LOCK: Mutex<()> = Mutex::new(());

/// Load the process-wide predictor.
///
/// Artifacts are read at most once per process; later calls return the
/// already-loaded instance and ignore `config`. A failed load leaves the
/// predictor uninitialised.
pub fn init(config: &ArtifactConfig) -> Result<&'static Predictor, PredictError> {
    if let Some(p) = PREDICTOR.get() {
        return Ok(p);
    }
    let _guard = LOAD_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(p) = PREDICTOR.get() {
        return Ok(p);
    }
    log::info!("loading artifacts from {}", config.dir.display());
    let loaded = Predictor::load(config)?;
    Ok(PREDICTOR.get_or_init(|| loaded))
}

pub fn global() -> Result<&'static Predictor, PredictError> {
    PREDICTOR.get().ok_or(PredictError::NotInitialized)
}

/// Predict with the process-wide predictor.
pub fn predict(input: &UserInput) -> Result<Prediction, PredictError> {
    global()?.predict(input)
}
