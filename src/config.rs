//! Runtime configuration.
//!
//! Values come from the environment (a `.env` file is honoured via `dotenvy`)
//! and can be overridden by CLI flags:
//!
//! - `PREMIUM_ARTIFACT_DIR`: directory holding the artifacts (default `artifacts`)
//! - `PREMIUM_YOUNG_MAX_AGE`: inclusive upper age of the young tier (default 25)

use std::path::{Path, PathBuf};

use crate::error::PredictError;
use crate::routing::{TierBound, YOUNG_MAX_AGE, validate_layout};

pub const ARTIFACT_DIR_ENV: &str = "PREMIUM_ARTIFACT_DIR";
pub const YOUNG_MAX_AGE_ENV: &str = "PREMIUM_YOUNG_MAX_AGE";
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";

/// Where the artifacts live and how they are tiered.
///
/// Each tier `name` reads `model_{name}.json` and `scaler_{name}.json` from `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactConfig {
    pub dir: PathBuf,
    pub tiers: Vec<TierBound>,
}

impl ArtifactConfig {
    /// Reference two-tier layout rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            tiers: TierBound::reference_layout(YOUNG_MAX_AGE),
        }
    }

    pub fn from_env() -> Result<Self, PredictError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, PredictError> {
        let dir = lookup(ARTIFACT_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ARTIFACT_DIR.to_string());

        let young_max_age = match lookup(YOUNG_MAX_AGE_ENV) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                PredictError::Config(format!("{YOUNG_MAX_AGE_ENV}='{raw}' is not an age: {e}"))
            })?,
            None => YOUNG_MAX_AGE,
        };

        let config = Self {
            dir: PathBuf::from(dir),
            tiers: TierBound::reference_layout(young_max_age),
        };
        validate_layout(&config.tiers)?;
        Ok(config)
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    pub fn model_path(&self, tier: &TierBound) -> PathBuf {
        artifact_path(&self.dir, "model", &tier.name)
    }

    pub fn scaler_path(&self, tier: &TierBound) -> PathBuf {
        artifact_path(&self.dir, "scaler", &tier.name)
    }
}

fn artifact_path(dir: &Path, kind: &str, tier: &str) -> PathBuf {
    dir.join(format!("{kind}_{tier}.json"))
}
