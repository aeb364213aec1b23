//! Read/write artifact JSON files.
//!
//! Artifacts are validated while they are deserialized (schema match, vector
//! lengths, tree shape), so anything returned from here is ready to serve.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ArtifactConfig;
use crate::error::PredictError;
use crate::models::{ModelArtifact, ScalerArtifact};
use crate::routing::{Router, Tier};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, PredictError> {
    let file = File::open(path).map_err(|e| PredictError::artifact(path, format!("failed to open: {e}")))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| PredictError::artifact(path, format!("invalid artifact JSON: {e}")))
}

/// Write an artifact as pretty JSON.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PredictError> {
    let file = File::create(path).map_err(|e| PredictError::artifact(path, format!("failed to create: {e}")))?;
    serde_json::to_writer_pretty(file, value)
        .map_err(|e| PredictError::artifact(path, format!("failed to write: {e}")))
}

pub fn read_model(path: &Path) -> Result<ModelArtifact, PredictError> {
    let model: ModelArtifact = read_json(path)?;
    log::info!("loaded {} model from {}", model.regressor().family(), path.display());
    Ok(model)
}

pub fn read_scaler(path: &Path) -> Result<ScalerArtifact, PredictError> {
    let scaler: ScalerArtifact = read_json(path)?;
    log::info!(
        "loaded scaler from {} ({} columns)",
        path.display(),
        scaler.cols_to_scale().len()
    );
    for name in scaler.cols_to_scale() {
        if crate::features::FeatureColumn::from_name(name).is_none() {
            log::debug!("scaler column '{name}' is not a model feature; it is fed as 0");
        }
    }
    Ok(scaler)
}

/// Load every tier's scaler and model. Any failure aborts the whole load.
pub fn load_router(config: &ArtifactConfig) -> Result<Router, PredictError> {
    let mut tiers = Vec::with_capacity(config.tiers.len());
    for bound in &config.tiers {
        let scaler = read_scaler(&config.scaler_path(bound))?;
        let model = read_model(&config.model_path(bound))?;
        tiers.push(Tier {
            bound: bound.clone(),
            scaler,
            model,
        });
    }
    Router::new(tiers)
}
