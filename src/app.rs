//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and resolves configuration
//! - loads the artifacts once
//! - runs predictions and prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{ApplicantArgs, BatchArgs, Cli, Command, PredictArgs};
use crate::config::ArtifactConfig;
use crate::error::AppError;
use crate::predictor::{self, Predictor};

pub mod pipeline;

/// Entry point for the `premium` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schema => {
            print!("{}", crate::report::format_schema());
            Ok(())
        }
        Command::Predict(args) => handle_predict(load(cli.artifacts)?, args),
        Command::Explain(args) => handle_explain(load(cli.artifacts)?, args),
        Command::Batch(args) => handle_batch(load(cli.artifacts)?, args),
    }
}

fn resolve_config(artifacts: Option<std::path::PathBuf>) -> Result<ArtifactConfig, AppError> {
    let config = ArtifactConfig::from_env()?;
    Ok(match artifacts {
        Some(dir) => config.with_dir(dir),
        None => config,
    })
}

/// Load every artifact before serving anything.
fn load(artifacts: Option<std::path::PathBuf>) -> Result<&'static Predictor, AppError> {
    let config = resolve_config(artifacts)?;
    Ok(predictor::init(&config)?)
}

fn handle_predict(predictor: &Predictor, args: PredictArgs) -> Result<(), AppError> {
    let input = args.applicant.resolve()?;
    let prediction = predictor.predict(&input)?;
    println!("{}", crate::report::format_prediction(&prediction, args.precise));
    Ok(())
}

fn handle_explain(predictor: &Predictor, args: ApplicantArgs) -> Result<(), AppError> {
    let input = args.resolve()?;
    let explanation = predictor.explain(&input)?;
    print!("{}", crate::report::format_explanation(&explanation, false));
    Ok(())
}

fn handle_batch(predictor: &Predictor, args: BatchArgs) -> Result<(), AppError> {
    let ingested = crate::io::ingest::load_applicants_csv(&args.input)?;
    if ingested.rows_read == 0 {
        return Err(AppError::new(3, format!("No applicant rows in '{}'.", args.input.display())));
    }

    let output = pipeline::run_batch(predictor, ingested);
    print!("{}", crate::report::format_batch(&output, args.precise));

    if let Some(path) = &args.export {
        crate::io::export::write_predictions_csv(path, &output.predictions)?;
        log::info!("wrote {} predictions to {}", output.predictions.len(), path.display());
    }

    if output.predictions.is_empty() {
        return Err(AppError::new(3, "No applicant could be predicted."));
    }
    Ok(())
}
