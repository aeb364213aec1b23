use std::path::PathBuf;

/// Errors produced by the prediction core.
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    /// A categorical answer outside its closed set of labels.
    #[error("unrecognized {field} '{value}'")]
    UnrecognizedCategory { field: &'static str, value: String },

    /// A persisted artifact is missing, unreadable or inconsistent.
    #[error("artifact '{}': {message}", path.display())]
    Artifact { path: PathBuf, message: String },

    #[error("invalid routing table: {0}")]
    Routing(String),

    #[error("{tier} model produced a non-finite prediction")]
    NonFinite { tier: String },

    #[error("predictor not initialised; artifacts must be loaded before predicting")]
    NotInitialized,

    #[error("configuration: {0}")]
    Config(String),
}

impl PredictError {
    pub(crate) fn artifact(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PredictError::Artifact {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Process exit code used when this error reaches `main`.
    pub fn exit_code(&self) -> u8 {
        match self {
            PredictError::UnrecognizedCategory { .. } => 3,
            PredictError::Artifact { .. } | PredictError::Config(_) | PredictError::Routing(_) => 2,
            PredictError::NonFinite { .. } | PredictError::NotInitialized => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<PredictError> for AppError {
    fn from(err: PredictError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
