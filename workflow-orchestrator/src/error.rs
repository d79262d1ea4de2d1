use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while preparing a run
///
/// A run itself never fails; these cover loading and validating plans.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("failed to read plan {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid plan: {0}")]
    InvalidPlan(String),
}

pub type Result<T> = std::result::Result<T, OrchestratorError>;
