use crate::analysis::AnalysisError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, WorkflowError>;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("settings I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization failure: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("YAML serialization failure: {0}")]
    SerdeYaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}
