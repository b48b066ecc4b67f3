use crate::annotations::AnnotationError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("fit is undefined: {0}")]
    DegenerateFit(String),

    #[error(transparent)]
    Annotations(#[from] AnnotationError),
}
