use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnnotationError>;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("no annotated points; add at least one point first")]
    EmptySet,

    #[error("point {index} has no intensity sample")]
    MissingIntensity { index: usize },

    #[error("malformed annotation file at line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("annotation file I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
