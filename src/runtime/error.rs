use crate::analysis::AnalysisError;
use crate::annotations::AnnotationError;
use crate::formats::IoError;
use crate::model::CoreError;
use crate::session::SessionError;
use crate::workflow::WorkflowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("raster error: {0}")]
    Core(#[from] CoreError),

    #[error("image I/O error: {0}")]
    Io(#[from] IoError),

    #[error("annotation error: {0}")]
    Annotations(#[from] AnnotationError),

    #[error("analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("analysis run error: {0}")]
    Workflow(#[from] WorkflowError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("window error: {0}")]
    Ui(#[from] eframe::Error),

    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),
}
