mod analysis_service;
mod context;
mod error;
mod io_service;

pub use analysis_service::AnalysisService;
pub use context::AppContext;
pub use error::{AppError, Result};
pub use io_service::{ImagePair, IoService};
