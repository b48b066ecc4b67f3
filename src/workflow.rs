mod error;
mod execute;
mod io;
mod report;

#[cfg(test)]
mod tests;

pub use error::{Result, WorkflowError};
pub use execute::run_analysis;
pub use io::{load_settings, save_records, save_report};
pub use report::{AnalysisOutput, AnalysisReport};
