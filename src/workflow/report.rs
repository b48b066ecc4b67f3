use serde::{Deserialize, Serialize};

use crate::analysis::{LinearFit, Sampling};
use crate::model::SampleRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub image: Option<String>,
    pub radius: f64,
    pub count: usize,
    pub correlation: Option<f64>,
    pub fit: Option<LinearFit>,
    /// Why no correlation/fit could be computed, when that happened.
    pub fit_error: Option<String>,
    pub records: Vec<SampleRecord>,
}

impl AnalysisReport {
    pub fn title(&self) -> String {
        match self.correlation {
            Some(coefficient) => format!("Corr. coeff: {coefficient:.3} (n={})", self.count),
            None => format!("Corr. coeff: n/a (n={})", self.count),
        }
    }
}

/// A finished analysis pass: the report plus the field it was sampled from.
#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub report: AnalysisReport,
    pub sampling: Sampling,
}
