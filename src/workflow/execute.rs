use std::time::Instant;

use crate::analysis::{AnalysisError, DensitySampler, LinearFit, pearson};
use crate::annotations::AnnotationStore;
use crate::config::Settings;
use crate::model::Extent;

use super::{AnalysisOutput, AnalysisReport, Result};

/// Samples density and intensity for every stored point and correlates them.
/// An undefined correlation is recorded in the report, not returned as an error.
pub fn run_analysis(
    settings: &Settings,
    store: &AnnotationStore,
    extent: Option<Extent>,
    image: Option<String>,
) -> Result<AnalysisOutput> {
    settings.validate()?;
    let started = Instant::now();
    let sampling = DensitySampler::from_settings(settings).compute(store, settings.radius, extent)?;

    let (correlation, fit, fit_error) =
        match correlate(&sampling.densities, &sampling.intensities) {
            Ok((coefficient, fit)) => (Some(coefficient), Some(fit), None),
            Err(error) => {
                log::warn!("no correlation for this run: {error}");
                (None, None, Some(error.to_string()))
            }
        };

    let report = AnalysisReport {
        image,
        radius: settings.radius,
        count: sampling.len(),
        correlation,
        fit,
        fit_error,
        records: sampling.records(),
    };
    log::info!(
        "{} in {} ms",
        report.title(),
        started.elapsed().as_millis()
    );
    Ok(AnalysisOutput { report, sampling })
}

fn correlate(xs: &[f64], ys: &[f64]) -> std::result::Result<(f64, LinearFit), AnalysisError> {
    Ok((pearson(xs, ys)?, LinearFit::fit(xs, ys)?))
}
