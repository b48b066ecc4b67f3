use crate::analysis::{Histogram, ReducedGrid, reduce_mean, threshold_mask};
use crate::annotations::AnnotationStore;
use crate::config::Settings;
use crate::formats::{OutputPaths, write_density_png};
use crate::model::Raster;
use crate::workflow::{AnalysisOutput, run_analysis, save_records};

use super::{ImagePair, Result};

#[derive(Debug, Clone)]
pub struct AnalysisService {
    settings: Settings,
}

impl AnalysisService {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn analyze(&self, store: &AnnotationStore, images: &ImagePair) -> Result<AnalysisOutput> {
        Ok(run_analysis(
            &self.settings,
            store,
            Some(images.extent()),
            images.label(),
        )?)
    }

    /// Writes the per-point samples and the rendered density map.
    pub fn write_outputs(
        &self,
        output: &AnalysisOutput,
        store: &AnnotationStore,
        paths: &OutputPaths,
    ) -> Result<()> {
        save_records(&paths.samples, &output.report.records)?;
        write_density_png(
            &paths.screenshot,
            &output.sampling.field,
            store.points(),
            &self.settings.point_style(),
        )?;
        log::info!(
            "wrote {} and {}",
            paths.samples.display(),
            paths.screenshot.display()
        );
        Ok(())
    }

    pub fn reduce(&self, raster: &Raster) -> Result<ReducedGrid> {
        Ok(reduce_mean(raster.as_f64().view(), self.settings.window)?)
    }

    pub fn histogram(&self, grid: &ReducedGrid) -> Result<Histogram> {
        Ok(Histogram::new(grid.iter(), self.settings.histogram_bins)?)
    }

    /// Mask as a 0/1 grid, for writing to disk.
    pub fn mask_grid(&self, grid: &ReducedGrid, threshold: f64) -> ReducedGrid {
        threshold_mask(grid, threshold).mapv(|flag| if flag { 1.0 } else { 0.0 })
    }
}
