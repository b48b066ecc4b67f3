use rayon::prelude::*;

use crate::annotations::AnnotationStore;
use crate::config::Settings;
use crate::model::{Extent, SampleRecord};

use super::{DensityField, Result};

/// Per-point density and intensity for one analysis pass, aligned with the
/// store's insertion order.
#[derive(Debug, Clone)]
pub struct Sampling {
    pub coordinates: Vec<(i64, i64)>,
    pub densities: Vec<f64>,
    pub intensities: Vec<f64>,
    pub field: DensityField,
}

impl Sampling {
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn records(&self) -> Vec<SampleRecord> {
        self.coordinates
            .iter()
            .zip(&self.densities)
            .zip(&self.intensities)
            .map(|(((x, y), density), intensity)| SampleRecord {
                x: *x,
                y: *y,
                density: *density,
                intensity: *intensity,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DensitySampler {
    dims: [usize; 2],
}

impl Default for DensitySampler {
    fn default() -> Self {
        Self { dims: [40, 40] }
    }
}

impl DensitySampler {
    pub fn new(dims: [usize; 2]) -> Self {
        Self { dims }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.density_dims)
    }

    /// Estimates the density of the stored points and probes it at each of
    /// them. Intensities come from the store, which captured them on add.
    pub fn compute(
        &self,
        store: &AnnotationStore,
        radius: f64,
        extent: Option<Extent>,
    ) -> Result<Sampling> {
        let coordinates = store.coordinates()?;
        let positions = coordinates
            .iter()
            .map(|(x, y)| (*x as f64, *y as f64))
            .collect::<Vec<_>>();
        let field = DensityField::estimate(&positions, radius, self.dims, extent)?;
        let densities = positions
            .par_iter()
            .map(|(x, y)| field.probe(*x, *y))
            .collect::<Vec<_>>();
        let intensities = store.intensities()?;
        log::info!(
            "sampled {} points, peak density {:.0} within r={radius}",
            coordinates.len(),
            field.max()
        );
        Ok(Sampling {
            coordinates,
            densities,
            intensities,
            field,
        })
    }
}
