use std::path::Path;
use std::sync::Arc;

use crate::annotations::{AnnotationStore, LoadOutcome};
use crate::formats::read_raster;
use crate::model::{Extent, Raster};

use super::Result;

/// The localisation channel and, in the dual-channel workflow, the
/// registered channel intensities are measured in.
#[derive(Debug, Clone)]
pub struct ImagePair {
    pub primary: Arc<Raster>,
    pub intensity: Option<Arc<Raster>>,
}

impl ImagePair {
    pub fn extent(&self) -> Extent {
        self.primary.extent()
    }

    pub fn is_dual(&self) -> bool {
        self.intensity.is_some()
    }

    /// Raster point intensities are sampled from.
    pub fn intensity_source(&self) -> Arc<Raster> {
        Arc::clone(self.intensity.as_ref().unwrap_or(&self.primary))
    }

    pub fn empty_store(&self) -> AnnotationStore {
        AnnotationStore::with_intensity_source(self.intensity_source())
    }

    pub fn label(&self) -> Option<String> {
        self.primary
            .source
            .as_ref()
            .map(|path| path.display().to_string())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IoService;

impl IoService {
    pub fn read_raster(&self, path: impl AsRef<Path>) -> Result<Raster> {
        Ok(read_raster(path)?)
    }

    pub fn read_pair(&self, primary: &Path, intensity: Option<&Path>) -> Result<ImagePair> {
        let primary = self.read_raster(primary)?;
        let intensity = match intensity {
            Some(path) => {
                let raster = self.read_raster(path)?;
                primary.check_registered(&raster)?;
                Some(Arc::new(raster))
            }
            None => None,
        };
        Ok(ImagePair {
            primary: Arc::new(primary),
            intensity,
        })
    }

    /// Loads prior annotations, recovering from a missing or unreadable file
    /// with an empty store. Returns a message to show the user when that
    /// happened.
    pub fn load_annotations(&self, store: &mut AnnotationStore, path: &Path) -> Option<String> {
        match store.load(path) {
            Ok(LoadOutcome::Loaded(_)) => None,
            Ok(LoadOutcome::Missing) => Some(format!(
                "No init file {}, continuing without points",
                path.display()
            )),
            Err(error) => {
                log::warn!("ignoring {}: {error}", path.display());
                Some(format!(
                    "Could not load {}: {error}; continuing without points",
                    path.display()
                ))
            }
        }
    }
}
