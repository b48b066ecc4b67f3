use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;

use crate::formats::write_atomic;
use crate::model::{Point, Raster};

use super::csv::{format_rows, parse_rows};
use super::{AnnotationError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    /// No file yet: the usual first run.
    Missing,
}

/// Ordered set of clicked points. Identity is positional: removing a point
/// shifts the indices of every later one.
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    points: Vec<Point>,
    intensity_source: Option<Arc<Raster>>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that resolves missing intensities from `raster`.
    pub fn with_intensity_source(raster: Arc<Raster>) -> Self {
        Self {
            points: Vec::new(),
            intensity_source: Some(raster),
        }
    }

    pub fn intensity_source(&self) -> Option<&Raster> {
        self.intensity_source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Appends a point. Without an explicit sample the intensity is read from
    /// the registered raster under the rounded coordinate.
    pub fn add(&mut self, x: f64, y: f64, intensity: Option<f64>) -> Point {
        let intensity = intensity.or_else(|| self.resolve_intensity(x, y));
        let point = Point { x, y, intensity };
        self.points.push(point);
        point
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Point> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn remove_last(&mut self) -> Option<Point> {
        self.points.pop()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Replaces the set with the rows of `path`. A missing file leaves the
    /// store empty and is not an error; on any error the store is emptied.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let path = path.as_ref();
        self.points.clear();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                log::warn!("no annotation file {}, starting empty", path.display());
                return Ok(LoadOutcome::Missing);
            }
            Err(error) => return Err(error.into()),
        };
        let mut points = parse_rows(&text)?;
        for point in &mut points {
            if point.intensity.is_none() {
                point.intensity = self.resolve_intensity(point.x, point.y);
            }
        }
        let count = points.len();
        self.points = points;
        log::info!("loaded {count} points from {}", path.display());
        Ok(LoadOutcome::Loaded(count))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        write_atomic(path, format_rows(&self.points).as_bytes())?;
        log::info!("saved {} points to {}", self.points.len(), path.display());
        Ok(())
    }

    pub fn coordinates(&self) -> Result<Vec<(i64, i64)>> {
        if self.points.is_empty() {
            return Err(AnnotationError::EmptySet);
        }
        Ok(self.points.iter().map(Point::rounded).collect())
    }

    pub fn intensities(&self) -> Result<Vec<f64>> {
        if self.points.is_empty() {
            return Err(AnnotationError::EmptySet);
        }
        self.points
            .iter()
            .enumerate()
            .map(|(index, point)| {
                point
                    .intensity
                    .ok_or(AnnotationError::MissingIntensity { index })
            })
            .collect()
    }

    fn resolve_intensity(&self, x: f64, y: f64) -> Option<f64> {
        self.intensity_source
            .as_ref()
            .and_then(|raster| raster.sample(x, y))
    }
}
