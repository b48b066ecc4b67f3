use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::analysis::{AnalysisError, Result};

#[cfg(test)]
mod tests;

/// How annotated points are drawn, both on screen and in rendered files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointStyle {
    pub size: f32,
    pub color: [u8; 3],
}

/// Tool settings. Loaded once and passed explicitly to every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Density search radius, in pixels.
    pub radius: f64,
    /// Block size of the windowed mean reducer.
    pub window: usize,
    /// Density sample grid as `[columns, rows]`.
    pub density_dims: [usize; 2],
    pub histogram_bins: usize,
    pub point_size: f32,
    pub point_color: [u8; 3],
    /// Marker hit radius in screen pixels.
    pub pick_tolerance: f32,
    pub autosave_path: PathBuf,
    pub data_suffix: String,
    pub samples_suffix: String,
    pub screenshot_suffix: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            radius: 100.0,
            window: 25,
            density_dims: [40, 40],
            histogram_bins: 30,
            point_size: 8.0,
            point_color: [220, 30, 30],
            pick_tolerance: 6.0,
            autosave_path: PathBuf::from(".tmp.csv"),
            data_suffix: "_data.csv".to_string(),
            samples_suffix: "_samples.csv".to_string(),
            screenshot_suffix: "_screenshot.png".to_string(),
        }
    }
}

impl Settings {
    pub fn point_style(&self) -> PointStyle {
        PointStyle {
            size: self.point_size,
            color: self.point_color,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "`radius` must be a positive number, got {}",
                self.radius
            )));
        }
        if self.window == 0 {
            return Err(AnalysisError::InvalidParameter(
                "`window` must be a positive integer".to_string(),
            ));
        }
        if self.density_dims.iter().any(|size| *size < 2) {
            return Err(AnalysisError::InvalidParameter(format!(
                "`density_dims` needs at least 2 samples per axis, got {:?}",
                self.density_dims
            )));
        }
        if self.histogram_bins == 0 {
            return Err(AnalysisError::InvalidParameter(
                "`histogram_bins` must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
