use std::path::PathBuf;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{CoreError, PixelType, Result, round_half_even};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extent {
    pub width: usize,
    pub height: usize,
}

impl Extent {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        let (column, row) = (round_half_even(x), round_half_even(y));
        column >= 0 && row >= 0 && (column as usize) < self.width && (row as usize) < self.height
    }
}

/// Single-channel image in native pixel units, indexed `[row, column]`.
#[derive(Debug, Clone)]
pub struct Raster {
    pub data: Array2<f32>,
    pub pixel_type: PixelType,
    pub source: Option<PathBuf>,
}

impl Raster {
    pub fn new(data: Array2<f32>, pixel_type: PixelType) -> Result<Self> {
        let (height, width) = data.dim();
        if height == 0 || width == 0 {
            return Err(CoreError::EmptyRaster { height, width });
        }
        Ok(Self {
            data,
            pixel_type,
            source: None,
        })
    }

    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn extent(&self) -> Extent {
        let (height, width) = self.data.dim();
        Extent { width, height }
    }

    /// Reads the pixel under `(x, y)` after rounding; `None` outside the image.
    pub fn sample(&self, x: f64, y: f64) -> Option<f64> {
        if !self.extent().contains(x, y) {
            return None;
        }
        let column = round_half_even(x) as usize;
        let row = round_half_even(y) as usize;
        Some(f64::from(self.data[[row, column]]))
    }

    /// Smallest and largest finite sample, `None` when there is none.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        value_range(self.data.iter().map(|value| f64::from(*value)))
    }

    pub fn as_f64(&self) -> Array2<f64> {
        self.data.mapv(f64::from)
    }

    /// Ensures another raster can be used pixel-for-pixel alongside this one.
    pub fn check_registered(&self, other: &Raster) -> Result<()> {
        let expected = self.data.dim();
        let found = other.data.dim();
        if expected != found {
            return Err(CoreError::ShapeMismatch { expected, found });
        }
        Ok(())
    }
}

/// Smallest and largest finite value of `values`; non-finite values are
/// skipped. `None` when nothing finite is left.
pub fn value_range(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |range, value| match range {
            None => Some((value, value)),
            Some((min, max)) => Some((f64::min(min, value), f64::max(max, value))),
        })
}
