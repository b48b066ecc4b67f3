use std::path::Path;

use ndarray::Array2;

use crate::analysis::DensityField;
use crate::config::PointStyle;
use crate::model::{Point, Raster};

use super::raster::{encode_grey_png, read_common_raster, render_density};
use super::tiff::{encode_tiff, read_tiff};
use super::util::{extension, grid_to_csv, write_atomic};
use super::{IoError, Result};

/// Loads an image as a single-channel raster in native pixel units.
pub fn read_raster(path: impl AsRef<Path>) -> Result<Raster> {
    let path = path.as_ref();
    let extension = extension(path)?;
    let raster = match extension.as_str() {
        "png" | "jpg" | "jpeg" => read_common_raster(path)?,
        "tif" | "tiff" => read_tiff(path)?,
        other => return Err(IoError::UnknownExtension(other.to_string())),
    };
    log::debug!(
        "loaded raster {} ({}x{}, {:?})",
        path.display(),
        raster.extent().width,
        raster.extent().height,
        raster.pixel_type
    );
    Ok(raster.with_source(path))
}

/// Writes a 2D grid as CSV, a min-max scaled grey PNG or a float TIFF.
pub fn write_grid(path: impl AsRef<Path>, grid: &Array2<f64>) -> Result<()> {
    let path = path.as_ref();
    let extension = extension(path)?;
    let bytes = match extension.as_str() {
        "csv" => grid_to_csv(grid).into_bytes(),
        "png" => encode_grey_png(grid)?,
        "tif" | "tiff" => encode_tiff(grid)?,
        other => return Err(IoError::UnknownExtension(other.to_string())),
    };
    write_atomic(path, &bytes)?;
    Ok(())
}

/// Renders the density field with the annotated points on top, as a PNG.
pub fn write_density_png(
    path: impl AsRef<Path>,
    field: &DensityField,
    points: &[Point],
    style: &PointStyle,
) -> Result<()> {
    let bytes = render_density(field, points, style)?;
    write_atomic(path.as_ref(), &bytes)?;
    Ok(())
}

pub fn supported_formats() -> &'static [&'static str] {
    &["png", "jpg", "jpeg", "tif", "tiff"]
}
