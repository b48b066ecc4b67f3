use thiserror::Error;

use crate::model::CoreError;

pub type Result<T> = std::result::Result<T, IoError>;

/// Failures reading a microscopy raster or writing a derived image or grid.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("`{0}` is not a known raster or grid extension (png, jpg, jpeg, tif, tiff, csv)")]
    UnknownExtension(String),

    #[error("cannot map pixels to a single-channel raster: {0}")]
    PixelLayout(String),

    #[error("file access failed: {0}")]
    File(#[from] std::io::Error),

    #[error("PNG/JPEG codec failed: {0}")]
    Codec(#[from] image::ImageError),

    #[error("TIFF codec failed: {0}")]
    Tiff(#[from] tiff::TiffError),

    #[error(transparent)]
    Raster(#[from] CoreError),
}
