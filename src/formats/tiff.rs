use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use ndarray::Array2;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::{TiffEncoder, colortype};

use crate::model::{PixelType, Raster};

use super::{IoError, Result};

pub(crate) fn read_tiff(path: &Path) -> Result<Raster> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(file)?;
    let (width, height) = decoder.dimensions()?;
    let (samples, pixel_type) = match decoder.read_image()? {
        DecodingResult::U8(buffer) => (
            buffer.into_iter().map(f32::from).collect::<Vec<_>>(),
            PixelType::U8,
        ),
        DecodingResult::U16(buffer) => (
            buffer.into_iter().map(f32::from).collect::<Vec<_>>(),
            PixelType::U16,
        ),
        DecodingResult::F32(buffer) => (buffer, PixelType::F32),
        DecodingResult::F64(buffer) => (
            buffer.into_iter().map(|value| value as f32).collect::<Vec<_>>(),
            PixelType::F32,
        ),
        _ => {
            return Err(IoError::PixelLayout(
                "TIFF sample type must be 8/16-bit unsigned or float".into(),
            ));
        }
    };
    if decoder.more_images() {
        log::warn!(
            "{} has several pages; only the first one is used",
            path.display()
        );
    }

    let pixels = width as usize * height as usize;
    let values = collapse_channels(samples, pixels)?;
    let data = Array2::from_shape_vec((height as usize, width as usize), values)
        .map_err(|error| IoError::PixelLayout(error.to_string()))?;
    Ok(Raster::new(data, pixel_type)?)
}

/// Interleaved samples to one value per pixel: grey is kept, alpha dropped,
/// colour channels averaged.
fn collapse_channels(samples: Vec<f32>, pixels: usize) -> Result<Vec<f32>> {
    if pixels == 0 || samples.len() % pixels != 0 {
        return Err(IoError::PixelLayout(format!(
            "{} samples do not divide into {pixels} pixels",
            samples.len()
        )));
    }
    let channels = samples.len() / pixels;
    let values = match channels {
        1 => samples,
        2 => samples.chunks_exact(2).map(|pixel| pixel[0]).collect(),
        3 | 4 => samples
            .chunks_exact(channels)
            .map(|pixel| (pixel[0] + pixel[1] + pixel[2]) / 3.0)
            .collect(),
        other => {
            return Err(IoError::PixelLayout(format!(
                "TIFF pages with {other} samples per pixel are not supported"
            )));
        }
    };
    Ok(values)
}

pub(crate) fn encode_tiff(grid: &Array2<f64>) -> Result<Vec<u8>> {
    let (height, width) = grid.dim();
    let page = grid.iter().map(|value| *value as f32).collect::<Vec<_>>();
    let mut bytes = Vec::new();
    {
        let mut encoder = TiffEncoder::new(Cursor::new(&mut bytes))?;
        let image = encoder.new_image::<colortype::Gray32Float>(width as u32, height as u32)?;
        image.write_data(&page)?;
    }
    Ok(bytes)
}
