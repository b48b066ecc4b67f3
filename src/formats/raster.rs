use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma, Rgb, RgbImage};
use ndarray::Array2;

use crate::analysis::DensityField;
use crate::config::PointStyle;
use crate::model::{PixelType, Point, Raster};

use super::util::{color_ramp, scale_to_u8};
use super::{IoError, Result};

const MAX_RENDER_SIDE: u32 = 8192;

pub(crate) fn read_common_raster(path: &Path) -> Result<Raster> {
    let image = image::open(path)?;
    let (width, height) = (image.width() as usize, image.height() as usize);
    let (values, pixel_type) = match &image {
        DynamicImage::ImageLuma8(buffer) => (
            buffer
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]))
                .collect::<Vec<_>>(),
            PixelType::U8,
        ),
        DynamicImage::ImageLuma16(buffer) => (
            buffer
                .pixels()
                .map(|pixel| f32::from(pixel.0[0]))
                .collect::<Vec<_>>(),
            PixelType::U16,
        ),
        DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => (
            image
                .to_rgb16()
                .pixels()
                .map(|pixel| channel_mean(pixel.0.map(f32::from)))
                .collect::<Vec<_>>(),
            PixelType::U16,
        ),
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => (
            image
                .to_rgb32f()
                .pixels()
                .map(|pixel| channel_mean(pixel.0))
                .collect::<Vec<_>>(),
            PixelType::F32,
        ),
        other => (
            other
                .to_rgb8()
                .pixels()
                .map(|pixel| channel_mean(pixel.0.map(f32::from)))
                .collect::<Vec<_>>(),
            PixelType::U8,
        ),
    };
    let data = Array2::from_shape_vec((height, width), values)
        .map_err(|error| IoError::PixelLayout(error.to_string()))?;
    Ok(Raster::new(data, pixel_type)?)
}

fn channel_mean(rgb: [f32; 3]) -> f32 {
    (rgb[0] + rgb[1] + rgb[2]) / 3.0
}

pub(crate) fn encode_grey_png(grid: &Array2<f64>) -> Result<Vec<u8>> {
    let (height, width) = grid.dim();
    let values = grid.iter().copied().collect::<Vec<_>>();
    let image = ImageBuffer::<Luma<u8>, _>::from_vec(
        width as u32,
        height as u32,
        scale_to_u8(&values),
    )
    .ok_or_else(|| IoError::PixelLayout("failed to construct grey image".into()))?;
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

pub(crate) fn render_density(
    field: &DensityField,
    points: &[Point],
    style: &PointStyle,
) -> Result<Vec<u8>> {
    let (x0, y0, x1, y1) = field.bounds();
    let width = ((x1 - x0).round().max(0.0) as u32 + 1).min(MAX_RENDER_SIDE);
    let height = ((y1 - y0).round().max(0.0) as u32 + 1).min(MAX_RENDER_SIDE);
    let step_x = if width > 1 {
        (x1 - x0) / f64::from(width - 1)
    } else {
        1.0
    };
    let step_y = if height > 1 {
        (y1 - y0) / f64::from(height - 1)
    } else {
        1.0
    };
    let peak = field.max().max(f64::EPSILON);

    let mut image: RgbImage = ImageBuffer::from_fn(width, height, |column, row| {
        let x = x0 + f64::from(column) * step_x;
        let y = y0 + f64::from(row) * step_y;
        Rgb(color_ramp(field.probe(x, y) / peak))
    });

    let marker = f64::from(style.size.max(1.0)) / 2.0;
    for point in points {
        let center_x = (point.x - x0) / step_x;
        let center_y = (point.y - y0) / step_y;
        let reach = marker.ceil() as i64;
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                if ((dx * dx + dy * dy) as f64) > marker * marker {
                    continue;
                }
                let column = center_x.round() as i64 + dx;
                let row = center_y.round() as i64 + dy;
                if column < 0 || row < 0 || column >= i64::from(width) || row >= i64::from(height)
                {
                    continue;
                }
                image.put_pixel(column as u32, row as u32, Rgb(style.color));
            }
        }
    }

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
