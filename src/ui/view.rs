use eframe::egui;
use ndarray::Array2;

use crate::analysis::{DensityField, Mask};
use crate::formats::color_ramp;
use crate::model::{Extent, value_range};

/// Letterboxed placement of an image inside a canvas rect. Pixel centres sit
/// at integer image coordinates, so pixel `(c, r)` covers
/// `[c - 0.5, c + 0.5) x [r - 0.5, r + 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ImageView {
    extent: Extent,
}

impl ImageView {
    pub(crate) fn new(extent: Extent) -> Self {
        Self { extent }
    }

    /// Largest rect with the image aspect ratio centred in `canvas_rect`.
    pub(crate) fn fit(&self, canvas_rect: egui::Rect) -> egui::Rect {
        let image_w = self.extent.width.max(1) as f32;
        let image_h = self.extent.height.max(1) as f32;
        let magnification = (canvas_rect.width() / image_w).min(canvas_rect.height() / image_h);
        let size = egui::vec2(image_w * magnification, image_h * magnification);
        egui::Rect::from_center_size(canvas_rect.center(), size)
    }

    /// Screen pixels per image pixel for a rect returned by [`ImageView::fit`].
    pub(crate) fn magnification(&self, image_rect: egui::Rect) -> f32 {
        image_rect.width() / self.extent.width.max(1) as f32
    }

    pub(crate) fn screen_to_image(
        &self,
        image_rect: egui::Rect,
        screen_pos: egui::Pos2,
    ) -> Option<[f64; 2]> {
        if !image_rect.contains(screen_pos) {
            return None;
        }
        let magnification = self.magnification(image_rect);
        if magnification <= 0.0 {
            return None;
        }
        let x = (screen_pos.x - image_rect.min.x) / magnification - 0.5;
        let y = (screen_pos.y - image_rect.min.y) / magnification - 0.5;
        Some([f64::from(x), f64::from(y)])
    }

    pub(crate) fn image_to_screen(&self, image_rect: egui::Rect, x: f64, y: f64) -> egui::Pos2 {
        let magnification = self.magnification(image_rect);
        egui::pos2(
            image_rect.min.x + (x as f32 + 0.5) * magnification,
            image_rect.min.y + (y as f32 + 0.5) * magnification,
        )
    }
}

/// Greyscale rendering stretched between the minimum and maximum sample.
pub(crate) fn grey_image<A>(data: &Array2<A>) -> egui::ColorImage
where
    A: Copy + Into<f64>,
{
    let (height, width) = data.dim();
    let (min, max) =
        value_range(data.iter().map(|value| (*value).into())).unwrap_or((0.0, 0.0));
    let span = if max > min { max - min } else { 1.0 };
    let mut rgba = Vec::with_capacity(width * height * 4);
    for &value in data.iter() {
        let value: f64 = value.into();
        let level = if value.is_finite() {
            (((value - min) / span).clamp(0.0, 1.0) * 255.0).round() as u8
        } else {
            0
        };
        rgba.extend_from_slice(&[level, level, level, 255]);
    }
    egui::ColorImage::from_rgba_unmultiplied([width.max(1), height.max(1)], &rgba)
}

/// Density field at grid resolution, coloured with the shared heat ramp.
pub(crate) fn heatmap_image(field: &DensityField) -> egui::ColorImage {
    let values = field.values();
    let (rows, cols) = values.dim();
    let max = field.max();
    let mut rgba = Vec::with_capacity(rows * cols * 4);
    for &value in values.iter() {
        let t = if max > 0.0 { value / max } else { 0.0 };
        let [r, g, b] = color_ramp(t);
        rgba.extend_from_slice(&[r, g, b, 255]);
    }
    egui::ColorImage::from_rgba_unmultiplied([cols.max(1), rows.max(1)], &rgba)
}

/// Selected windows dark, everything else light.
pub(crate) fn mask_image(mask: &Mask) -> egui::ColorImage {
    let (rows, cols) = mask.dim();
    let mut rgba = Vec::with_capacity(rows * cols * 4);
    for &selected in mask.iter() {
        let level = if selected { 40 } else { 235 };
        rgba.extend_from_slice(&[level, level, level, 255]);
    }
    egui::ColorImage::from_rgba_unmultiplied([cols.max(1), rows.max(1)], &rgba)
}

pub(crate) fn full_uv() -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0))
}

pub(crate) fn rgb(color: [u8; 3]) -> egui::Color32 {
    egui::Color32::from_rgb(color[0], color[1], color[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> (ImageView, egui::Rect) {
        let view = ImageView::new(Extent {
            width: 200,
            height: 100,
        });
        let canvas = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(400.0, 400.0));
        (view, view.fit(canvas))
    }

    #[test]
    fn fit_keeps_aspect_ratio_and_centres() {
        let (_, rect) = view();
        assert_eq!(rect.width(), 400.0);
        assert_eq!(rect.height(), 200.0);
        assert_eq!(rect.min.y, 100.0);
    }

    #[test]
    fn screen_and_image_coordinates_agree() {
        let (view, rect) = view();
        let screen = view.image_to_screen(rect, 10.0, 20.0);
        let back = view.screen_to_image(rect, screen).expect("inside image");
        assert!((back[0] - 10.0).abs() < 1e-4);
        assert!((back[1] - 20.0).abs() < 1e-4);
    }

    #[test]
    fn pointer_in_letterbox_is_outside_image() {
        let (view, rect) = view();
        assert!(view.screen_to_image(rect, egui::pos2(10.0, 10.0)).is_none());
    }

    #[test]
    fn grey_image_stretches_range() {
        let data = Array2::from_shape_vec((1, 3), vec![2.0f32, 4.0, 6.0]).expect("shape");
        let image = grey_image(&data);
        assert_eq!(image.size, [3, 1]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(0, 0, 0));
        assert_eq!(image.pixels[2], egui::Color32::from_rgb(255, 255, 255));
    }
}
