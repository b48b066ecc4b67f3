use eframe::egui;

use crate::config::PointStyle;
use crate::model::{Extent, Point};
use crate::workflow::AnalysisOutput;

use super::view::{ImageView, full_uv, heatmap_image, rgb};

const PLOT_MARGIN: f32 = 48.0;

/// Density heat map with the annotated points, and the per-point
/// density/intensity scatter with its linear fit.
pub(crate) struct ResultsApp {
    output: AnalysisOutput,
    points: Vec<Point>,
    view: ImageView,
    style: PointStyle,
    heatmap: egui::TextureHandle,
}

impl ResultsApp {
    pub(crate) fn new(
        cc: &eframe::CreationContext<'_>,
        output: AnalysisOutput,
        points: Vec<Point>,
        extent: Extent,
        style: PointStyle,
    ) -> Self {
        let heatmap = cc.egui_ctx.load_texture(
            "results-density",
            heatmap_image(&output.sampling.field),
            egui::TextureOptions::LINEAR,
        );
        Self {
            output,
            points,
            view: ImageView::new(extent),
            style,
            heatmap,
        }
    }

    fn density_map(&self, ui: &mut egui::Ui) {
        ui.heading(format!("Density in {} pixels radius", self.output.report.radius));
        let (canvas_rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let image_rect = self.view.fit(canvas_rect);
        let painter = ui.painter_at(canvas_rect);
        painter.rect_filled(image_rect, 0.0, egui::Color32::BLACK);

        let (x0, y0, x1, y1) = self.output.sampling.field.bounds();
        let field_rect = egui::Rect::from_min_max(
            self.view.image_to_screen(image_rect, x0, y0),
            self.view.image_to_screen(image_rect, x1, y1),
        );
        painter.image(self.heatmap.id(), field_rect, full_uv(), egui::Color32::WHITE);

        let color = rgb(self.style.color);
        let radius = (self.style.size * 0.35).max(1.0);
        for point in &self.points {
            let centre = self.view.image_to_screen(image_rect, point.x, point.y);
            painter.circle_filled(centre, radius, color);
        }
    }

    fn scatter(&self, ui: &mut egui::Ui) {
        ui.heading(self.output.report.title());
        let (canvas_rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let painter = ui.painter_at(canvas_rect);
        let plot_rect = canvas_rect.shrink(PLOT_MARGIN);
        let text_color = ui.visuals().text_color();
        let axis = egui::Stroke::new(1.0, text_color);

        let densities = &self.output.sampling.densities;
        let intensities = &self.output.sampling.intensities;
        let frame = PlotFrame::new(plot_rect, range(densities), range(intensities));

        painter.line_segment([plot_rect.left_bottom(), plot_rect.right_bottom()], axis);
        painter.line_segment([plot_rect.left_bottom(), plot_rect.left_top()], axis);
        let font = egui::FontId::proportional(13.0);
        painter.text(
            plot_rect.center_bottom() + egui::vec2(0.0, PLOT_MARGIN * 0.5),
            egui::Align2::CENTER_CENTER,
            format!("Density in {} pixels radius", self.output.report.radius),
            font.clone(),
            text_color,
        );
        painter.text(
            plot_rect.left_top() - egui::vec2(0.0, PLOT_MARGIN * 0.4),
            egui::Align2::LEFT_CENTER,
            "Intensity",
            font.clone(),
            text_color,
        );
        for (anchor, align, value) in [
            (plot_rect.left_bottom(), egui::Align2::LEFT_TOP, frame.x.0),
            (plot_rect.right_bottom(), egui::Align2::RIGHT_TOP, frame.x.1),
        ] {
            painter.text(
                anchor + egui::vec2(0.0, 4.0),
                align,
                format!("{value:.1}"),
                font.clone(),
                text_color,
            );
        }
        for (anchor, align, value) in [
            (plot_rect.left_bottom(), egui::Align2::RIGHT_BOTTOM, frame.y.0),
            (plot_rect.left_top(), egui::Align2::RIGHT_TOP, frame.y.1),
        ] {
            painter.text(
                anchor - egui::vec2(4.0, 0.0),
                align,
                format!("{value:.1}"),
                font.clone(),
                text_color,
            );
        }

        let color = rgb(self.style.color);
        for (&density, &intensity) in densities.iter().zip(intensities) {
            painter.circle_filled(frame.to_screen(density, intensity), 3.0, color);
        }

        if let Some(fit) = &self.output.report.fit {
            let (start, end) = frame.x;
            painter.line_segment(
                [
                    frame.to_screen(start, fit.evaluate(start)),
                    frame.to_screen(end, fit.evaluate(end)),
                ],
                egui::Stroke::new(1.5, egui::Color32::from_rgb(60, 120, 220)),
            );
        }
    }
}

impl eframe::App for ResultsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|input| input.key_pressed(egui::Key::Q)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.density_map(&mut columns[0]);
                self.scatter(&mut columns[1]);
            });
        });
    }
}

/// Maps data coordinates into a plot rect, y growing upwards.
struct PlotFrame {
    rect: egui::Rect,
    x: (f64, f64),
    y: (f64, f64),
}

impl PlotFrame {
    fn new(rect: egui::Rect, x: (f64, f64), y: (f64, f64)) -> Self {
        Self { rect, x, y }
    }

    fn to_screen(&self, x: f64, y: f64) -> egui::Pos2 {
        let u = ((x - self.x.0) / (self.x.1 - self.x.0)) as f32;
        let v = ((y - self.y.0) / (self.y.1 - self.y.0)) as f32;
        egui::pos2(
            self.rect.min.x + u * self.rect.width(),
            self.rect.max.y - v * self.rect.height(),
        )
    }
}

/// Data range padded by 5% on each side, never empty.
fn range(values: &[f64]) -> (f64, f64) {
    let (min, max) = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    if max <= min {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_pads_and_handles_degenerate_input() {
        assert_eq!(range(&[]), (0.0, 1.0));
        assert_eq!(range(&[3.0, 3.0]), (2.0, 4.0));
        let (lo, hi) = range(&[0.0, 10.0]);
        assert!((lo + 0.5).abs() < 1e-12);
        assert!((hi - 10.5).abs() < 1e-12);
    }

    #[test]
    fn plot_frame_puts_origin_bottom_left() {
        let rect = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 50.0));
        let frame = PlotFrame::new(rect, (0.0, 10.0), (0.0, 5.0));
        assert_eq!(frame.to_screen(0.0, 0.0), egui::pos2(0.0, 50.0));
        assert_eq!(frame.to_screen(10.0, 5.0), egui::pos2(100.0, 0.0));
    }
}
