use eframe::egui;

use crate::analysis::Histogram;
use crate::model::{Extent, Raster};
use crate::session::{
    DisplayHandle, DisplayItem, Event, EventHandler, Flow, Pane, RecordingCanvas,
    ThresholdExplorer, ThresholdState,
};

use super::view::{ImageView, full_uv, grey_image, mask_image};

/// Source image, reduced grid or thresholded mask, and the histogram of the
/// reduced grid. Clicking the histogram picks a threshold.
pub(crate) struct ExplorerApp {
    explorer: ThresholdExplorer,
    canvas: RecordingCanvas,
    histogram: Histogram,
    window: usize,
    source_view: ImageView,
    grid_view: ImageView,
    source: egui::TextureHandle,
    grid: egui::TextureHandle,
    mask: Option<(DisplayHandle, egui::TextureHandle)>,
}

impl ExplorerApp {
    pub(crate) fn new(
        cc: &eframe::CreationContext<'_>,
        explorer: ThresholdExplorer,
        raster: &Raster,
        histogram: Histogram,
        window: usize,
    ) -> Self {
        let ctx = &cc.egui_ctx;
        let source = ctx.load_texture(
            "explorer-source",
            grey_image(&raster.data),
            egui::TextureOptions::NEAREST,
        );
        let grid = ctx.load_texture(
            "explorer-grid",
            grey_image(explorer.grid()),
            egui::TextureOptions::NEAREST,
        );
        let (rows, columns) = explorer.grid().dim();
        Self {
            grid_view: ImageView::new(Extent {
                width: columns,
                height: rows,
            }),
            source_view: ImageView::new(raster.extent()),
            explorer,
            canvas: RecordingCanvas::default(),
            histogram,
            window,
            source,
            grid,
            mask: None,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        if self.explorer.handle(&event, &mut self.canvas) == Flow::Quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
        self.refresh_mask(ctx);
    }

    /// Re-uploads the mask texture when the explorer swapped its handle.
    fn refresh_mask(&mut self, ctx: &egui::Context) {
        let current = self.canvas.display.iter().find_map(|(handle, item)| match item {
            DisplayItem::Mask { mask, .. } => Some((*handle, mask)),
            DisplayItem::Points { .. } => None,
        });
        match current {
            None => self.mask = None,
            Some((handle, _)) if self.mask.as_ref().is_some_and(|(shown, _)| *shown == handle) => {}
            Some((handle, mask)) => {
                let texture = ctx.load_texture(
                    "explorer-mask",
                    mask_image(mask),
                    egui::TextureOptions::NEAREST,
                );
                self.mask = Some((handle, texture));
            }
        }
    }

    fn mask_title(&self) -> String {
        self.mask
            .as_ref()
            .and_then(|(handle, _)| match self.canvas.display.get(*handle) {
                Some(DisplayItem::Mask { title, .. }) => Some(title.clone()),
                _ => None,
            })
            .unwrap_or_else(|| self.explorer.title())
    }

    fn image_pane(ui: &mut egui::Ui, title: &str, view: &ImageView, texture: &egui::TextureHandle) {
        ui.heading(title);
        let (canvas_rect, _) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
        let image_rect = view.fit(canvas_rect);
        ui.painter_at(canvas_rect)
            .image(texture.id(), image_rect, full_uv(), egui::Color32::WHITE);
    }

    /// Returns the value under a click, if any.
    fn histogram_pane(&self, ui: &mut egui::Ui) -> Option<f64> {
        ui.heading(format!("Intensity Window (r={})", self.window));
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
        let plot = rect.shrink2(egui::vec2(8.0, 24.0));
        let painter = ui.painter_at(rect);
        let text_color = ui.visuals().text_color();

        let peak = self.histogram.peak().max(1) as f32;
        let bins = self.histogram.bins().max(1);
        let bar_width = plot.width() / bins as f32;
        for (index, &count) in self.histogram.counts.iter().enumerate() {
            let height = plot.height() * count as f32 / peak;
            let left = plot.min.x + index as f32 * bar_width;
            let bar = egui::Rect::from_min_max(
                egui::pos2(left + 1.0, plot.max.y - height),
                egui::pos2(left + bar_width - 1.0, plot.max.y),
            );
            painter.rect_filled(bar, 0.0, egui::Color32::from_rgb(90, 140, 200));
        }
        painter.line_segment(
            [plot.left_bottom(), plot.right_bottom()],
            egui::Stroke::new(1.0, text_color),
        );
        let font = egui::FontId::proportional(12.0);
        painter.text(
            plot.left_bottom() + egui::vec2(0.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!("{:.1}", self.histogram.min),
            font.clone(),
            text_color,
        );
        painter.text(
            plot.right_bottom() + egui::vec2(0.0, 4.0),
            egui::Align2::RIGHT_TOP,
            format!("{:.1}", self.histogram.max),
            font,
            text_color,
        );

        if let ThresholdState::Thresholded(value) = self.explorer.state() {
            let span = self.histogram.max - self.histogram.min;
            if span > 0.0 {
                let fraction = ((value - self.histogram.min) / span) as f32;
                let x = plot.min.x + fraction.clamp(0.0, 1.0) * plot.width();
                painter.line_segment(
                    [egui::pos2(x, plot.min.y), egui::pos2(x, plot.max.y)],
                    egui::Stroke::new(1.5, egui::Color32::from_rgb(220, 60, 60)),
                );
            }
        }

        if !response.clicked() {
            return None;
        }
        let pointer = response.interact_pointer_pos()?;
        if plot.width() <= 0.0 {
            return None;
        }
        let fraction = f64::from((pointer.x - plot.min.x) / plot.width());
        Some(self.histogram.value_at_fraction(fraction.clamp(0.0, 1.0)))
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let keys: Vec<char> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Text(text) => Some(text.chars().collect::<Vec<_>>()),
                    _ => None,
                })
                .flatten()
                .collect()
        });
        for key in keys {
            self.dispatch(ctx, Event::KeyPress(key));
        }

        let mut picked = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(3, |columns| {
                Self::image_pane(&mut columns[0], "Image", &self.source_view, &self.source);
                let title = self.mask_title();
                let texture = self.mask.as_ref().map_or(&self.grid, |(_, texture)| texture);
                Self::image_pane(&mut columns[1], &title, &self.grid_view, texture);
                picked = self.histogram_pane(&mut columns[2]);
            });
        });

        if let Some(value) = picked {
            self.dispatch(
                ctx,
                Event::Pick {
                    value,
                    pane: Pane::Histogram,
                },
            );
        }
    }
}
