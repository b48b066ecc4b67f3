use std::cell::RefCell;
use std::rc::Rc;

use eframe::egui;

use crate::annotations::AnnotationStore;
use crate::model::Extent;
use crate::runtime::ImagePair;
use crate::session::{
    AnnotationController, BackgroundLayer, Canvas, DisplayItem, Event, EventHandler, Flow, Hit,
    INSTRUCTIONS, MouseButton, RecordingCanvas, Status, StatusLevel, hit_test,
};

use super::view::{ImageView, full_uv, grey_image, rgb};

/// egui front end of [`AnnotationController`]. The controller draws into a
/// [`RecordingCanvas`] which is painted every frame.
pub(crate) struct AnnotatorApp {
    controller: AnnotationController,
    canvas: RecordingCanvas,
    view: ImageView,
    extent: Extent,
    primary: egui::TextureHandle,
    intensity: Option<egui::TextureHandle>,
    tolerance: f32,
    latest: Rc<RefCell<AnnotationStore>>,
    closing: bool,
}

impl AnnotatorApp {
    pub(crate) fn new(
        cc: &eframe::CreationContext<'_>,
        mut controller: AnnotationController,
        images: &ImagePair,
        tolerance: f32,
        startup_message: Option<String>,
        latest: Rc<RefCell<AnnotationStore>>,
    ) -> Self {
        let ctx = &cc.egui_ctx;
        let primary = ctx.load_texture(
            "annotator-primary",
            grey_image(&images.primary.data),
            egui::TextureOptions::NEAREST,
        );
        let intensity = images.intensity.as_ref().map(|raster| {
            ctx.load_texture(
                "annotator-intensity",
                grey_image(&raster.data),
                egui::TextureOptions::NEAREST,
            )
        });

        let mut canvas = RecordingCanvas::default();
        controller.start(&mut canvas);
        if let Some(message) = startup_message {
            canvas.report(Status::new(StatusLevel::Warning, message));
        }

        let extent = images.extent();
        Self {
            controller,
            canvas,
            view: ImageView::new(extent),
            extent,
            primary,
            intensity,
            tolerance,
            latest,
            closing: false,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        if self.closing {
            return;
        }
        let flow = self.controller.handle(&event, &mut self.canvas);
        self.sync();
        if flow == Flow::Quit {
            self.closing = true;
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn sync(&self) {
        *self.latest.borrow_mut() = self.controller.store().clone();
    }

    fn background_texture(&self) -> &egui::TextureHandle {
        match (self.canvas.background, &self.intensity) {
            (BackgroundLayer::Intensity, Some(texture)) => texture,
            _ => &self.primary,
        }
    }

    fn paint_markers(&self, painter: &egui::Painter, image_rect: egui::Rect) {
        let magnification = self.view.magnification(image_rect);
        for (_, item) in self.canvas.display.iter() {
            if let DisplayItem::Points { points, style } = item {
                let radius = (style.size * 0.5).max(1.0);
                let color = rgb(style.color);
                for point in points {
                    let centre = self.view.image_to_screen(image_rect, point.x, point.y);
                    painter.circle_filled(centre, radius, color);
                    if magnification > 4.0 {
                        painter.circle_stroke(
                            centre,
                            radius,
                            egui::Stroke::new(1.0, egui::Color32::BLACK),
                        );
                    }
                }
            }
        }
    }

    fn status_line(&self, ui: &mut egui::Ui) {
        let Some(status) = self.canvas.last_status() else {
            return;
        };
        let color = match status.level {
            StatusLevel::Info => ui.visuals().text_color(),
            StatusLevel::Warning => egui::Color32::from_rgb(230, 160, 40),
            StatusLevel::Error => egui::Color32::from_rgb(220, 60, 60),
        };
        ui.colored_label(color, &status.message);
    }
}

impl eframe::App for AnnotatorApp {
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

        egui::TopBottomPanel::top("annotator-help").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for line in INSTRUCTIONS.lines() {
                    ui.label(line);
                    ui.separator();
                }
                if self.intensity.is_some() {
                    ui.label("Press a to switch layers");
                }
            });
        });

        egui::TopBottomPanel::bottom("annotator-status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} points", self.controller.store().len()));
                ui.separator();
                self.status_line(ui);
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::default().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (canvas_rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click());
                let image_rect = self.view.fit(canvas_rect);
                let painter = ui.painter_at(canvas_rect);
                painter.image(
                    self.background_texture().id(),
                    image_rect,
                    full_uv(),
                    egui::Color32::WHITE,
                );
                self.paint_markers(&painter, image_rect);

                let button = if response.clicked() {
                    Some(MouseButton::Left)
                } else if response.secondary_clicked() {
                    Some(MouseButton::Right)
                } else {
                    None
                };
                if let (Some(button), Some(pointer)) = (button, response.interact_pointer_pos()) {
                    let event = match self.view.screen_to_image(image_rect, pointer) {
                        Some(position) => {
                            let magnification =
                                self.view.magnification(image_rect).max(f32::EPSILON);
                            let tolerance = f64::from(self.tolerance / magnification);
                            let hit = hit_test(
                                self.controller.store().points(),
                                position,
                                tolerance,
                                self.extent,
                            );
                            Event::Click {
                                button,
                                position,
                                hit,
                            }
                        }
                        None => Event::Click {
                            button,
                            position: [f64::NAN, f64::NAN],
                            hit: Hit::Nothing,
                        },
                    };
                    self.dispatch(ctx, event);
                }
            });

        if ctx.input(|input| input.viewport().close_requested()) && !self.closing {
            self.closing = true;
            self.controller.shutdown(&mut self.canvas);
            self.sync();
        }
    }
}
