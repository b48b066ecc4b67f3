use std::path::{Path, PathBuf};

use crate::annotations::AnnotationStore;
use crate::config::{PointStyle, Settings};

use super::{
    BackgroundLayer, Canvas, DisplayHandle, Event, EventHandler, Flow, Hit, MouseButton, Status,
    StatusLevel,
};

pub const INSTRUCTIONS: &str = "Click to add a point\n\
    Click a point to remove it\n\
    Right-click to remove the last point\n\
    Press c to clear points\n\
    Press w to write points\n\
    Press q to quit";

/// Click/keyboard contract of the annotation window. The store is the only
/// source of truth; the canvas just mirrors it through one points handle.
#[derive(Debug)]
pub struct AnnotationController {
    store: AnnotationStore,
    style: PointStyle,
    output: PathBuf,
    autosave: PathBuf,
    has_intensity_layer: bool,
    background: BackgroundLayer,
    points_handle: Option<DisplayHandle>,
}

impl AnnotationController {
    pub fn new(
        store: AnnotationStore,
        settings: &Settings,
        output: impl Into<PathBuf>,
        has_intensity_layer: bool,
    ) -> Self {
        Self {
            store,
            style: settings.point_style(),
            output: output.into(),
            autosave: settings.autosave_path.clone(),
            has_intensity_layer,
            background: BackgroundLayer::Primary,
            points_handle: None,
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn into_store(self) -> AnnotationStore {
        self.store
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn background(&self) -> BackgroundLayer {
        self.background
    }

    /// Draws the initial state, e.g. points loaded from a previous session.
    pub fn start(&mut self, canvas: &mut dyn Canvas) {
        canvas.show_background(self.background);
        self.redraw(canvas);
        notify(canvas, StatusLevel::Info, INSTRUCTIONS.replace('\n', " | "));
    }

    /// Window closed without `q`: still write the fallback file.
    pub fn shutdown(&mut self, canvas: &mut dyn Canvas) {
        if let Err(error) = self.store.save(&self.autosave) {
            notify(
                canvas,
                StatusLevel::Error,
                format!("auto-save to {} failed: {error}", self.autosave.display()),
            );
        }
    }

    fn redraw(&mut self, canvas: &mut dyn Canvas) {
        if let Some(handle) = self.points_handle.take() {
            canvas.remove(handle);
        }
        if !self.store.is_empty() {
            self.points_handle = Some(canvas.show_points(self.store.points(), &self.style));
        }
    }

    fn on_left_click(&mut self, position: [f64; 2], hit: Hit, canvas: &mut dyn Canvas) {
        match hit {
            Hit::Nothing => {}
            Hit::Marker(index) => {
                if self.store.remove_at(index).is_some() {
                    self.redraw(canvas);
                    notify(canvas, StatusLevel::Info, format!("Deleted point id {index}"));
                }
            }
            Hit::Background => {
                let point = self.store.add(position[0], position[1], None);
                self.redraw(canvas);
                let intensity = point
                    .intensity
                    .map(|value| format!("{value:.1}"))
                    .unwrap_or_else(|| "-".to_string());
                notify(
                    canvas,
                    StatusLevel::Info,
                    format!(
                        "Added point ({:.2}, {:.2}) I={intensity}",
                        point.x, point.y
                    ),
                );
            }
        }
    }

    fn on_right_click(&mut self, hit: Hit, canvas: &mut dyn Canvas) {
        if hit == Hit::Nothing {
            return;
        }
        if self.store.remove_last().is_some() {
            self.redraw(canvas);
            notify(canvas, StatusLevel::Info, "Deleted last point");
        }
    }

    fn on_key(&mut self, key: char, canvas: &mut dyn Canvas) -> Flow {
        match key {
            'q' | 'Q' => match self.store.save(&self.autosave) {
                Ok(()) => {
                    log::info!("auto-saved points to {}", self.autosave.display());
                    return Flow::Quit;
                }
                Err(error) => notify(
                    canvas,
                    StatusLevel::Error,
                    format!(
                        "auto-save to {} failed, not quitting: {error}",
                        self.autosave.display()
                    ),
                ),
            },
            'c' => {
                self.store.clear();
                self.redraw(canvas);
                notify(canvas, StatusLevel::Warning, "Cleared all points");
            }
            'w' => match self.store.save(&self.output) {
                Ok(()) => notify(
                    canvas,
                    StatusLevel::Info,
                    format!(
                        "Saved {} points to {}",
                        self.store.len(),
                        self.output.display()
                    ),
                ),
                Err(error) => notify(
                    canvas,
                    StatusLevel::Error,
                    format!("saving {} failed: {error}", self.output.display()),
                ),
            },
            'a' if self.has_intensity_layer => {
                self.background = self.background.toggled();
                canvas.show_background(self.background);
            }
            other => log::debug!("ignored key `{other}`"),
        }
        Flow::Continue
    }
}

impl EventHandler for AnnotationController {
    fn handle(&mut self, event: &Event, canvas: &mut dyn Canvas) -> Flow {
        match *event {
            Event::Click {
                button: MouseButton::Left,
                position,
                hit,
            } => self.on_left_click(position, hit, canvas),
            Event::Click {
                button: MouseButton::Right,
                hit,
                ..
            } => self.on_right_click(hit, canvas),
            Event::KeyPress(key) => return self.on_key(key, canvas),
            Event::Pick { .. } => {}
        }
        Flow::Continue
    }
}

pub(super) fn notify(canvas: &mut dyn Canvas, level: StatusLevel, message: impl Into<String>) {
    let message = message.into();
    match level {
        StatusLevel::Info => log::info!("{message}"),
        StatusLevel::Warning => log::warn!("{message}"),
        StatusLevel::Error => log::error!("{message}"),
    }
    canvas.report(Status::new(level, message));
}
