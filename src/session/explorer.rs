use crate::analysis::{Mask, ReducedGrid, threshold_mask};

use super::controller::notify;
use super::{Canvas, DisplayHandle, Event, EventHandler, Flow, Pane, StatusLevel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdState {
    Unset,
    Thresholded(f64),
}

/// Binary mask over a reduced grid, recomputed on every histogram pick.
#[derive(Debug, Clone)]
pub struct ThresholdExplorer {
    grid: ReducedGrid,
    state: ThresholdState,
    mask: Option<Mask>,
    mask_handle: Option<DisplayHandle>,
}

impl ThresholdExplorer {
    pub fn new(grid: ReducedGrid) -> Self {
        Self {
            grid,
            state: ThresholdState::Unset,
            mask: None,
            mask_handle: None,
        }
    }

    pub fn grid(&self) -> &ReducedGrid {
        &self.grid
    }

    pub fn state(&self) -> ThresholdState {
        self.state
    }

    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_ref()
    }

    pub fn title(&self) -> String {
        match self.state {
            ThresholdState::Unset => "Threshold unset".to_string(),
            ThresholdState::Thresholded(value) => format!("Threshold {value:.2}"),
        }
    }

    pub fn pick(&mut self, value: f64) -> &Mask {
        self.state = ThresholdState::Thresholded(value);
        self.mask.insert(threshold_mask(&self.grid, value))
    }

    /// Back to the initial state; the only way out of `Thresholded`.
    pub fn reset(&mut self, canvas: &mut dyn Canvas) {
        if let Some(handle) = self.mask_handle.take() {
            canvas.remove(handle);
        }
        self.state = ThresholdState::Unset;
        self.mask = None;
    }

    fn redraw(&mut self, canvas: &mut dyn Canvas) {
        if let Some(handle) = self.mask_handle.take() {
            canvas.remove(handle);
        }
        let title = self.title();
        if let Some(mask) = &self.mask {
            self.mask_handle = Some(canvas.show_mask(mask, &title));
        }
    }
}

impl EventHandler for ThresholdExplorer {
    fn handle(&mut self, event: &Event, canvas: &mut dyn Canvas) -> Flow {
        match *event {
            Event::Pick {
                value,
                pane: Pane::Histogram,
            } => {
                if !value.is_finite() {
                    notify(canvas, StatusLevel::Warning, "ignored non-finite threshold");
                    return Flow::Continue;
                }
                let above = self.pick(value).iter().filter(|flag| **flag).count();
                self.redraw(canvas);
                log::info!(
                    "threshold {value:.2}: {above}/{} cells above",
                    self.grid.len()
                );
            }
            Event::KeyPress(key) if key.eq_ignore_ascii_case(&'q') => return Flow::Quit,
            _ => {}
        }
        Flow::Continue
    }
}
