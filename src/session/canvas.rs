use std::collections::BTreeMap;

use crate::analysis::Mask;
use crate::config::PointStyle;
use crate::model::Point;

/// Opaque id of something the canvas is displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundLayer {
    #[default]
    Primary,
    Intensity,
}

impl BackgroundLayer {
    pub fn toggled(self) -> Self {
        match self {
            BackgroundLayer::Primary => BackgroundLayer::Intensity,
            BackgroundLayer::Intensity => BackgroundLayer::Primary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub level: StatusLevel,
    pub message: String,
}

impl Status {
    pub fn new(level: StatusLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayItem {
    Points {
        points: Vec<Point>,
        style: PointStyle,
    },
    Mask {
        mask: Mask,
        title: String,
    },
}

/// The rendering side of an interactive session. Controllers own the
/// handles they receive and give them back through `remove` when redrawing.
pub trait Canvas {
    fn show_points(&mut self, points: &[Point], style: &PointStyle) -> DisplayHandle;
    fn show_mask(&mut self, mask: &Mask, title: &str) -> DisplayHandle;
    fn remove(&mut self, handle: DisplayHandle);
    fn show_background(&mut self, layer: BackgroundLayer);
    fn report(&mut self, status: Status);
}

/// Retained display items keyed by the handles given out for them.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    items: BTreeMap<DisplayHandle, DisplayItem>,
    next_id: u64,
}

impl DisplayList {
    pub fn insert(&mut self, item: DisplayItem) -> DisplayHandle {
        self.next_id = self.next_id.saturating_add(1);
        let handle = DisplayHandle(self.next_id);
        self.items.insert(handle, item);
        handle
    }

    pub fn remove(&mut self, handle: DisplayHandle) -> Option<DisplayItem> {
        self.items.remove(&handle)
    }

    pub fn get(&self, handle: DisplayHandle) -> Option<&DisplayItem> {
        self.items.get(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DisplayHandle, &DisplayItem)> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Headless canvas that keeps what it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub display: DisplayList,
    pub background: BackgroundLayer,
    pub statuses: Vec<Status>,
}

impl RecordingCanvas {
    pub fn last_status(&self) -> Option<&Status> {
        self.statuses.last()
    }
}

impl Canvas for RecordingCanvas {
    fn show_points(&mut self, points: &[Point], style: &PointStyle) -> DisplayHandle {
        self.display.insert(DisplayItem::Points {
            points: points.to_vec(),
            style: *style,
        })
    }

    fn show_mask(&mut self, mask: &Mask, title: &str) -> DisplayHandle {
        self.display.insert(DisplayItem::Mask {
            mask: mask.clone(),
            title: title.to_string(),
        })
    }

    fn remove(&mut self, handle: DisplayHandle) {
        self.display.remove(handle);
    }

    fn show_background(&mut self, layer: BackgroundLayer) {
        self.background = layer;
    }

    fn report(&mut self, status: Status) {
        self.statuses.push(status);
    }
}
