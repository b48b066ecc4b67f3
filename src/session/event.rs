use crate::model::{Extent, Point};

use super::Canvas;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// What a click landed on, as resolved by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Nothing,
    Background,
    /// Index of the point marker under the cursor.
    Marker(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Image,
    Mask,
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// `position` is in image pixel coordinates.
    Click {
        button: MouseButton,
        position: [f64; 2],
        hit: Hit,
    },
    KeyPress(char),
    /// A value picked on a plot pane, e.g. the x position of a histogram click.
    Pick { value: f64, pane: Pane },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Receives canvas events one at a time, on the canvas thread.
pub trait EventHandler {
    fn handle(&mut self, event: &Event, canvas: &mut dyn Canvas) -> Flow;
}

/// Closest marker within `tolerance` image pixels of `position`, otherwise
/// the background when inside `extent`.
pub fn hit_test(points: &[Point], position: [f64; 2], tolerance: f64, extent: Extent) -> Hit {
    let [x, y] = position;
    let tolerance_sq = tolerance * tolerance;
    let closest = points
        .iter()
        .enumerate()
        .map(|(index, point)| (index, point.distance_sq(x, y)))
        .filter(|(_, distance)| *distance <= tolerance_sq)
        .min_by(|left, right| left.1.total_cmp(&right.1));
    match closest {
        Some((index, _)) => Hit::Marker(index),
        None if extent.contains(x, y) => Hit::Background,
        None => Hit::Nothing,
    }
}
