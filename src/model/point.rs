use serde::{Deserialize, Serialize};

/// A clicked location in image pixel space (origin top-left, `x` = column).
///
/// Sub-pixel precision is kept until the point is persisted or used to index
/// a grid; `rounded` is the only place coordinates become integers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub intensity: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            intensity: None,
        }
    }

    pub fn with_intensity(x: f64, y: f64, intensity: f64) -> Self {
        Self {
            x,
            y,
            intensity: Some(intensity),
        }
    }

    pub fn rounded(&self) -> (i64, i64) {
        (round_half_even(self.x), round_half_even(self.y))
    }

    pub fn distance_sq(&self, x: f64, y: f64) -> f64 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// One row of an analysis run: where the point is, how crowded its
/// neighbourhood is and how bright it is in the intensity channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub x: i64,
    pub y: i64,
    pub density: f64,
    pub intensity: f64,
}

/// Rounds to the nearest integer, ties to even, so that `2.5` and `3.5`
/// land on `2` and `4` like the annotation files written by earlier tools.
pub fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}
