use std::io::Write;
use std::path::Path;

use ndarray::Array2;
use tempfile::NamedTempFile;

use crate::model::value_range;

use super::{IoError, Result};

pub(crate) fn extension(path: &Path) -> Result<String> {
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| value.to_ascii_lowercase())
        .ok_or_else(|| IoError::UnknownExtension(path.to_string_lossy().to_string()))?;
    Ok(ext)
}

/// Writes `bytes` to a temporary file next to `path` and renames it into
/// place, so an interrupted write leaves any previous file intact.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(directory)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|error| error.error)?;
    Ok(())
}

pub(crate) fn grid_to_csv(grid: &Array2<f64>) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        let line = row
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Stretches finite values onto `0..=255`; non-finite values map to 0.
pub(crate) fn scale_to_u8(values: &[f64]) -> Vec<u8> {
    let (min, max) = value_range(values.iter().copied()).unwrap_or((0.0, 0.0));
    let span = max - min;
    values
        .iter()
        .map(|value| {
            if !value.is_finite() || span <= 0.0 {
                return 0;
            }
            (((value - min) / span).clamp(0.0, 1.0) * 255.0).round() as u8
        })
        .collect()
}

const RAMP: [(f64, [f64; 3]); 4] = [
    (0.0, [20.0, 40.0, 170.0]),
    (0.35, [0.0, 190.0, 240.0]),
    (0.7, [250.0, 225.0, 40.0]),
    (1.0, [200.0, 20.0, 20.0]),
];

/// Maps `t` in `[0, 1]` onto a blue to red ramp.
pub(crate) fn color_ramp(t: f64) -> [u8; 3] {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let upper = RAMP
        .iter()
        .position(|(stop, _)| *stop >= t)
        .unwrap_or(RAMP.len() - 1)
        .max(1);
    let (t0, c0) = RAMP[upper - 1];
    let (t1, c1) = RAMP[upper];
    let local = ((t - t0) / (t1 - t0)).clamp(0.0, 1.0);
    let mut rgb = [0_u8; 3];
    for (channel, value) in rgb.iter_mut().enumerate() {
        *value = (c0[channel] + (c1[channel] - c0[channel]) * local).round() as u8;
    }
    rgb
}
