use ndarray::{Array2, Zip};

use crate::model::Extent;

use super::{AnalysisError, Result};

/// Fixed-radius point density sampled on a regular grid: every node holds
/// the number of points within `radius` of it.
#[derive(Debug, Clone)]
pub struct DensityField {
    values: Array2<f64>,
    origin: [f64; 2],
    spacing: [f64; 2],
    radius: f64,
}

impl DensityField {
    /// Estimates the field over `extent` or, without one, over the point
    /// bounds padded by `radius`. `dims` is `[columns, rows]`.
    pub fn estimate(
        points: &[(f64, f64)],
        radius: f64,
        dims: [usize; 2],
        extent: Option<Extent>,
    ) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(AnalysisError::InvalidParameter(format!(
                "density radius must be a positive number, got {radius}"
            )));
        }
        if dims.iter().any(|size| *size < 2) {
            return Err(AnalysisError::InvalidParameter(format!(
                "density grid needs at least 2 samples per axis, got {dims:?}"
            )));
        }
        if points.is_empty() {
            return Err(AnalysisError::InvalidParameter(
                "density estimation needs at least one point".to_string(),
            ));
        }

        let (min, max) = match extent {
            Some(extent) => (
                [0.0, 0.0],
                [
                    extent.width.saturating_sub(1) as f64,
                    extent.height.saturating_sub(1) as f64,
                ],
            ),
            None => padded_bounds(points, radius),
        };
        let [columns, rows] = dims;
        let spacing = [
            (max[0] - min[0]) / (columns - 1) as f64,
            (max[1] - min[1]) / (rows - 1) as f64,
        ];

        let radius_sq = radius * radius;
        let mut values = Array2::zeros((rows, columns));
        Zip::indexed(&mut values).par_for_each(|(row, column), value| {
            let x = min[0] + column as f64 * spacing[0];
            let y = min[1] + row as f64 * spacing[1];
            *value = points
                .iter()
                .filter(|(px, py)| (px - x) * (px - x) + (py - y) * (py - y) <= radius_sq)
                .count() as f64;
        });

        log::debug!(
            "density field {columns}x{rows} over ({:.1}, {:.1})-({:.1}, {:.1}), radius {radius}",
            min[0],
            min[1],
            max[0],
            max[1]
        );
        Ok(Self {
            values,
            origin: min,
            spacing,
            radius,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Node values indexed `[row, column]`.
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// `(x0, y0, x1, y1)` covered by the grid nodes.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let (rows, columns) = self.values.dim();
        (
            self.origin[0],
            self.origin[1],
            self.origin[0] + (columns - 1) as f64 * self.spacing[0],
            self.origin[1] + (rows - 1) as f64 * self.spacing[1],
        )
    }

    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(0.0, f64::max)
    }

    /// Bilinear interpolation between the surrounding nodes; positions
    /// outside the grid are clamped to its border.
    pub fn probe(&self, x: f64, y: f64) -> f64 {
        let (rows, columns) = self.values.dim();
        let (c0, c1, tx) = bracket(x, self.origin[0], self.spacing[0], columns);
        let (r0, r1, ty) = bracket(y, self.origin[1], self.spacing[1], rows);
        let top = self.values[[r0, c0]] * (1.0 - tx) + self.values[[r0, c1]] * tx;
        let bottom = self.values[[r1, c0]] * (1.0 - tx) + self.values[[r1, c1]] * tx;
        top * (1.0 - ty) + bottom * ty
    }
}

fn bracket(position: f64, origin: f64, spacing: f64, len: usize) -> (usize, usize, f64) {
    if spacing <= 0.0 || !position.is_finite() {
        return (0, 0, 0.0);
    }
    let last = (len - 1) as f64;
    let index = ((position - origin) / spacing).clamp(0.0, last);
    let lower = index.floor();
    let upper = (lower + 1.0).min(last);
    (lower as usize, upper as usize, index - lower)
}

fn padded_bounds(points: &[(f64, f64)], radius: f64) -> ([f64; 2], [f64; 2]) {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for (x, y) in points {
        min[0] = min[0].min(*x);
        min[1] = min[1].min(*y);
        max[0] = max[0].max(*x);
        max[1] = max[1].max(*y);
    }
    (
        [min[0] - radius, min[1] - radius],
        [max[0] + radius, max[1] + radius],
    )
}
