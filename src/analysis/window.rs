use ndarray::{Array2, ArrayView2, Zip, s};

use super::{AnalysisError, Result};

pub type ReducedGrid = Array2<f64>;

/// Block-averages `grid` with `window`-sized tiles. Tiles on the bottom and
/// right edges keep whatever rows/columns remain and are averaged over those,
/// so the output is `ceil(H / window) x ceil(W / window)`.
pub fn reduce_mean(grid: ArrayView2<'_, f64>, window: usize) -> Result<ReducedGrid> {
    if window == 0 {
        return Err(AnalysisError::InvalidParameter(
            "window size must be a positive integer".to_string(),
        ));
    }
    let (height, width) = grid.dim();
    let mut reduced = Array2::zeros((height.div_ceil(window), width.div_ceil(window)));
    Zip::indexed(&mut reduced).par_for_each(|(row, column), cell| {
        let top = row * window;
        let left = column * window;
        let block = grid.slice(s![
            top..(top + window).min(height),
            left..(left + window).min(width)
        ]);
        *cell = block.sum() / block.len() as f64;
    });
    Ok(reduced)
}
