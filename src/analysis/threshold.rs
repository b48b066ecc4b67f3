use ndarray::{Array2, Zip};

pub type Mask = Array2<bool>;

/// Cells strictly above `value`.
pub fn threshold_mask(grid: &Array2<f64>, value: f64) -> Mask {
    let mut mask = Array2::from_elem(grid.dim(), false);
    Zip::from(&mut mask)
        .and(grid)
        .par_for_each(|flag, cell| *flag = *cell > value);
    mask
}
