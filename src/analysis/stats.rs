use serde::{Deserialize, Serialize};

use super::{AnalysisError, Result};

/// Pearson correlation coefficient of two equally long samples.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Result<f64> {
    let moments = Moments::of(xs, ys)?;
    if moments.var_y <= 0.0 {
        return Err(AnalysisError::DegenerateFit(
            "second variable has zero variance".to_string(),
        ));
    }
    Ok(moments.cov / (moments.var_x * moments.var_y).sqrt())
}

/// Least-squares line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    pub fn fit(xs: &[f64], ys: &[f64]) -> Result<Self> {
        let moments = Moments::of(xs, ys)?;
        let slope = moments.cov / moments.var_x;
        Ok(Self {
            slope,
            intercept: moments.mean_y - slope * moments.mean_x,
        })
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

struct Moments {
    mean_x: f64,
    mean_y: f64,
    var_x: f64,
    var_y: f64,
    cov: f64,
}

impl Moments {
    fn of(xs: &[f64], ys: &[f64]) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(AnalysisError::DegenerateFit(format!(
                "samples differ in length ({} vs {})",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(AnalysisError::DegenerateFit(format!(
                "need at least 2 points, got {}",
                xs.len()
            )));
        }
        if xs.iter().chain(ys).any(|value| !value.is_finite()) {
            return Err(AnalysisError::DegenerateFit(
                "samples contain non-finite values".to_string(),
            ));
        }
        let n = xs.len() as f64;
        let mean_x = xs.iter().sum::<f64>() / n;
        let mean_y = ys.iter().sum::<f64>() / n;
        let (mut var_x, mut var_y, mut cov) = (0.0, 0.0, 0.0);
        for (x, y) in xs.iter().zip(ys) {
            let dx = x - mean_x;
            let dy = y - mean_y;
            var_x += dx * dx;
            var_y += dy * dy;
            cov += dx * dy;
        }
        if var_x <= 0.0 {
            return Err(AnalysisError::DegenerateFit(
                "first variable has zero variance".to_string(),
            ));
        }
        Ok(Self {
            mean_x,
            mean_y,
            var_x,
            var_y,
            cov,
        })
    }
}
