use super::{AnalysisError, Result};

/// Equal-width histogram over the finite values of a sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub counts: Vec<usize>,
    pub min: f64,
    pub max: f64,
}

impl Histogram {
    pub fn new<'a>(values: impl IntoIterator<Item = &'a f64>, bins: usize) -> Result<Self> {
        if bins == 0 {
            return Err(AnalysisError::InvalidParameter(
                "histogram needs at least one bin".to_string(),
            ));
        }
        let finite = values
            .into_iter()
            .copied()
            .filter(|value| value.is_finite())
            .collect::<Vec<_>>();
        let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let (min, max) = if finite.is_empty() { (0.0, 0.0) } else { (min, max) };

        let mut histogram = Self {
            counts: vec![0; bins],
            min,
            max,
        };
        for value in finite {
            let bin = histogram.bin_of(value);
            histogram.counts[bin] += 1;
        }
        Ok(histogram)
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins() as f64
    }

    /// Bin holding `value`; the top edge belongs to the last bin.
    pub fn bin_of(&self, value: f64) -> usize {
        let width = self.bin_width();
        if width <= 0.0 {
            return 0;
        }
        let index = ((value - self.min) / width).floor();
        index.clamp(0.0, (self.bins() - 1) as f64) as usize
    }

    /// Value at a horizontal position of the plotted histogram, `0` being the
    /// left edge and `1` the right one.
    pub fn value_at_fraction(&self, fraction: f64) -> f64 {
        self.min + fraction.clamp(0.0, 1.0) * (self.max - self.min)
    }

    pub fn peak(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}
