mod density;
mod error;
mod histogram;
mod sampler;
mod stats;
mod threshold;
mod window;

#[cfg(test)]
mod tests;

pub use density::DensityField;
pub use error::{AnalysisError, Result};
pub use histogram::Histogram;
pub use sampler::{DensitySampler, Sampling};
pub use stats::{LinearFit, pearson};
pub use threshold::{Mask, threshold_mask};
pub use window::{ReducedGrid, reduce_mean};
