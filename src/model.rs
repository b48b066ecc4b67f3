mod error;
mod pixel;
mod point;
mod raster;


pub use error::{CoreError, Result};
pub use pixel::PixelType;
pub use point::{Point, SampleRecord, round_half_even};
pub use raster::{Extent, Raster, value_range};
