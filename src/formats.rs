mod api;
mod error;
mod naming;
mod raster;
mod tiff;
mod util;


pub use api::{read_raster, supported_formats, write_density_png, write_grid};
pub use error::{IoError, Result};
pub use naming::OutputPaths;
pub use util::write_atomic;
pub(crate) use util::color_ramp;
