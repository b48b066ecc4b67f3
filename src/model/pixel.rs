use serde::{Deserialize, Serialize};

/// Storage type of the file a raster was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PixelType {
    U8,
    U16,
    #[default]
    F32,
}
