use std::path::{Path, PathBuf};

use crate::config::Settings;

use super::supported_formats;

/// File names derived from an input image: annotations, per-point samples
/// and the rendered density map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub annotations: PathBuf,
    pub samples: PathBuf,
    pub screenshot: PathBuf,
}

impl OutputPaths {
    pub fn derive(image: &Path, settings: &Settings) -> Self {
        let base = strip_image_extension(image);
        Self {
            annotations: with_suffix(&base, &settings.data_suffix),
            samples: with_suffix(&base, &settings.samples_suffix),
            screenshot: with_suffix(&base, &settings.screenshot_suffix),
        }
    }
}

fn strip_image_extension(image: &Path) -> PathBuf {
    let known = image
        .extension()
        .and_then(|value| value.to_str())
        .map(|value| supported_formats().contains(&value.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    if known {
        image.with_extension("")
    } else {
        image.to_path_buf()
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
