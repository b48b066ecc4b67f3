use std::fs;
use std::path::Path;

use crate::config::Settings;
use crate::formats::write_atomic;
use crate::model::SampleRecord;

use super::{AnalysisReport, Result};

fn is_yaml(path: &Path) -> bool {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    matches!(extension.as_str(), "yaml" | "yml")
}

pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let settings = if is_yaml(path) {
        serde_yaml::from_str::<Settings>(&raw)?
    } else {
        serde_json::from_str::<Settings>(&raw)?
    };
    settings.validate()?;
    Ok(settings)
}

pub fn save_report(path: impl AsRef<Path>, report: &AnalysisReport) -> Result<()> {
    let path = path.as_ref();
    let serialized = if is_yaml(path) {
        serde_yaml::to_string(report)?
    } else {
        serde_json::to_string_pretty(report)?
    };
    write_atomic(path, serialized.as_bytes())?;
    Ok(())
}

/// `x,y,density,intensity` rows without a header.
pub fn save_records(path: impl AsRef<Path>, records: &[SampleRecord]) -> Result<()> {
    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{},{},{},{}\n",
            record.x, record.y, record.density, record.intensity
        ));
    }
    write_atomic(path.as_ref(), out.as_bytes())?;
    Ok(())
}
