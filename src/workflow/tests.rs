use std::sync::Arc;

use ndarray::Array2;
use tempfile::tempdir;

use super::{AnalysisReport, WorkflowError, load_settings, run_analysis, save_records, save_report};
use crate::analysis::AnalysisError;
use crate::annotations::{AnnotationError, AnnotationStore};
use crate::config::Settings;
use crate::model::{PixelType, Raster};

fn settings() -> Settings {
    Settings {
        radius: 20.0,
        density_dims: [20, 20],
        ..Settings::default()
    }
}

#[test]
fn analysis_correlates_density_with_intensity() {
    let raster = Raster::new(
        Array2::from_shape_fn((100, 100), |(_, column)| column as f32),
        PixelType::U8,
    )
    .expect("raster");
    let extent = raster.extent();
    let mut store = AnnotationStore::with_intensity_source(Arc::new(raster));
    for (x, y) in [(10.0, 10.0), (14.0, 12.0), (12.0, 15.0), (80.0, 80.0), (50.0, 20.0)] {
        store.add(x, y, None);
    }

    let output =
        run_analysis(&settings(), &store, Some(extent), Some("cells.png".into())).expect("run");
    let report = output.report;
    assert_eq!(report.count, 5);
    assert_eq!(report.records.len(), 5);
    assert_eq!(report.records[3].intensity, 80.0);
    assert!(report.correlation.is_some());
    assert!(report.fit.is_some());
    assert!(report.fit_error.is_none());
    assert!(report.title().starts_with("Corr. coeff:"));
}

#[test]
fn degenerate_fit_is_reported_not_raised() {
    let mut store = AnnotationStore::new();
    store.add(5.0, 5.0, Some(3.0));
    let output = run_analysis(&settings(), &store, None, None).expect("run");
    assert!(output.report.correlation.is_none());
    assert!(
        output
            .report
            .fit_error
            .as_deref()
            .is_some_and(|message| message.contains("at least 2"))
    );
    assert_eq!(output.report.title(), "Corr. coeff: n/a (n=1)");
}

#[test]
fn empty_store_is_a_recoverable_error() {
    let error = run_analysis(&settings(), &AnnotationStore::new(), None, None).expect_err("empty");
    assert!(matches!(
        error,
        WorkflowError::Analysis(AnalysisError::Annotations(AnnotationError::EmptySet))
    ));
}

#[test]
fn settings_load_from_yaml_and_json() {
    let dir = tempdir().expect("tempdir");
    let yaml = dir.path().join("settings.yaml");
    std::fs::write(&yaml, "radius: 35.5\nhistogram_bins: 12\n").expect("write");
    let loaded = load_settings(&yaml).expect("yaml");
    assert_eq!(loaded.radius, 35.5);
    assert_eq!(loaded.histogram_bins, 12);

    let json = dir.path().join("settings.json");
    std::fs::write(&json, r#"{"window": 0}"#).expect("write");
    assert!(matches!(
        load_settings(&json),
        Err(WorkflowError::Analysis(AnalysisError::InvalidParameter(_)))
    ));
}

#[test]
fn records_and_report_are_written() {
    let dir = tempdir().expect("tempdir");
    let mut store = AnnotationStore::new();
    store.add(10.0, 10.0, Some(4.0));
    store.add(12.0, 10.0, Some(6.0));
    let output = run_analysis(&settings(), &store, None, None).expect("run");

    let samples = dir.path().join("cells_samples.csv");
    save_records(&samples, &output.report.records).expect("records");
    let text = std::fs::read_to_string(&samples).expect("read");
    let lines = text.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("10,10,"));
    assert!(lines[1].ends_with(",6"));

    let report_path = dir.path().join("report.json");
    save_report(&report_path, &output.report).expect("report");
    let restored: AnalysisReport =
        serde_json::from_str(&std::fs::read_to_string(&report_path).expect("read"))
            .expect("parse");
    assert_eq!(restored, output.report);
}
