mod annotator;
mod explorer;
mod results;
mod view;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use eframe::egui;

use crate::analysis::Histogram;
use crate::annotations::AnnotationStore;
use crate::config::Settings;
use crate::model::Raster;
use crate::runtime::ImagePair;
use crate::session::{AnnotationController, ThresholdExplorer};
use crate::workflow::AnalysisOutput;

use annotator::AnnotatorApp;
use explorer::ExplorerApp;
use results::ResultsApp;

const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 800.0];

fn native_options(title: &str) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title)
            .with_inner_size(DEFAULT_WINDOW_SIZE)
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    }
}

/// Opens the annotation window and blocks until it is closed. Returns the
/// points as they were when the session ended.
pub fn run_annotator(
    controller: AnnotationController,
    images: &ImagePair,
    settings: &Settings,
    startup_message: Option<String>,
) -> eframe::Result<AnnotationStore> {
    let latest = Rc::new(RefCell::new(controller.store().clone()));
    let app_latest = Rc::clone(&latest);
    let images = images.clone();
    let tolerance = settings.pick_tolerance;
    let title = format!("cellpick - {}", images.label().unwrap_or_default());
    eframe::run_native(
        "cellpick annotate",
        native_options(&title),
        Box::new(move |cc| {
            Ok(Box::new(AnnotatorApp::new(
                cc,
                controller,
                &images,
                tolerance,
                startup_message,
                app_latest,
            )))
        }),
    )?;
    let store = latest.borrow().clone();
    Ok(store)
}

/// Density map next to the density/intensity scatter plot.
pub fn show_results(
    output: AnalysisOutput,
    store: &AnnotationStore,
    images: &ImagePair,
    settings: &Settings,
) -> eframe::Result<()> {
    let points = store.points().to_vec();
    let extent = images.extent();
    let style = settings.point_style();
    eframe::run_native(
        "cellpick results",
        native_options("cellpick - results"),
        Box::new(move |cc| Ok(Box::new(ResultsApp::new(cc, output, points, extent, style)))),
    )
}

/// Source image, thresholded mask and the histogram to pick thresholds on.
pub fn run_explorer(
    explorer: ThresholdExplorer,
    raster: Arc<Raster>,
    histogram: Histogram,
    settings: &Settings,
) -> eframe::Result<()> {
    let window = settings.window;
    eframe::run_native(
        "cellpick threshold",
        native_options("cellpick - threshold explorer"),
        Box::new(move |cc| {
            Ok(Box::new(ExplorerApp::new(
                cc, explorer, &raster, histogram, window,
            )))
        }),
    )
}
