use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use flexi_logger::{Logger, LoggerHandle};
use serde_json::json;

use crate::annotations::AnnotationStore;
use crate::config::Settings;
use crate::formats::{OutputPaths, write_grid};
use crate::runtime::{AppContext, ImagePair, Result};
use crate::session::{
    AnnotationController, EventScript, Flow, RecordingCanvas, ThresholdExplorer, hit_test,
};
use crate::ui;
use crate::workflow::{load_settings, save_report};

use super::types::{Cli, Commands};

pub fn run_cli() -> std::result::Result<(), String> {
    let cli = Cli::parse();
    let _logger = setup_logging(&cli.log_level)?;
    run(cli).map_err(|error| {
        log::error!("{error}");
        error.to_string()
    })
}

fn setup_logging(level: &str) -> std::result::Result<LoggerHandle, String> {
    Logger::try_with_env_or_str(level)
        .and_then(|logger| logger.log_to_stderr().start())
        .map_err(|error| format!("logger initialization failed: {error}"))
}

fn run(cli: Cli) -> Result<()> {
    let settings = resolve_settings(cli.config.as_deref(), &cli.command)?;
    let app = AppContext::new(settings);

    match cli.command {
        Commands::Annotate {
            image,
            intensity,
            init,
            ..
        } => annotate(&app, &image, intensity.as_deref(), init),
        Commands::Analyze {
            image,
            intensity,
            annotations,
            report,
            ..
        } => analyze(&app, &image, intensity.as_deref(), annotations, report),
        Commands::Replay {
            image,
            intensity,
            events,
            init,
        } => replay(&app, &image, intensity.as_deref(), &events, init),
        Commands::Threshold { image, .. } => threshold(&app, &image),
        Commands::Reduce {
            image,
            threshold,
            output,
            ..
        } => reduce(&app, &image, threshold, &output),
    }
}

pub(super) fn resolve_settings(config: Option<&Path>, command: &Commands) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    if let Some(radius) = command.radius() {
        settings.radius = radius;
    }
    if let Some(window) = command.window() {
        settings.window = window;
    }
    settings.validate()?;
    Ok(settings)
}

/// Store for `images`, seeded from `init` or from the data file a previous
/// session wrote next to the image. Returns a message when seeding failed.
fn seeded_store(
    app: &AppContext,
    images: &ImagePair,
    paths: &OutputPaths,
    init: Option<PathBuf>,
) -> (AnnotationStore, Option<String>) {
    let mut store = images.empty_store();
    let message = match init {
        Some(path) => app.io_service().load_annotations(&mut store, &path),
        None if paths.annotations.exists() => app
            .io_service()
            .load_annotations(&mut store, &paths.annotations),
        None => None,
    };
    if let Some(message) = &message {
        log::warn!("{message}");
    }
    (store, message)
}

fn annotate(
    app: &AppContext,
    image: &Path,
    intensity: Option<&Path>,
    init: Option<PathBuf>,
) -> Result<()> {
    let images = app.io_service().read_pair(image, intensity)?;
    let paths = OutputPaths::derive(image, app.settings());
    let (store, message) = seeded_store(app, &images, &paths, init);
    log::info!("annotating {} ({} points loaded)", image.display(), store.len());

    let controller =
        AnnotationController::new(store, app.settings(), &paths.annotations, images.is_dual());
    let store = ui::run_annotator(controller, &images, app.settings(), message)?;

    let output = app.analysis_service().analyze(&store, &images)?;
    app.analysis_service().write_outputs(&output, &store, &paths)?;
    log::info!("{}", output.report.title());
    ui::show_results(output, &store, &images, app.settings())?;
    Ok(())
}

pub(super) fn analyze(
    app: &AppContext,
    image: &Path,
    intensity: Option<&Path>,
    annotations: Option<PathBuf>,
    report: Option<PathBuf>,
) -> Result<()> {
    let images = app.io_service().read_pair(image, intensity)?;
    let paths = OutputPaths::derive(image, app.settings());
    let annotations = annotations.unwrap_or_else(|| paths.annotations.clone());

    let mut store = images.empty_store();
    if let Some(message) = app.io_service().load_annotations(&mut store, &annotations) {
        log::warn!("{message}");
    }

    let output = app.analysis_service().analyze(&store, &images)?;
    app.analysis_service().write_outputs(&output, &store, &paths)?;
    if let Some(report_path) = report {
        save_report(&report_path, &output.report)?;
    }
    println!("{}", serde_json::to_string_pretty(&output.report)?);
    Ok(())
}

fn replay(
    app: &AppContext,
    image: &Path,
    intensity: Option<&Path>,
    events: &Path,
    init: Option<PathBuf>,
) -> Result<()> {
    let images = app.io_service().read_pair(image, intensity)?;
    let paths = OutputPaths::derive(image, app.settings());
    let script = EventScript::load(events)?;
    let (store, _) = seeded_store(app, &images, &paths, init);

    let mut controller =
        AnnotationController::new(store, app.settings(), &paths.annotations, images.is_dual());
    let mut canvas = RecordingCanvas::default();
    controller.start(&mut canvas);

    let extent = images.extent();
    let tolerance = f64::from(app.settings().pick_tolerance);
    let flow = script.replay(&mut controller, &mut canvas, |controller, position| {
        hit_test(controller.store().points(), position, tolerance, extent)
    });
    if flow == Flow::Continue {
        controller.shutdown(&mut canvas);
    }

    let statuses = canvas
        .statuses
        .iter()
        .map(|status| status.message.clone())
        .collect::<Vec<_>>();
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "events": script.actions().len(),
            "quit": flow == Flow::Quit,
            "points": controller.store().len(),
            "output": controller.output(),
            "statuses": statuses,
        }))?
    );
    Ok(())
}

fn threshold(app: &AppContext, image: &Path) -> Result<()> {
    let raster = app.io_service().read_raster(image)?;
    if let Some((min, max)) = raster.min_max() {
        log::debug!("{} spans {min}..{max}", image.display());
    }
    let grid = app.analysis_service().reduce(&raster)?;
    let histogram = app.analysis_service().histogram(&grid)?;
    log::info!(
        "reduced {} to {}x{} windows",
        image.display(),
        grid.ncols(),
        grid.nrows()
    );
    ui::run_explorer(
        ThresholdExplorer::new(grid),
        Arc::new(raster),
        histogram,
        app.settings(),
    )?;
    Ok(())
}

fn reduce(app: &AppContext, image: &Path, threshold: Option<f64>, output: &Path) -> Result<()> {
    let raster = app.io_service().read_raster(image)?;
    let grid = app.analysis_service().reduce(&raster)?;
    let grid = match threshold {
        Some(value) => app.analysis_service().mask_grid(&grid, value),
        None => grid,
    };
    write_grid(output, &grid)?;
    println!(
        "{}",
        json!({
            "status": "ok",
            "output": output,
            "rows": grid.nrows(),
            "columns": grid.ncols(),
            "threshold": threshold,
        })
    );
    Ok(())
}
