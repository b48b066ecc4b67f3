use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "cellpick",
    version,
    about = "Click cells on microscopy images and correlate local density with intensity"
)]
pub(super) struct Cli {
    /// Settings file (YAML or JSON).
    #[arg(long, global = true)]
    pub(super) config: Option<PathBuf>,

    /// Log filter, e.g. `info` or `cellpick=debug`. `RUST_LOG` takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub(super) log_level: String,

    #[command(subcommand)]
    pub(super) command: Commands,
}

#[derive(Debug, Subcommand)]
pub(super) enum Commands {
    /// Opens the annotation window; analyses the points once it is closed.
    Annotate {
        image: PathBuf,
        /// Registered channel to measure intensities in.
        intensity: Option<PathBuf>,
        #[arg(long)]
        radius: Option<f64>,
        /// Points to start from; defaults to the data file next to the image.
        #[arg(long)]
        init: Option<PathBuf>,
    },
    /// Analyses a saved annotation file without opening a window.
    Analyze {
        image: PathBuf,
        intensity: Option<PathBuf>,
        #[arg(long)]
        annotations: Option<PathBuf>,
        #[arg(long)]
        radius: Option<f64>,
        /// Where to write the report (`.json`, `.yaml` or `.yml`).
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Drives an annotation session from an event script.
    Replay {
        image: PathBuf,
        intensity: Option<PathBuf>,
        #[arg(long)]
        events: PathBuf,
        #[arg(long)]
        init: Option<PathBuf>,
    },
    /// Opens the threshold explorer on the windowed means of an image.
    Threshold {
        image: PathBuf,
        #[arg(long)]
        window: Option<usize>,
    },
    /// Writes the windowed means of an image, or their mask with `--threshold`.
    Reduce {
        image: PathBuf,
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        threshold: Option<f64>,
        #[arg(long)]
        output: PathBuf,
    },
}

impl Commands {
    pub(super) fn radius(&self) -> Option<f64> {
        match self {
            Self::Annotate { radius, .. } | Self::Analyze { radius, .. } => *radius,
            _ => None,
        }
    }

    pub(super) fn window(&self) -> Option<usize> {
        match self {
            Self::Threshold { window, .. } | Self::Reduce { window, .. } => *window,
            _ => None,
        }
    }
}
