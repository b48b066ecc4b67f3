pub mod analysis;
pub mod annotations;
pub mod cli;
pub mod config;
pub mod formats;
pub mod model;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod workflow;

pub fn run_cli() -> Result<(), String> {
    cli::run_cli()
}
