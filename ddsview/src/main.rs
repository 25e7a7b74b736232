mod capture;
mod cli;

#[cfg(windows)]
mod app;
#[cfg(windows)]
mod dialog;
#[cfg(windows)]
mod error;
#[cfg(windows)]
mod shader;
#[cfg(windows)]
mod texture;
#[cfg(windows)]
mod window;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

#[cfg(windows)]
fn main() -> ExitCode {
    init_tracing();

    let args = cli::Args::parse();
    match window::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(windows))]
fn main() -> ExitCode {
    init_tracing();

    let _ = cli::Args::parse();
    tracing::error!("ddsview requires Windows (Direct3D 11)");
    ExitCode::FAILURE
}
