use std::fs::File;
use std::path::Path;

use clap::Parser;
use color_eyre::Result;
use env_logger::{Env, Target};

mod cli;
mod error;
mod models;
mod notification;
mod popup;
mod schedule;
mod timer;
mod tui;

use cli::Cli;

fn main() -> Result<()> {
    // Install color-eyre panic hook for better error messages
    color_eyre::install()?;

    let cli = Cli::parse();

    // Logging goes to a file only; stderr belongs to the TUI
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.config()?;
    tui::run_tui(&config)?;
    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}
