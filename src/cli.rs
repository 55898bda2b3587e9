use std::path::PathBuf;

use clap::Parser;

use crate::error::TomatickError;
use crate::models::{CueBackend, MAX_POPUP_SECONDS, PomodoroConfig};

#[derive(Parser, Debug)]
#[command(name = "tomatick", version)]
#[command(about = "Pomodoro work/break timer for the terminal", long_about = None)]
pub struct Cli {
    /// Work interval length in minutes
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u32).range(1..=240))]
    pub work: u32,

    /// Break interval length in minutes
    #[arg(short = 'b', long = "break", default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=120))]
    pub break_minutes: u32,

    /// Seconds before an unanswered reminder closes itself
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..=MAX_POPUP_SECONDS))]
    pub popup_seconds: u64,

    /// Start with sounds muted
    #[arg(short, long)]
    pub muted: bool,

    /// How to play audio cues
    #[arg(long, value_enum, default_value_t = CueBackend::Bell)]
    pub cue: CueBackend,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn config(&self) -> Result<PomodoroConfig, TomatickError> {
        PomodoroConfig::new(
            self.work,
            self.break_minutes,
            self.popup_seconds,
            self.muted,
            self.cue,
        )
    }
}
