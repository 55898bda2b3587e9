//! Audio cues for interval start and end

use std::io::{self, Write};

#[cfg(target_os = "macos")]
use notify_rust::Notification;

use crate::models::{CueBackend, IntervalKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    IntervalStarted(IntervalKind),
    IntervalFinished(IntervalKind),
}

impl Cue {
    pub fn body(self) -> &'static str {
        match self {
            Cue::IntervalStarted(IntervalKind::Work) => "Work period started. Focus!",
            Cue::IntervalStarted(IntervalKind::Break) => "Break started. Step away for a bit.",
            Cue::IntervalFinished(IntervalKind::Work) => "Work period complete! Time for a break.",
            Cue::IntervalFinished(IntervalKind::Break) => {
                "Break complete! Ready to resume work?"
            }
        }
    }
}

/// Fire-and-forget sound player. Muting is decided by the caller.
pub trait CuePlayer {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell on the wrapped writer
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        let result = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
        if let Err(e) = result {
            log::warn!("failed to ring bell for {:?}: {}", cue, e);
        }
    }
}

/// Posts a desktop notification with a sound. Only macOS has a backend;
/// elsewhere it falls back to the terminal bell.
pub struct DesktopNotifier {
    #[cfg_attr(target_os = "macos", allow(dead_code))]
    fallback: TerminalBell<io::Stdout>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            fallback: TerminalBell::new(io::stdout()),
        }
    }
}

impl CuePlayer for DesktopNotifier {
    #[cfg(target_os = "macos")]
    fn play(&mut self, cue: Cue) {
        if let Err(e) = Notification::new()
            .summary("Tomatick - Pomodoro")
            .body(cue.body())
            .sound_name("Glass")
            .show()
        {
            log::warn!("failed to send notification: {}", e);
        }
    }

    #[cfg(not(target_os = "macos"))]
    fn play(&mut self, cue: Cue) {
        self.fallback.play(cue);
    }
}

/// Plays nothing
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Build the player for the configured backend
pub fn player_for(backend: CueBackend) -> Box<dyn CuePlayer> {
    match backend {
        CueBackend::Bell => Box::new(TerminalBell::new(io::stdout())),
        CueBackend::Desktop => Box::new(DesktopNotifier::new()),
        CueBackend::None => Box::new(Silent),
    }
}
