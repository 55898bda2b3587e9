use std::fmt;
use std::time::Duration;

use crate::error::TomatickError;
use crate::popup::DEFAULT_TIMEOUT;

/// Which of the two countdowns a timer, panel or cue belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalKind {
    Work,
    Break,
}

impl IntervalKind {
    pub const ALL: [IntervalKind; 2] = [IntervalKind::Work, IntervalKind::Break];

    /// The interval a finished one hands over to
    pub fn complement(self) -> Self {
        match self {
            IntervalKind::Work => IntervalKind::Break,
            IntervalKind::Break => IntervalKind::Work,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IntervalKind::Work => "Work",
            IntervalKind::Break => "Break",
        }
    }

    /// Largest duration the minutes input accepts
    pub fn max_minutes(self) -> u32 {
        match self {
            IntervalKind::Work => 240,
            IntervalKind::Break => 120,
        }
    }

    /// Prompt shown in the popup when this interval expires
    pub fn expiry_prompt(self) -> &'static str {
        match self {
            IntervalKind::Work => "Work time is over. Take a break?",
            IntervalKind::Break => "Break is over. Ready to get back to work?",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Backend used to play audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CueBackend {
    /// Ring the terminal bell
    #[default]
    Bell,
    /// Post a desktop notification with a sound (macOS)
    Desktop,
    /// Never play anything
    None,
}

pub const MAX_POPUP_SECONDS: u64 = 600;

/// Launch settings for a session
#[derive(Debug, Clone, PartialEq)]
pub struct PomodoroConfig {
    pub work_minutes: u32,  // default: 30
    pub break_minutes: u32, // default: 10
    pub popup_timeout: Duration,
    pub muted: bool,
    pub cue: CueBackend,
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: 30,
            break_minutes: 10,
            popup_timeout: DEFAULT_TIMEOUT,
            muted: false,
            cue: CueBackend::Bell,
        }
    }
}

impl PomodoroConfig {
    /// Build a config, rejecting durations outside the accepted ranges.
    pub fn new(
        work_minutes: u32,
        break_minutes: u32,
        popup_seconds: u64,
        muted: bool,
        cue: CueBackend,
    ) -> Result<Self, TomatickError> {
        check_minutes(IntervalKind::Work, work_minutes)?;
        check_minutes(IntervalKind::Break, break_minutes)?;
        if popup_seconds == 0 || popup_seconds > MAX_POPUP_SECONDS {
            return Err(TomatickError::InvalidTimeout {
                seconds: popup_seconds,
                max: MAX_POPUP_SECONDS,
            });
        }

        Ok(Self {
            work_minutes,
            break_minutes,
            popup_timeout: Duration::from_secs(popup_seconds),
            muted,
            cue,
        })
    }

    pub fn minutes(&self, kind: IntervalKind) -> u32 {
        match kind {
            IntervalKind::Work => self.work_minutes,
            IntervalKind::Break => self.break_minutes,
        }
    }

    /// Format config for display
    pub fn format_status(&self) -> String {
        format!(
            "{}m work, {}m break, popup {}s{}",
            self.work_minutes,
            self.break_minutes,
            self.popup_timeout.as_secs(),
            if self.muted { ", muted" } else { "" }
        )
    }
}

fn check_minutes(kind: IntervalKind, minutes: u32) -> Result<(), TomatickError> {
    if minutes == 0 || minutes > kind.max_minutes() {
        return Err(TomatickError::InvalidDuration {
            kind,
            minutes,
            max: kind.max_minutes(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_swaps_intervals() {
        assert_eq!(IntervalKind::Work.complement(), IntervalKind::Break);
        assert_eq!(IntervalKind::Break.complement(), IntervalKind::Work);
    }

    #[test]
    fn default_config_matches_launch_defaults() {
        let config = PomodoroConfig::default();
        assert_eq!(config.minutes(IntervalKind::Work), 30);
        assert_eq!(config.minutes(IntervalKind::Break), 10);
        assert_eq!(config.popup_timeout, Duration::from_secs(60));
        assert!(!config.muted);
    }

    #[test]
    fn new_accepts_range_edges() {
        let config = PomodoroConfig::new(240, 120, 600, true, CueBackend::None).unwrap();
        assert_eq!(config.work_minutes, 240);
        assert_eq!(config.break_minutes, 120);
        assert!(config.muted);

        assert!(PomodoroConfig::new(1, 1, 1, false, CueBackend::Bell).is_ok());
    }

    #[test]
    fn new_rejects_out_of_range_minutes() {
        let err = PomodoroConfig::new(241, 10, 60, false, CueBackend::Bell).unwrap_err();
        assert!(matches!(
            err,
            TomatickError::InvalidDuration {
                kind: IntervalKind::Work,
                minutes: 241,
                max: 240
            }
        ));

        let err = PomodoroConfig::new(30, 0, 60, false, CueBackend::Bell).unwrap_err();
        assert!(matches!(
            err,
            TomatickError::InvalidDuration {
                kind: IntervalKind::Break,
                ..
            }
        ));
        assert!(err.to_string().contains("Break"));
    }

    #[test]
    fn new_rejects_zero_popup_timeout() {
        let err = PomodoroConfig::new(30, 10, 0, false, CueBackend::Bell).unwrap_err();
        assert!(matches!(err, TomatickError::InvalidTimeout { seconds: 0, .. }));
    }

    #[test]
    fn format_status_mentions_mute() {
        let mut config = PomodoroConfig::default();
        assert_eq!(config.format_status(), "30m work, 10m break, popup 60s");
        config.muted = true;
        assert!(config.format_status().ends_with(", muted"));
    }
}
