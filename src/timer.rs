//! Countdown state machine shared by the work and break timers

/// Lifecycle state of an [`IntervalTimer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerState {
    #[default]
    Idle,
    Running,
    Paused,
    Expired,
}

impl TimerState {
    pub fn label(self) -> &'static str {
        match self {
            TimerState::Idle => "Ready",
            TimerState::Running => "Running",
            TimerState::Paused => "Paused",
            TimerState::Expired => "Finished",
        }
    }
}

/// What a timer operation changed, for the controller to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Started,
    Paused,
    Resumed,
    Stopped,
    Expired,
}

/// A one-second-resolution countdown.
///
/// Operations called outside their valid states do nothing and return `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalTimer {
    configured: u32,
    remaining: u32,
    state: TimerState,
}

impl IntervalTimer {
    /// An idle timer armed with `seconds` (at least one second).
    pub fn new(seconds: u32) -> Self {
        let seconds = seconds.max(1);
        Self {
            configured: seconds,
            remaining: seconds,
            state: TimerState::Idle,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn configured(&self) -> u32 {
        self.configured
    }

    /// (Re)start the countdown from `seconds`, whatever the current state.
    pub fn start(&mut self, seconds: u32) -> Option<TimerEvent> {
        if seconds == 0 {
            return None;
        }
        self.configured = seconds;
        self.remaining = seconds;
        self.state = TimerState::Running;
        Some(TimerEvent::Started)
    }

    pub fn pause_toggle(&mut self) -> Option<TimerEvent> {
        match self.state {
            TimerState::Running => {
                self.state = TimerState::Paused;
                Some(TimerEvent::Paused)
            }
            TimerState::Paused => {
                self.state = TimerState::Running;
                Some(TimerEvent::Resumed)
            }
            TimerState::Idle | TimerState::Expired => None,
        }
    }

    pub fn stop(&mut self) -> Option<TimerEvent> {
        if self.state == TimerState::Idle {
            return None;
        }
        self.remaining = self.configured;
        self.state = TimerState::Idle;
        Some(TimerEvent::Stopped)
    }

    /// Count down one second. Reports `Expired` on the tick that reaches zero.
    pub fn tick(&mut self) -> Option<TimerEvent> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.state = TimerState::Expired;
            return Some(TimerEvent::Expired);
        }
        None
    }

    /// Put an expired timer back to idle with its full duration, without starting it.
    pub fn rearm(&mut self) {
        if self.state == TimerState::Expired {
            self.remaining = self.configured;
            self.state = TimerState::Idle;
        }
    }

    pub fn can_start(&self) -> bool {
        self.state == TimerState::Idle
    }

    pub fn can_pause(&self) -> bool {
        matches!(self.state, TimerState::Running | TimerState::Paused)
    }

    pub fn can_stop(&self) -> bool {
        self.state != TimerState::Idle
    }

    /// Remaining time as `MM:SS`
    pub fn display(&self) -> String {
        format_time(self.remaining)
    }
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_time(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}
