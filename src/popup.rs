//! End-of-interval prompt with slide/fade animation and an auto-close deadline.
//!
//! Geometry is expressed in abstract points: the popup rests at offset 0 and
//! starts [`SLIDE_START_OFFSET`] points below that. The renderer maps points
//! to terminal rows.

use std::time::Duration;

use crate::schedule::Ticker;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

pub const SLIDE_FRAME: Duration = Duration::from_millis(20);
pub const FADE_FRAME: Duration = Duration::from_millis(50);

pub const SLIDE_START_OFFSET: f32 = 250.0;
/// Distance from the resting position to the screen edge
pub const OFFSCREEN_OFFSET: f32 = 200.0;
pub const MAX_OPACITY: f32 = 0.95;

const SLIDE_IN_STEP: f32 = 8.0;
const FADE_IN_STEP: f32 = 0.05;
const SLIDE_OUT_STEP: f32 = 12.0;
const SLIDE_OUT_FADE_STEP: f32 = 0.08;
const FADE_OUT_STEP: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PopupPhase {
    #[default]
    SlidingIn,
    Visible,
    FadingOut,
    Closed,
}

/// How the popup leaves the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseKind {
    /// Deadline reached: fade out where it stands
    Timeout,
    /// User answered: slide down while fading
    UserAction,
}

impl CloseKind {
    fn frame_period(self) -> Duration {
        match self {
            CloseKind::Timeout => FADE_FRAME,
            CloseKind::UserAction => SLIDE_FRAME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    /// Slide-in finished
    Settled,
    /// Deadline reached before the user answered
    AutoClosing,
    Closed,
}

/// A transient prompt offering to start the next interval.
///
/// `A` is the action handed back when the user accepts; it is yielded at most
/// once, and never when the popup times out.
#[derive(Debug)]
pub struct NotificationPopup<A> {
    message: String,
    on_accept: Option<A>,
    phase: PopupPhase,
    close_kind: Option<CloseKind>,
    elapsed: Duration,
    timeout: Duration,
    offset: f32,
    opacity: f32,
    frames: Ticker,
}

impl<A> NotificationPopup<A> {
    pub fn new(message: impl Into<String>, on_accept: A, timeout: Duration) -> Self {
        Self {
            message: message.into(),
            on_accept: Some(on_accept),
            phase: PopupPhase::SlidingIn,
            close_kind: None,
            elapsed: Duration::ZERO,
            timeout,
            offset: SLIDE_START_OFFSET,
            opacity: 0.0,
            frames: Ticker::new(SLIDE_FRAME),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> PopupPhase {
        self.phase
    }

    pub fn close_kind(&self) -> Option<CloseKind> {
        self.close_kind
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn opacity(&self) -> f32 {
        self.opacity.clamp(0.0, 1.0)
    }

    pub fn is_closed(&self) -> bool {
        self.phase == PopupPhase::Closed
    }

    /// Accept/defer are only honoured before the close sequence starts.
    pub fn is_interactive(&self) -> bool {
        matches!(self.phase, PopupPhase::SlidingIn | PopupPhase::Visible)
    }

    pub fn time_left(&self) -> Duration {
        self.timeout.saturating_sub(self.elapsed)
    }

    /// Time left before auto-close, as a fraction from 1.0 down to 0.0
    pub fn progress_fraction(&self) -> f64 {
        if self.timeout.is_zero() {
            return 0.0;
        }
        let spent = self.elapsed.as_secs_f64() / self.timeout.as_secs_f64();
        (1.0 - spent).clamp(0.0, 1.0)
    }

    /// User chose to start the next interval. Returns the stored action the
    /// first time only.
    pub fn accept(&mut self) -> Option<A> {
        if !self.begin_close(CloseKind::UserAction) {
            return None;
        }
        self.on_accept.take()
    }

    /// User chose "later". Returns whether the popup started closing.
    pub fn defer(&mut self) -> bool {
        self.begin_close(CloseKind::UserAction)
    }

    /// Advance the deadline and whichever animation is active.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<PopupEvent> {
        let mut events = Vec::new();
        if self.is_closed() {
            return events;
        }

        if self.is_interactive() {
            self.elapsed = (self.elapsed + elapsed).min(self.timeout);
            if self.elapsed >= self.timeout {
                self.begin_close(CloseKind::Timeout);
                events.push(PopupEvent::AutoClosing);
                return events;
            }
        }

        for _ in 0..self.frames.advance(elapsed) {
            if let Some(event) = self.step() {
                events.push(event);
            }
            if self.is_closed() {
                break;
            }
        }
        events
    }

    fn begin_close(&mut self, kind: CloseKind) -> bool {
        if !self.is_interactive() {
            return false;
        }
        log::debug!("popup closing ({:?}): {}", kind, self.message);
        self.phase = PopupPhase::FadingOut;
        self.close_kind = Some(kind);
        self.frames.reset(kind.frame_period());
        true
    }

    fn step(&mut self) -> Option<PopupEvent> {
        match (self.phase, self.close_kind) {
            (PopupPhase::SlidingIn, _) => {
                self.offset -= SLIDE_IN_STEP;
                self.opacity = (self.opacity + FADE_IN_STEP).min(MAX_OPACITY);
                if self.offset <= 0.0 {
                    self.offset = 0.0;
                    self.opacity = MAX_OPACITY;
                    self.phase = PopupPhase::Visible;
                    return Some(PopupEvent::Settled);
                }
                None
            }
            (PopupPhase::FadingOut, Some(CloseKind::Timeout)) => {
                self.opacity -= FADE_OUT_STEP;
                if self.opacity <= 0.0 {
                    return Some(self.finish());
                }
                None
            }
            (PopupPhase::FadingOut, Some(CloseKind::UserAction)) => {
                self.offset += SLIDE_OUT_STEP;
                self.opacity -= SLIDE_OUT_FADE_STEP;
                if self.opacity <= 0.0 || self.offset > OFFSCREEN_OFFSET {
                    return Some(self.finish());
                }
                None
            }
            _ => None,
        }
    }

    fn finish(&mut self) -> PopupEvent {
        self.opacity = 0.0;
        self.phase = PopupPhase::Closed;
        PopupEvent::Closed
    }
}
