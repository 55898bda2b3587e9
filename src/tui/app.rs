use std::time::Duration;

use chrono::Local;

use crate::models::{IntervalKind, PomodoroConfig};
use crate::notification::{Cue, CuePlayer};
use crate::popup::{NotificationPopup, PopupEvent};
use crate::schedule::Ticker;
use crate::timer::{IntervalTimer, TimerEvent, TimerState};

/// Running state of the application
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RunningState {
    #[default]
    Running,
    Done,
}

/// One countdown with its one-second ticker and the minutes input beside it
#[derive(Debug)]
pub struct TimerPanel {
    pub timer: IntervalTimer,
    pub minutes_input: u32,
    ticker: Ticker,
}

impl TimerPanel {
    fn new(kind: IntervalKind, minutes: u32) -> Self {
        let minutes = minutes.clamp(1, kind.max_minutes());
        Self {
            timer: IntervalTimer::new(minutes * 60),
            minutes_input: minutes,
            ticker: Ticker::new(Duration::from_secs(1)),
        }
    }
}

pub type Popup = NotificationPopup<Message>;

/// Main application state
pub struct App {
    // Core state
    pub running_state: RunningState,
    pub focus: IntervalKind,

    // Timers
    pub work: TimerPanel,
    pub rest: TimerPanel,

    // Popups, oldest first
    pub popups: Vec<Popup>,
    popup_timeout: Duration,

    // Audio
    pub muted: bool,
    cues: Box<dyn CuePlayer>,

    // UI state
    pub show_help: bool,
    pub status_message: Option<String>,
}

/// All possible application messages/events
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // Navigation
    Focus(IntervalKind),
    FocusNext,
    Quit,

    // Timer actions
    Start(IntervalKind),
    PauseToggle(IntervalKind),
    Stop(IntervalKind),
    AdjustMinutes(IntervalKind, i32),

    // Popup actions
    AcceptPopup,
    DeferPopup,

    // UI
    ToggleMute,
    ToggleHelp,
    ClearStatus,
    Tick(Duration),
}

impl App {
    pub fn new(config: &PomodoroConfig, cues: Box<dyn CuePlayer>) -> Self {
        Self {
            running_state: RunningState::Running,
            focus: IntervalKind::Work,
            work: TimerPanel::new(IntervalKind::Work, config.minutes(IntervalKind::Work)),
            rest: TimerPanel::new(IntervalKind::Break, config.minutes(IntervalKind::Break)),
            popups: Vec::new(),
            popup_timeout: config.popup_timeout,
            muted: config.muted,
            cues,
            show_help: false,
            status_message: Some(config.format_status()),
        }
    }

    pub fn panel(&self, kind: IntervalKind) -> &TimerPanel {
        match kind {
            IntervalKind::Work => &self.work,
            IntervalKind::Break => &self.rest,
        }
    }

    fn panel_mut(&mut self, kind: IntervalKind) -> &mut TimerPanel {
        match kind {
            IntervalKind::Work => &mut self.work,
            IntervalKind::Break => &mut self.rest,
        }
    }

    /// Newest popup that still accepts input
    pub fn active_popup(&self) -> Option<&Popup> {
        self.popups.iter().rev().find(|p| p.is_interactive())
    }

    fn active_popup_mut(&mut self) -> Option<&mut Popup> {
        self.popups.iter_mut().rev().find(|p| p.is_interactive())
    }

    /// Core update function
    pub fn update(&mut self, msg: Message) -> Option<Message> {
        match msg {
            // Navigation
            Message::Focus(kind) => {
                self.focus = kind;
                None
            }
            Message::FocusNext => {
                self.focus = self.focus.complement();
                None
            }
            Message::Quit => {
                self.running_state = RunningState::Done;
                None
            }

            // Timer actions
            Message::Start(kind) => {
                let panel = self.panel_mut(kind);
                let seconds = panel.minutes_input * 60;
                panel.ticker.cancel();
                let event = panel.timer.start(seconds);
                self.handle_timer_event(kind, event);
                None
            }
            Message::PauseToggle(kind) => {
                let panel = self.panel_mut(kind);
                panel.ticker.cancel();
                let event = panel.timer.pause_toggle();
                self.handle_timer_event(kind, event);
                None
            }
            Message::Stop(kind) => {
                let panel = self.panel_mut(kind);
                panel.ticker.cancel();
                let event = panel.timer.stop();
                self.handle_timer_event(kind, event);
                None
            }
            Message::AdjustMinutes(kind, delta) => {
                let panel = self.panel_mut(kind);
                let adjusted = panel.minutes_input as i64 + delta as i64;
                panel.minutes_input = adjusted.clamp(1, kind.max_minutes() as i64) as u32;
                None
            }

            // Popup actions
            Message::AcceptPopup => {
                let popup = self.active_popup_mut()?;
                let action = popup.accept();
                log::info!("popup accepted: {:?}", action);
                action
            }
            Message::DeferPopup => {
                if let Some(popup) = self.active_popup_mut() {
                    popup.defer();
                    log::info!("popup deferred");
                }
                None
            }

            // UI
            Message::ToggleMute => {
                self.muted = !self.muted;
                let label = if self.muted { "Sound muted" } else { "Sound on" };
                self.status_message = Some(label.to_string());
                None
            }
            Message::ToggleHelp => {
                self.show_help = !self.show_help;
                None
            }
            Message::ClearStatus => {
                self.status_message = None;
                None
            }
            Message::Tick(elapsed) => {
                // popups first so one spawned by an expiry starts aging next tick
                self.tick_popups(elapsed);
                for kind in IntervalKind::ALL {
                    self.tick_timer(kind, elapsed);
                }
                None
            }
        }
    }

    fn tick_timer(&mut self, kind: IntervalKind, elapsed: Duration) {
        let panel = self.panel_mut(kind);
        if panel.timer.state() != TimerState::Running {
            return;
        }

        let mut expired = false;
        for _ in 0..panel.ticker.advance(elapsed) {
            if panel.timer.tick() == Some(TimerEvent::Expired) {
                expired = true;
                break;
            }
        }

        if expired {
            self.handle_timer_event(kind, Some(TimerEvent::Expired));
        }
    }

    fn tick_popups(&mut self, elapsed: Duration) {
        for popup in &mut self.popups {
            for event in popup.tick(elapsed) {
                match event {
                    PopupEvent::Settled => log::debug!("popup visible: {}", popup.message()),
                    PopupEvent::AutoClosing => log::info!("popup timed out: {}", popup.message()),
                    PopupEvent::Closed => log::debug!("popup closed: {}", popup.message()),
                }
            }
        }
        self.popups.retain(|p| !p.is_closed());
    }

    fn handle_timer_event(&mut self, kind: IntervalKind, event: Option<TimerEvent>) {
        let Some(event) = event else {
            return;
        };

        match event {
            TimerEvent::Started => {
                let display = self.panel(kind).timer.display();
                log::info!("{} interval started ({})", kind, display);
                self.play(Cue::IntervalStarted(kind));
                self.status_message = Some(format!("{} timer started", kind));
            }
            TimerEvent::Paused => {
                log::info!("{} interval paused", kind);
                self.status_message = Some(format!("{} timer paused", kind));
            }
            TimerEvent::Resumed => {
                log::info!("{} interval resumed", kind);
                self.status_message = Some(format!("{} timer resumed", kind));
            }
            TimerEvent::Stopped => {
                log::info!("{} interval stopped", kind);
                self.status_message = Some(format!("{} timer stopped", kind));
            }
            TimerEvent::Expired => {
                log::info!("{} interval finished", kind);
                self.play(Cue::IntervalFinished(kind));
                self.status_message = Some(format!(
                    "{} interval finished at {}",
                    kind,
                    Local::now().format("%H:%M")
                ));
                self.popups.push(NotificationPopup::new(
                    kind.expiry_prompt(),
                    Message::Start(kind.complement()),
                    self.popup_timeout,
                ));

                let panel = self.panel_mut(kind);
                panel.timer.rearm();
                panel.ticker.cancel();
            }
        }
    }

    fn play(&mut self, cue: Cue) {
        if self.muted {
            return;
        }
        log::debug!("cue: {}", cue.body());
        self.cues.play(cue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CueBackend;
    use crate::popup::PopupPhase;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl CuePlayer for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn app_with(config: PomodoroConfig) -> (App, Recorder) {
        let recorder = Recorder::default();
        let app = App::new(&config, Box::new(recorder.clone()));
        (app, recorder)
    }

    fn app() -> (App, Recorder) {
        app_with(PomodoroConfig::default())
    }

    /// Dispatch a message and any follow-ups, the way the event loop does
    fn dispatch(app: &mut App, msg: Message) {
        let mut current = Some(msg);
        while let Some(m) = current {
            current = app.update(m);
        }
    }

    fn one_minute_work(app: &mut App) {
        app.work.minutes_input = 1;
        dispatch(app, Message::Start(IntervalKind::Work));
    }

    #[test]
    fn new_app_uses_config_durations() {
        let config = PomodoroConfig::new(25, 5, 60, false, CueBackend::None).unwrap();
        let (app, _) = app_with(config);
        assert_eq!(app.work.timer.remaining(), 25 * 60);
        assert_eq!(app.rest.timer.remaining(), 5 * 60);
        assert_eq!(app.work.timer.display(), "25:00");
        assert_eq!(app.focus, IntervalKind::Work);
    }

    #[test]
    fn start_uses_minutes_input_and_plays_cue() {
        let (mut app, cues) = app();
        app.rest.minutes_input = 3;
        dispatch(&mut app, Message::Start(IntervalKind::Break));

        assert_eq!(app.rest.timer.state(), TimerState::Running);
        assert_eq!(app.rest.timer.remaining(), 180);
        assert_eq!(
            cues.0.borrow().as_slice(),
            &[Cue::IntervalStarted(IntervalKind::Break)]
        );
        assert_eq!(app.work.timer.state(), TimerState::Idle);
    }

    #[test]
    fn minutes_edit_does_not_touch_running_timer() {
        let (mut app, _) = app();
        dispatch(&mut app, Message::Start(IntervalKind::Work));
        dispatch(&mut app, Message::AdjustMinutes(IntervalKind::Work, 5));

        assert_eq!(app.work.minutes_input, 35);
        assert_eq!(app.work.timer.remaining(), 30 * 60);
    }

    #[test]
    fn minutes_input_is_clamped_per_interval() {
        let (mut app, _) = app();
        dispatch(&mut app, Message::AdjustMinutes(IntervalKind::Work, 1000));
        dispatch(&mut app, Message::AdjustMinutes(IntervalKind::Break, 1000));
        assert_eq!(app.work.minutes_input, 240);
        assert_eq!(app.rest.minutes_input, 120);

        dispatch(&mut app, Message::AdjustMinutes(IntervalKind::Break, -1000));
        assert_eq!(app.rest.minutes_input, 1);
    }

    #[test]
    fn ticks_count_down_once_per_second() {
        let (mut app, _) = app();
        one_minute_work(&mut app);

        dispatch(&mut app, Message::Tick(Duration::from_millis(400)));
        assert_eq!(app.work.timer.remaining(), 60);
        dispatch(&mut app, Message::Tick(Duration::from_millis(700)));
        assert_eq!(app.work.timer.remaining(), 59);
        assert_eq!(app.work.timer.display(), "00:59");
    }

    #[test]
    fn paused_timer_ignores_ticks_and_resumes_fresh() {
        let (mut app, _) = app();
        one_minute_work(&mut app);
        dispatch(&mut app, Message::Tick(Duration::from_millis(900)));
        dispatch(&mut app, Message::PauseToggle(IntervalKind::Work));
        dispatch(&mut app, Message::Tick(Duration::from_secs(10)));
        assert_eq!(app.work.timer.remaining(), 60);

        dispatch(&mut app, Message::PauseToggle(IntervalKind::Work));
        // the 900ms before the pause were dropped
        dispatch(&mut app, Message::Tick(Duration::from_millis(200)));
        assert_eq!(app.work.timer.remaining(), 60);
        dispatch(&mut app, Message::Tick(Duration::from_millis(800)));
        assert_eq!(app.work.timer.remaining(), 59);
    }

    #[test]
    fn stop_resets_remaining() {
        let (mut app, _) = app();
        one_minute_work(&mut app);
        dispatch(&mut app, Message::Tick(Duration::from_secs(5)));
        dispatch(&mut app, Message::Stop(IntervalKind::Work));

        assert_eq!(app.work.timer.state(), TimerState::Idle);
        assert_eq!(app.work.timer.remaining(), 60);
        dispatch(&mut app, Message::Tick(Duration::from_secs(5)));
        assert_eq!(app.work.timer.remaining(), 60);
    }

    #[test]
    fn expiry_rearms_and_spawns_popup() {
        let (mut app, cues) = app();
        one_minute_work(&mut app);
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));

        let work = &app.work.timer;
        assert_eq!(work.state(), TimerState::Idle);
        assert_eq!(work.remaining(), 60);
        assert!(work.can_start());

        assert_eq!(app.popups.len(), 1);
        assert_eq!(
            app.popups[0].message(),
            IntervalKind::Work.expiry_prompt()
        );
        assert!(
            cues.0
                .borrow()
                .contains(&Cue::IntervalFinished(IntervalKind::Work))
        );
        assert_eq!(app.rest.timer.state(), TimerState::Idle);
    }

    #[test]
    fn accepting_popup_starts_the_other_timer() {
        let (mut app, _) = app();
        one_minute_work(&mut app);
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));
        dispatch(&mut app, Message::Tick(Duration::from_secs(1)));

        dispatch(&mut app, Message::AcceptPopup);
        assert_eq!(app.rest.timer.state(), TimerState::Running);
        assert_eq!(app.rest.timer.remaining(), 10 * 60);
        assert_eq!(app.popups[0].phase(), PopupPhase::FadingOut);

        // a second accept has nothing to act on
        assert_eq!(app.update(Message::AcceptPopup), None);
        assert!(app.active_popup().is_none());

        dispatch(&mut app, Message::Tick(Duration::from_secs(1)));
        assert!(app.popups.is_empty());
    }

    #[test]
    fn deferring_popup_leaves_timers_idle() {
        let (mut app, _) = app();
        one_minute_work(&mut app);
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));
        dispatch(&mut app, Message::DeferPopup);
        dispatch(&mut app, Message::Tick(Duration::from_secs(2)));

        assert!(app.popups.is_empty());
        assert_eq!(app.rest.timer.state(), TimerState::Idle);
        assert_eq!(app.work.timer.state(), TimerState::Idle);
    }

    #[test]
    fn popup_timeout_never_starts_next_interval() {
        let config = PomodoroConfig::new(1, 10, 5, false, CueBackend::None).unwrap();
        let (mut app, _) = app_with(config);
        dispatch(&mut app, Message::Start(IntervalKind::Work));
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));
        assert_eq!(app.popups.len(), 1);

        dispatch(&mut app, Message::Tick(Duration::from_secs(5)));
        dispatch(&mut app, Message::Tick(Duration::from_secs(5)));
        assert!(app.popups.is_empty());
        assert_eq!(app.rest.timer.state(), TimerState::Idle);
    }

    #[test]
    fn muted_app_plays_nothing() {
        let (mut app, cues) = app();
        dispatch(&mut app, Message::ToggleMute);
        assert!(app.muted);
        one_minute_work(&mut app);
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));
        assert!(cues.0.borrow().is_empty());

        dispatch(&mut app, Message::ToggleMute);
        dispatch(&mut app, Message::Start(IntervalKind::Break));
        assert_eq!(cues.0.borrow().len(), 1);
    }

    #[test]
    fn timers_run_independently() {
        let (mut app, _) = app();
        app.work.minutes_input = 2;
        app.rest.minutes_input = 1;
        dispatch(&mut app, Message::Start(IntervalKind::Work));
        dispatch(&mut app, Message::Start(IntervalKind::Break));
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));

        assert_eq!(app.rest.timer.state(), TimerState::Idle);
        assert_eq!(app.work.timer.remaining(), 60);
        assert_eq!(app.work.timer.state(), TimerState::Running);
        assert_eq!(app.popups.len(), 1);
    }

    #[test]
    fn newest_popup_receives_input() {
        let config = PomodoroConfig::new(1, 1, 600, false, CueBackend::None).unwrap();
        let (mut app, _) = app_with(config);
        dispatch(&mut app, Message::Start(IntervalKind::Work));
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));
        dispatch(&mut app, Message::Start(IntervalKind::Break));
        dispatch(&mut app, Message::Tick(Duration::from_secs(60)));
        assert_eq!(app.popups.len(), 2);

        // newest came from the break expiring, so accepting starts work
        dispatch(&mut app, Message::AcceptPopup);
        assert_eq!(app.work.timer.state(), TimerState::Running);
        assert!(app.popups[0].is_interactive());
    }

    #[test]
    fn focus_and_quit() {
        let (mut app, _) = app();
        dispatch(&mut app, Message::FocusNext);
        assert_eq!(app.focus, IntervalKind::Break);
        dispatch(&mut app, Message::Focus(IntervalKind::Work));
        assert_eq!(app.focus, IntervalKind::Work);
        dispatch(&mut app, Message::Quit);
        assert_eq!(app.running_state, RunningState::Done);
    }
}
