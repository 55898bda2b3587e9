pub mod app;
pub mod event;
pub mod ui;
pub mod views;

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    event::{Event, KeyEventKind, poll, read},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::error::TomatickError;
use crate::models::PomodoroConfig;
use crate::notification::player_for;
use app::{App, Message, RunningState};

/// Input poll timeout; also the animation frame cadence
const FRAME: Duration = Duration::from_millis(50);

/// Main entry point for TUI mode
pub fn run_tui(config: &PomodoroConfig) -> Result<(), TomatickError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, player_for(config.cue));
    log::info!("session started: {}", config.format_status());

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("session ended");
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), TomatickError> {
    let mut last_tick = Instant::now();

    loop {
        // Render
        terminal.draw(|f| ui::draw(f, app))?;

        // Handle events with timeout (for timer and animation updates)
        if poll(FRAME)? {
            if let Event::Key(key) = read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(msg) = event::handle_key(key, app) {
                        dispatch(app, msg);
                    }
                }
            }
        }

        let now = Instant::now();
        dispatch(app, Message::Tick(now - last_tick));
        last_tick = now;

        // Check if we should quit
        if app.running_state == RunningState::Done {
            return Ok(());
        }
    }
}

/// Process message and any follow-up messages
fn dispatch(app: &mut App, msg: Message) {
    let mut current_msg = Some(msg);
    while let Some(m) = current_msg {
        current_msg = app.update(m);
    }
}
