use crossterm::event::{KeyCode, KeyEvent};

use super::app::{App, Message};
use crate::models::IntervalKind;

/// Map key events to messages based on current app state
pub fn handle_key(key: KeyEvent, app: &App) -> Option<Message> {
    // Handle help toggle globally
    if key.code == KeyCode::Char('?') {
        return Some(Message::ToggleHelp);
    }

    // If help is shown, any key closes it
    if app.show_help {
        return Some(Message::ToggleHelp);
    }

    // A live popup claims its answer keys; everything else passes through
    if app.active_popup().is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                return Some(Message::AcceptPopup);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                return Some(Message::DeferPopup);
            }
            _ => {}
        }
    }

    // Global keys
    match key.code {
        KeyCode::Char('q') => return Some(Message::Quit),
        KeyCode::Char('1') => return Some(Message::Focus(IntervalKind::Work)),
        KeyCode::Char('2') => return Some(Message::Focus(IntervalKind::Break)),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Left | KeyCode::Right => {
            return Some(Message::FocusNext);
        }
        KeyCode::Char('m') | KeyCode::Char('M') => return Some(Message::ToggleMute),
        KeyCode::Esc => return Some(Message::ClearStatus),
        _ => {}
    }

    handle_timer_keys(key, app, app.focus)
}

fn handle_timer_keys(key: KeyEvent, app: &App, kind: IntervalKind) -> Option<Message> {
    let timer = &app.panel(kind).timer;
    match key.code {
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Enter => {
            if timer.can_start() {
                Some(Message::Start(kind))
            } else {
                None
            }
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Char(' ') => {
            if timer.can_pause() {
                Some(Message::PauseToggle(kind))
            } else {
                None
            }
        }
        KeyCode::Char('x') | KeyCode::Char('X') => {
            if timer.can_stop() {
                Some(Message::Stop(kind))
            } else {
                None
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Up => {
            Some(Message::AdjustMinutes(kind, 1))
        }
        KeyCode::Char('-') | KeyCode::Char('_') | KeyCode::Down => {
            Some(Message::AdjustMinutes(kind, -1))
        }
        KeyCode::PageUp => Some(Message::AdjustMinutes(kind, 5)),
        KeyCode::PageDown => Some(Message::AdjustMinutes(kind, -5)),
        _ => None,
    }
}
