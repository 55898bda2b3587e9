use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use super::views::{draw_popups, draw_timer};
use crate::models::IntervalKind;

/// Main draw function that delegates to the timer panels and overlays
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Timer panels
            Constraint::Length(3), // Status/help bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    draw_timer(frame, app, IntervalKind::Work, panels[0]);
    draw_timer(frame, app, IntervalKind::Break, panels[1]);

    draw_footer(frame, app, chunks[2]);

    draw_popups(frame, app);

    // Draw help overlay if active
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let tab = |kind: IntervalKind, key: &str| -> Span<'static> {
        let text = format!(" [{}] {} ", key, kind);
        if app.focus == kind {
            Span::styled(
                text,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(text, Style::default().fg(Color::DarkGray))
        }
    };

    let sound = if app.muted {
        Span::styled(" MUTED ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::styled(" SOUND ON ", Style::default().fg(Color::Green))
    };

    let header = Paragraph::new(Line::from(vec![
        tab(IntervalKind::Work, "1"),
        tab(IntervalKind::Break, "2"),
        Span::raw("  "),
        sound,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" TOMATICK - Pomodoro Timer "),
    )
    .style(Style::default().fg(Color::White));

    frame.render_widget(header, area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.active_popup().is_some() {
        "[y] Start next  [n] Later  [?] Help  [q] Quit"
    } else {
        "[s] Start  [p] Pause  [x] Stop  [+/-] Minutes  [m] Mute  [?] Help  [q] Quit"
    };

    let status = if let Some(msg) = &app.status_message {
        Line::from(vec![
            Span::styled(msg, Style::default().fg(Color::Green)),
            Span::raw("  |  "),
            Span::styled(help_text, Style::default().fg(Color::DarkGray)),
        ])
    } else {
        Line::from(Span::styled(
            help_text,
            Style::default().fg(Color::DarkGray),
        ))
    };

    let footer = Paragraph::new(status).block(Block::default().borders(Borders::ALL));

    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from(Span::styled(
            "TOMATICK - Help",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Global Keys",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  q        - Quit application"),
        Line::from("  1 / 2    - Focus work / break timer"),
        Line::from("  Tab      - Switch focused timer"),
        Line::from("  m        - Mute / unmute sounds"),
        Line::from("  ?        - Toggle this help"),
        Line::from(""),
        Line::from(Span::styled(
            "Focused Timer",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  s        - Start"),
        Line::from("  p        - Pause / resume"),
        Line::from("  x        - Stop and reset"),
        Line::from("  + / -    - Change minutes (next start)"),
        Line::from(""),
        Line::from(Span::styled(
            "Reminder Popup",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  y        - Start the next interval"),
        Line::from("  n        - Dismiss"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

/// Helper to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PomodoroConfig;
    use crate::notification::Silent;
    use crate::tui::app::Message;
    use ratatui::{Terminal, backend::TestBackend};
    use std::time::Duration;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> App {
        App::new(&PomodoroConfig::default(), Box::new(Silent))
    }

    #[test]
    fn shows_both_timers() {
        let text = render(&app());
        assert!(text.contains("Work Timer"));
        assert!(text.contains("Break Timer"));
        assert!(text.contains("30:00"));
        assert!(text.contains("10:00"));
        assert!(text.contains("Ready"));
    }

    #[test]
    fn paused_timer_offers_resume() {
        let mut app = app();
        app.update(Message::Start(IntervalKind::Work));
        app.update(Message::PauseToggle(IntervalKind::Work));
        let text = render(&app);
        assert!(text.contains("Paused"));
        assert!(text.contains("[p] Resume"));
    }

    #[test]
    fn header_shows_mute_state() {
        let mut app = app();
        assert!(render(&app).contains("SOUND ON"));
        app.update(Message::ToggleMute);
        assert!(render(&app).contains("MUTED"));
    }

    #[test]
    fn expiry_popup_is_drawn_once_settled() {
        let mut app = app();
        app.work.minutes_input = 1;
        app.update(Message::Start(IntervalKind::Work));
        app.update(Message::Tick(Duration::from_secs(60)));
        // still below the screen edge
        assert!(!render(&app).contains("Timer reminder"));

        app.update(Message::Tick(Duration::from_secs(1)));
        let text = render(&app);
        assert!(text.contains("Timer reminder"));
        assert!(text.contains("Work time is over."));
        assert!(text.contains("[y] Start"));
        assert!(text.contains("59s"));
    }

    #[test]
    fn help_overlay_lists_popup_keys() {
        let mut app = app();
        app.update(Message::ToggleHelp);
        let text = render(&app);
        assert!(text.contains("TOMATICK - Help"));
        assert!(text.contains("Start the next interval"));
    }
}
