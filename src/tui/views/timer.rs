use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::models::IntervalKind;
use crate::timer::{TimerState, format_time};
use crate::tui::app::{App, TimerPanel};

pub fn draw_timer(frame: &mut Frame, app: &App, kind: IntervalKind, area: Rect) {
    let panel = app.panel(kind);
    let focused = app.focus == kind;

    let accent = match kind {
        IntervalKind::Work => Color::Blue,
        IntervalKind::Break => Color::Green,
    };

    let time_style = match panel.timer.state() {
        TimerState::Paused => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(accent).add_modifier(Modifier::BOLD),
    };

    let minutes_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(panel.timer.display(), time_style)),
        Line::from(Span::styled(
            format!(
                "{} (of {})",
                panel.timer.state().label(),
                format_time(panel.timer.configured())
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw(format!("{} minutes: ", kind)),
            Span::styled(format!("[{}]", panel.minutes_input), minutes_style),
            Span::styled(
                format!(" (1-{})", kind.max_minutes()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(""),
        controls_line(panel),
    ];

    let title = format!(" {} Timer ", kind);
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let block = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );

    frame.render_widget(block, area);
}

/// Control hints, dimmed when the control is disabled
fn controls_line(panel: &TimerPanel) -> Line<'static> {
    let control = |label: &'static str, enabled: bool, color: Color| -> Span<'static> {
        if enabled {
            Span::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(label, Style::default().fg(Color::DarkGray))
        }
    };

    let pause_label = if panel.timer.state() == TimerState::Paused {
        "[p] Resume"
    } else {
        "[p] Pause"
    };

    Line::from(vec![
        control("[s] Start", panel.timer.can_start(), Color::Green),
        Span::raw("  "),
        control(pause_label, panel.timer.can_pause(), Color::Yellow),
        Span::raw("  "),
        control("[x] Stop", panel.timer.can_stop(), Color::Red),
    ])
}
