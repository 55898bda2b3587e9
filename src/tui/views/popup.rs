use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};

use crate::popup::{CloseKind, OFFSCREEN_OFFSET, PopupPhase};
use crate::tui::app::{App, Popup};

const POPUP_WIDTH: u16 = 46;
const POPUP_HEIGHT: u16 = 8;
const MARGIN: u16 = 1;

/// Draw live popups in the bottom-right corner, newest on top
pub fn draw_popups(frame: &mut Frame, app: &App) {
    let area = frame.area();
    for popup in &app.popups {
        if let Some(rect) = popup_rect(popup, area) {
            draw_popup(frame, popup, rect);
        }
    }
}

/// Where the popup sits this frame, clipped to the screen; `None` once it
/// has slid fully out of view.
pub fn popup_rect(popup: &Popup, area: Rect) -> Option<Rect> {
    let width = POPUP_WIDTH.min(area.width);
    let height = POPUP_HEIGHT.min(area.height);
    let rest_x = area.right().saturating_sub(width + MARGIN).max(area.x);
    let rest_y = area.bottom().saturating_sub(height + MARGIN).max(area.y);

    // travel from rest to the screen edge spans the popup plus its margin
    let travel = f32::from(height + MARGIN);
    let rows = (popup.offset().max(0.0) / OFFSCREEN_OFFSET * travel).round() as u16;
    let y = rest_y.saturating_add(rows);
    if y >= area.bottom() {
        return None;
    }

    Some(Rect::new(rest_x, y, width, height.min(area.bottom() - y)))
}

/// Map opacity to a colour, brightest when fully shown
fn faded(opacity: f32, full: Color) -> Color {
    if opacity >= 0.7 {
        full
    } else if opacity >= 0.35 {
        Color::Gray
    } else {
        Color::DarkGray
    }
}

fn draw_popup(frame: &mut Frame, popup: &Popup, area: Rect) {
    let opacity = popup.opacity();
    let text = faded(opacity, Color::White);
    let accent = faded(opacity, Color::Cyan);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Timer reminder ")
        .border_style(Style::default().fg(accent));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Message and actions
            Constraint::Length(1), // Time left
        ])
        .split(inner);

    let actions = match (popup.phase(), popup.close_kind()) {
        (PopupPhase::SlidingIn | PopupPhase::Visible, _) => Line::from(vec![
            Span::styled(
                "[y] Start",
                Style::default()
                    .fg(faded(opacity, Color::Green))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("[n] Later", Style::default().fg(faded(opacity, Color::Gray))),
        ]),
        (PopupPhase::FadingOut, Some(CloseKind::Timeout)) => Line::from(Span::styled(
            "No answer, closing",
            Style::default().fg(Color::DarkGray),
        )),
        _ => Line::from(""),
    };

    let content = vec![
        Line::from(Span::styled(
            popup.message(),
            Style::default().fg(text).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        actions,
    ];

    let body = Paragraph::new(content).wrap(Wrap { trim: true });
    frame.render_widget(body, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(accent).bg(Color::Black))
        .ratio(popup.progress_fraction())
        .label(format!("{}s", popup.time_left().as_secs()));
    frame.render_widget(gauge, chunks[1]);
}
