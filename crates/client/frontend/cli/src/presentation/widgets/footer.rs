//! Footer key hints and the help overlay.

use ratatui::{
    Frame,
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::{presentation::theme::RatatuiTheme, state::AppState};

pub fn render(frame: &mut Frame, area: Rect, app_state: &AppState, theme: &RatatuiTheme) {
    let mut hint = String::from("click: move by first die | right click: second die | ? help | q quit");
    if app_state.dropped_inputs > 0 {
        hint.push_str(&format!(" | {} inputs dropped", app_state.dropped_inputs));
    }

    frame.render_widget(Paragraph::new(hint).style(theme.key_hint()), area);
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from("Left click a stack    move its top piece by the first die"),
        Line::from("Right click a stack   move it by the second die"),
        Line::from("Click your dice       swap the dice order"),
        Line::from("space                 swap the dice order"),
        Line::from("r                     roll"),
        Line::from("c                     confirm the turn"),
        Line::from("u                     undo"),
        Line::from("g / m                 resign game / match"),
        Line::from("? or h                toggle this help"),
        Line::from("q or Esc              quit"),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::ALL).title("Help")),
        area,
    );
}
