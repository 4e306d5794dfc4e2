//! Header widget displaying the match and the score.

use client_frontend_core::view_model::ViewModel;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

/// Render the scoreboard panel.
pub fn render(frame: &mut Frame, area: Rect, view_model: &ViewModel, theme: &RatatuiTheme) {
    let local = view_model.board.seats().local;
    let (glyph, piece_style) = theme.piece(local);

    let lines = match &view_model.scoreboard {
        Some(scoreboard) => {
            let opponent = if scoreboard.opponent_score.is_empty() {
                "-"
            } else {
                scoreboard.opponent_score.as_str()
            };
            vec![
                Line::from(vec![
                    Span::styled(
                        scoreboard.match_text.clone(),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" | You "),
                    Span::styled(glyph.to_string(), piece_style),
                    Span::raw(": "),
                    Span::styled(
                        scoreboard.your_score.clone(),
                        Style::default().fg(Color::LightGreen),
                    ),
                    Span::raw(" | Opponent: "),
                    Span::styled(opponent.to_string(), Style::default().fg(Color::LightRed)),
                ]),
                Line::styled(scoreboard.match_title.clone(), theme.key_hint()),
            ]
        }
        None => vec![Line::styled("No game in progress", theme.key_hint())],
    };

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Match"));

    frame.render_widget(paragraph, area);
}
