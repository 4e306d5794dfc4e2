//! Dice pane beside the field of the player whose turn it is.

use board_core::DiceDisplay;
use client_frontend_core::view_model::ViewModel;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::presentation::{layout::BoardRects, theme::RatatuiTheme};

/// Dice lines; each die is shifted one column toward the side it leans to.
pub fn dice_lines(display: &DiceDisplay, theme: &RatatuiTheme) -> Vec<Line<'static>> {
    let style = theme.die(display.played);
    let mut lines: Vec<Line> = display
        .dice
        .values
        .iter()
        .zip(&display.angles)
        .map(|(value, angle)| {
            let indent = if *angle < 0.0 { " " } else { "   " };
            Line::from(vec![Span::raw(indent), Span::styled(format!("[{value}]"), style)])
        })
        .collect();

    if !display.played {
        let left: Vec<String> = display
            .dice
            .moves_left
            .iter()
            .map(ToString::to_string)
            .collect();
        lines.push(Line::raw(""));
        lines.push(Line::styled(format!("left:{}", left.join(",")), theme.key_hint()));
    }
    lines
}

pub fn render(frame: &mut Frame, rects: &BoardRects, view_model: &ViewModel, theme: &RatatuiTheme) {
    let Some(display) = &view_model.dice else {
        return;
    };
    let pane = rects.dice_pane(display.side);
    let height = (display.dice.values.len() as u16 + 2).min(pane.height);
    let top = pane.y + pane.height.saturating_sub(height) / 2;
    let area = Rect::new(pane.x, top, pane.width, height);

    frame.render_widget(Paragraph::new(dice_lines(display, theme)), area);
}
