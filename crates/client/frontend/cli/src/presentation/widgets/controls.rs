//! Control bar listing the buttons the player can press right now.

use board_core::Controls;
use client_frontend_core::view_model::ViewModel;
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::presentation::theme::RatatuiTheme;

const BUTTONS: [(Controls, &str, &str); 6] = [
    (Controls::ROLL, "r", "Roll"),
    (Controls::CONFIRM, "c", "Confirm"),
    (Controls::UNDO, "u", "Undo"),
    (Controls::MENU_UNDO, "u", "Undo move"),
    (Controls::RESIGN, "g", "Resign game"),
    (Controls::RESIGN, "m", "Resign match"),
];

/// Labels of the visible buttons with their keys.
pub fn visible_buttons(controls: Controls) -> Vec<(&'static str, &'static str)> {
    BUTTONS
        .iter()
        .filter(|(flag, _, _)| controls.contains(*flag))
        // The menu undo entry hides behind the undo button when both show.
        .filter(|(flag, _, _)| {
            *flag != Controls::MENU_UNDO || !controls.contains(Controls::UNDO)
        })
        .map(|(_, key, label)| (*key, *label))
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, view_model: &ViewModel, theme: &RatatuiTheme) {
    let mut spans = Vec::new();
    for (key, label) in visible_buttons(view_model.controls) {
        spans.push(Span::styled(format!(" {label} "), theme.button()));
        spans.push(Span::styled(format!(" [{key}]  "), theme.key_hint()));
    }
    if spans.is_empty() {
        spans.push(Span::styled("Waiting for opponent", theme.key_hint()));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Controls"));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_undo_gives_way_to_undo_button() {
        let mid_turn = visible_buttons(Controls::MENU_UNDO | Controls::RESIGN | Controls::DICE);
        assert_eq!(
            mid_turn,
            vec![("u", "Undo move"), ("g", "Resign game"), ("m", "Resign match")]
        );

        let finished = visible_buttons(
            Controls::CONFIRM | Controls::UNDO | Controls::MENU_UNDO | Controls::RESIGN,
        );
        assert_eq!(finished[..2], [("c", "Confirm"), ("u", "Undo")]);
        assert!(!finished.contains(&("u", "Undo move")));
    }

    #[test]
    fn nothing_visible_outside_a_game() {
        assert!(visible_buttons(Controls::empty()).is_empty());
    }
}
