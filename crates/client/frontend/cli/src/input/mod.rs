//! Input processing for the CLI client.
//!
//! This module owns the keyboard and mouse mapping so the rest of the
//! application can remain agnostic about concrete key bindings or the
//! specifics of `crossterm` events.

use board_core::{Controls, DiceSide, PointerButton};
use board_runtime::ControlButton;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};

use crate::presentation::layout::{BoardHit, BoardRects};

pub mod forwarder;
pub use forwarder::{RequestForwarder, UiRequest};

/// High-level outcome of processing a keyboard event.
#[derive(Debug, PartialEq)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Forward a request to the board.
    Request(UiRequest),
    /// Show or hide the key help.
    ToggleHelp,
    /// No meaningful command was produced.
    None,
}

/// Translates terminal events into board requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Converts a raw key event into a higher-level command.
    ///
    /// Buttons are forwarded whatever their visibility; the board worker
    /// ignores presses on hidden controls. `u` picks the turn-end undo when
    /// it is shown and the menu undo otherwise.
    pub fn handle_key(&self, key: KeyEvent, controls: Controls) -> KeyAction {
        match key.code {
            KeyCode::Char(ch) => self.handle_char(ch, controls),
            KeyCode::Esc => KeyAction::Quit,
            _ => KeyAction::None,
        }
    }

    fn handle_char(&self, raw: char, controls: Controls) -> KeyAction {
        let press = |button| KeyAction::Request(UiRequest::Press(button));
        match raw.to_ascii_lowercase() {
            'q' => KeyAction::Quit,
            'r' => press(ControlButton::Roll),
            'c' => press(ControlButton::Confirm),
            'u' if controls.contains(Controls::UNDO) => press(ControlButton::Undo),
            'u' => press(ControlButton::MenuUndo),
            'g' => press(ControlButton::ResignGame),
            'm' => press(ControlButton::ResignMatch),
            ' ' => KeyAction::Request(UiRequest::ClickDice),
            '?' | 'h' => KeyAction::ToggleHelp,
            _ => KeyAction::None,
        }
    }

    /// Resolves a mouse press against the last drawn board.
    ///
    /// Left button plays the first die, right button the last. Only the
    /// local player's dice pane accepts clicks.
    pub fn handle_mouse(
        &self,
        mouse: MouseEvent,
        board: Option<&BoardRects>,
        dice: Option<DiceSide>,
    ) -> Option<UiRequest> {
        let button = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerButton::Primary,
            MouseEventKind::Down(MouseButton::Right) => PointerButton::Secondary,
            _ => return None,
        };

        match board?.hit(mouse.column, mouse.row)? {
            BoardHit::Slot(slot) => Some(UiRequest::Pointer { slot, button }),
            BoardHit::Dice(DiceSide::Right)
                if button == PointerButton::Primary && dice == Some(DiceSide::Right) =>
            {
                Some(UiRequest::ClickDice)
            }
            BoardHit::Dice(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_core::VisualSlot;
    use crossterm::event::{KeyEventKind, KeyEventState, KeyModifiers};
    use ratatui::layout::Rect;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn press(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::empty(),
        }
    }

    #[test]
    fn maps_control_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('R')), Controls::empty()),
            KeyAction::Request(UiRequest::Press(ControlButton::Roll))
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char(' ')), Controls::empty()),
            KeyAction::Request(UiRequest::ClickDice)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('q')), Controls::empty()),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('x')), Controls::empty()),
            KeyAction::None
        );
    }

    #[test]
    fn undo_key_follows_visible_undo() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('u')), Controls::CONFIRM | Controls::UNDO),
            KeyAction::Request(UiRequest::Press(ControlButton::Undo))
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('u')), Controls::MENU_UNDO),
            KeyAction::Request(UiRequest::Press(ControlButton::MenuUndo))
        );
    }

    #[test]
    fn mouse_buttons_pick_gesture() {
        let handler = InputHandler::new();
        let rects = BoardRects::compute(Rect::new(1, 1, 61, 20));
        let top_left = rects.left_field;

        assert_eq!(
            handler.handle_mouse(
                press(MouseEventKind::Down(MouseButton::Right), top_left.x, top_left.y),
                Some(&rects),
                None,
            ),
            Some(UiRequest::Pointer {
                slot: VisualSlot::Point(12),
                button: PointerButton::Secondary,
            })
        );
        assert_eq!(
            handler.handle_mouse(
                press(MouseEventKind::Up(MouseButton::Left), top_left.x, top_left.y),
                Some(&rects),
                None,
            ),
            None
        );
        assert_eq!(
            handler.handle_mouse(
                press(MouseEventKind::Down(MouseButton::Left), 5, 5),
                None,
                None,
            ),
            None
        );
    }

    #[test]
    fn only_local_dice_accept_clicks() {
        let handler = InputHandler::new();
        let rects = BoardRects::compute(Rect::new(1, 1, 61, 20));
        let left = press(MouseEventKind::Down(MouseButton::Left), rects.left_pane.x, 3);
        let right = press(MouseEventKind::Down(MouseButton::Left), rects.right_pane.x, 3);

        assert_eq!(handler.handle_mouse(left, Some(&rects), Some(DiceSide::Left)), None);
        assert_eq!(handler.handle_mouse(right, Some(&rects), None), None);
        assert_eq!(
            handler.handle_mouse(right, Some(&rects), Some(DiceSide::Right)),
            Some(UiRequest::ClickDice)
        );
    }
}
