//! Input handling (keyboard, mouse and resize).

use std::time::Instant;

use anyhow::Result;
use client_frontend_core::EventConsumer;
use crossterm::event::{self as term_event, Event as TermEvent, KeyEvent, KeyEventKind};
use tokio::time::Duration;

use super::super::EventLoop;
use crate::{input::KeyAction, presentation::terminal::Tui};

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    /// Drain pending terminal input, then redraw when anything changed or a
    /// piece is still in flight.
    pub(in crate::event) fn handle_input_tick(&mut self, terminal: &mut Tui) -> Result<bool> {
        let mut redraw = false;

        while term_event::poll(Duration::from_millis(0))? {
            match term_event::read()? {
                TermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if self.handle_key_press(key) {
                        self.consumer.message_log_mut().push_text("Quitting...");
                        self.render(terminal)?;
                        return Ok(true);
                    }
                    redraw = true;
                }
                TermEvent::Mouse(mouse) => {
                    let dice = self.view_model.dice.as_ref().map(|display| display.side);
                    if let Some(request) =
                        self.input
                            .handle_mouse(mouse, self.app_state.board.as_ref(), dice)
                    {
                        self.submit(request);
                    }
                }
                TermEvent::Resize(_, _) => redraw = true,
                _ => {}
            }
        }

        let now = Instant::now();
        redraw |= self.view_model.expire(now);
        redraw |= self.view_model.is_animating(now);

        if redraw {
            self.render(terminal)?;
        }
        Ok(false)
    }

    /// Handle a key press. Returns `true` to quit.
    fn handle_key_press(&mut self, key: KeyEvent) -> bool {
        match self.input.handle_key(key, self.view_model.controls) {
            KeyAction::Quit => true,
            KeyAction::Request(request) => {
                self.submit(request);
                false
            }
            KeyAction::ToggleHelp => {
                self.app_state.toggle_help();
                false
            }
            KeyAction::None => false,
        }
    }
}
