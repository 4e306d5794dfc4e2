//! Rendering handlers.

use std::time::Instant;

use anyhow::Result;
use client_frontend_core::EventConsumer;
use ratatui::layout::Rect;

use super::super::EventLoop;
use crate::{
    input::UiRequest,
    presentation::{
        terminal::Tui,
        ui::{self, ScreenLayout},
    },
};

impl<C> EventLoop<C>
where
    C: EventConsumer,
{
    /// Render current state using ViewModel.
    ///
    /// The layout is recomputed from the terminal size on every frame. When
    /// the board extents change, the new geometry is sent to the runtime.
    pub(in crate::event) fn render(&mut self, terminal: &mut Tui) -> Result<()> {
        let size = terminal.size()?;
        let height = self.cli_config.ui.message_panel_height;
        let screen = ScreenLayout::compute(Rect::new(0, 0, size.width, size.height), height);

        if let Some(geometry) = self.app_state.update_layout(screen.board_rects) {
            self.view_model.board.resize(geometry);
            if !self.submit(UiRequest::Resize(geometry)) {
                // Retried on the next frame.
                self.app_state.geometry = None;
            }
        }

        let ctx = ui::RenderContext {
            view_model: &self.view_model,
            messages: self.consumer.message_log(),
            app_state: &self.app_state,
            screen: &screen,
            message_panel_height: height,
            now: Instant::now(),
        };

        ui::render_with_view_model(terminal, &ctx)
    }
}
