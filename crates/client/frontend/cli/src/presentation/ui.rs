//! UI rendering composed from widgets over the ViewModel.
//!
//! This module provides the main render entry point that composes all widgets
//! to create the complete terminal UI.
use std::time::Instant;

use anyhow::Result;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use crate::{
    presentation::{layout::BoardRects, terminal::Tui, theme::RatatuiTheme, widgets},
    state::AppState,
};
use client_frontend_core::{message::MessageLog, view_model::ViewModel};

/// Screen areas for one terminal size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub board: Rect,
    pub board_rects: BoardRects,
    pub controls: Rect,
    pub messages: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect, message_panel_height: u16) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),                    // Scoreboard
                Constraint::Min(0),                       // Board
                Constraint::Length(3),                    // Controls
                Constraint::Length(message_panel_height), // Messages
                Constraint::Length(1),                    // Footer
            ])
            .split(area);

        let board_inner = Block::default().borders(Borders::ALL).inner(chunks[1]);

        Self {
            header: chunks[0],
            board: chunks[1],
            board_rects: BoardRects::compute(board_inner),
            controls: chunks[2],
            messages: chunks[3],
            footer: chunks[4],
        }
    }
}

/// Rendering context containing all state needed for one frame.
pub struct RenderContext<'a> {
    pub view_model: &'a ViewModel,
    pub messages: &'a MessageLog,
    pub app_state: &'a AppState,
    pub screen: &'a ScreenLayout,
    pub message_panel_height: u16,
    pub now: Instant,
}

/// Render the terminal UI using ViewModel and widget system.
pub fn render_with_view_model(terminal: &mut Tui, ctx: &RenderContext) -> Result<()> {
    let theme = RatatuiTheme::new();

    terminal.draw(|frame| {
        widgets::header::render(frame, ctx.screen.header, ctx.view_model, &theme);
        widgets::board::render(frame, ctx.screen, ctx.view_model, ctx.now, &theme);
        widgets::dice::render(frame, &ctx.screen.board_rects, ctx.view_model, &theme);
        widgets::controls::render(frame, ctx.screen.controls, ctx.view_model, &theme);
        widgets::messages::render(
            frame,
            ctx.screen.messages,
            ctx.messages,
            ctx.message_panel_height.saturating_sub(2),
            &theme,
        );
        widgets::footer::render(frame, ctx.screen.footer, ctx.app_state, &theme);

        if ctx.app_state.show_help {
            let area = centered_rect(50, 60, frame.area());
            widgets::footer::render_help(frame, area);
        }
    })?;

    Ok(())
}

/// Rectangle of `percent_x` by `percent_y` centered in `r`.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

    #[test]
    fn board_takes_remaining_height() {
        let screen = ScreenLayout::compute(Rect::new(0, 0, 100, 40), 6);

        assert_eq!(screen.header.height, 4);
        assert_eq!(screen.board.height, 40 - 4 - 3 - 6 - 1);
        assert_eq!(screen.board_rects.inner.height, screen.board.height - 2);
        assert_eq!(screen.footer.y, 39);
    }
}
