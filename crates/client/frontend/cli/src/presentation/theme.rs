//! Ratatui styling for the board, panels and messages.

use board_core::{NoticeTone, Parity, PieceType};
use client_frontend_core::message::MessageLevel;
use ratatui::style::{Color, Modifier, Style};

/// Consistent color scheme and styling rules for the CLI.
#[derive(Clone, Copy, Debug, Default)]
pub struct RatatuiTheme;

impl RatatuiTheme {
    pub fn new() -> Self {
        Self
    }

    pub fn piece(&self, kind: PieceType) -> (char, Style) {
        match kind {
            PieceType::White => ('O', Style::default().fg(Color::White)),
            PieceType::Black => ('X', Style::default().fg(Color::LightRed)),
        }
    }

    /// Piece glyph styled for one animation frame.
    pub fn flying_piece(&self, kind: PieceType, scale: f64, opacity: f64) -> (char, Style) {
        let (glyph, mut style) = self.piece(kind);
        style = style.add_modifier(Modifier::REVERSED);
        if scale > 1.0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if opacity < 0.5 {
            style = style.add_modifier(Modifier::DIM);
        }
        (glyph, style)
    }

    pub fn point(&self, parity: Parity) -> (char, Style) {
        match parity {
            Parity::Even => ('.', Style::default().fg(Color::DarkGray)),
            Parity::Odd => (':', Style::default().fg(Color::Gray)),
        }
    }

    pub fn bar(&self) -> Style {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::DIM)
    }

    pub fn die(&self, played: bool) -> Style {
        if played {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD)
        }
    }

    pub fn tone(&self, tone: NoticeTone) -> Style {
        match tone {
            NoticeTone::Info => Style::default().fg(Color::Cyan),
            NoticeTone::Positive => Style::default().fg(Color::LightGreen),
            NoticeTone::Negative => Style::default().fg(Color::LightRed),
        }
        .add_modifier(Modifier::BOLD)
    }

    pub fn message(&self, level: MessageLevel) -> Style {
        match level {
            MessageLevel::Info => Style::default().fg(Color::White),
            MessageLevel::Positive => Style::default().fg(Color::LightGreen),
            MessageLevel::Negative => Style::default().fg(Color::LightRed),
            MessageLevel::Warning => Style::default().fg(Color::Yellow),
        }
    }

    pub fn button(&self) -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
